use emokarta_shared::{EmotionVector, MapFeature};

use crate::style::{StyleProps, base_style, hover_style, style_for};

/// Snapshot of the hovered feature's attached data, taken at pointer-enter.
/// This is what the tooltip renders — always the current collection's data,
/// never a reference into a previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub id: String,
    pub name: String,
    pub emotions: EmotionVector,
    pub diary_count: u32,
}

/// Feature-scoped pointer events. Pointer movement is deliberately not here:
/// position tracking is a side channel independent of feature state
/// (`InteractionState::track_pointer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

/// Whether a restyled feature moves above or below its siblings in paint
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Raise,
    Lower,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Restyle {
    pub id: String,
    pub style: StyleProps,
    pub paint: Paint,
}

/// Outward selection hand-off emitted on click. Selection is reported
/// upward, never held by this engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEvent {
    pub name: String,
    pub geo_id: String,
    pub emotions: EmotionVector,
}

/// Side effects of one transition, for the view to apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effects {
    pub restyle: Vec<Restyle>,
    pub selection: Option<SelectionEvent>,
}

/// Transient per-session interaction state: at most one hovered feature plus
/// the last pointer position. Reset whenever the feature collection is
/// replaced, so a hover can never outlive the features it refers to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    hovered: Option<HoverInfo>,
    pointer: (f64, f64),
}

impl InteractionState {
    pub fn hovered(&self) -> Option<&HoverInfo> {
        self.hovered.as_ref()
    }

    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    /// Pure transition: (state, event, feature) → mutated state + effects.
    pub fn apply(&mut self, event: PointerEvent, feature: &MapFeature) -> Effects {
        match event {
            PointerEvent::Enter => self.enter(feature),
            PointerEvent::Leave => self.leave(feature),
            PointerEvent::Click => Effects {
                restyle: Vec::new(),
                // Click hands the region off; paint state is untouched so the
                // feature is not left stuck in its hovered style.
                selection: Some(SelectionEvent {
                    name: feature.name.clone(),
                    geo_id: feature.id.clone(),
                    emotions: feature.emotions,
                }),
            },
        }
    }

    fn enter(&mut self, feature: &MapFeature) -> Effects {
        let mut restyle = Vec::new();

        // Entering B while A is hovered (no leave observed, e.g. adjacent
        // polygons): restore A from its snapshot before emphasizing B.
        if let Some(previous) = self.hovered.take()
            && previous.id != feature.id
        {
            restyle.push(Restyle {
                id: previous.id,
                style: base_style(&previous.emotions),
                paint: Paint::Lower,
            });
        }

        self.hovered = Some(HoverInfo {
            id: feature.id.clone(),
            name: feature.name.clone(),
            emotions: feature.emotions,
            diary_count: feature.diary_count,
        });
        restyle.push(Restyle {
            id: feature.id.clone(),
            style: hover_style(feature),
            paint: Paint::Raise,
        });

        Effects {
            restyle,
            selection: None,
        }
    }

    fn leave(&mut self, feature: &MapFeature) -> Effects {
        // A leave for a feature that is not the hovered one (stale event
        // after a reset or hand-off) is a no-op.
        if self.hovered.as_ref().is_none_or(|h| h.id != feature.id) {
            return Effects::default();
        }

        self.hovered = None;
        Effects {
            restyle: vec![Restyle {
                id: feature.id.clone(),
                style: style_for(feature),
                paint: Paint::Lower,
            }],
            selection: None,
        }
    }

    /// Continuous pointer side channel; used only for tooltip placement,
    /// never affects styling.
    pub fn track_pointer(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    /// Clear everything. Called before the feature collection is replaced so
    /// no tooltip shows until a new hover occurs on the new collection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
