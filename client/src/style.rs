use emokarta_shared::{EmotionVector, MapFeature, emotion_color, rgb_css};

/// Stroke color used while a feature is hovered (`#3b82f6`).
pub const HOVER_STROKE: (u8, u8, u8) = (59, 130, 246);

const BASE_STROKE: (u8, u8, u8) = (255, 255, 255);

/// Paint properties for one feature. Mirrors the subset of Leaflet-style
/// path options the map view actually renders.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProps {
    pub fill: (u8, u8, u8),
    pub fill_opacity: f64,
    pub stroke: (u8, u8, u8),
    pub stroke_weight: f64,
    pub dash: Option<&'static str>,
}

impl StyleProps {
    pub fn fill_css(&self) -> String {
        rgb_css(self.fill.0, self.fill.1, self.fill.2)
    }

    pub fn stroke_css(&self) -> String {
        rgb_css(self.stroke.0, self.stroke.1, self.stroke.2)
    }
}

/// Base style for a fused feature: fill from the dominant-emotion color,
/// thin dashed white outline.
pub fn style_for(feature: &MapFeature) -> StyleProps {
    base_style(&feature.emotions)
}

/// Base style from an emotion vector alone. Lets the interaction engine
/// restore a de-hovered feature from its tooltip snapshot without holding a
/// feature reference.
pub fn base_style(emotions: &EmotionVector) -> StyleProps {
    StyleProps {
        fill: emotion_color(emotions),
        fill_opacity: 0.7,
        stroke: BASE_STROKE,
        stroke_weight: 2.0,
        dash: Some("3"),
    }
}

/// Hover emphasis: heavier solid blue outline, denser fill. The fill color
/// itself is unchanged — hover never re-colors a region.
pub fn hover_style(feature: &MapFeature) -> StyleProps {
    StyleProps {
        fill: emotion_color(&feature.emotions),
        fill_opacity: 0.9,
        stroke: HOVER_STROKE,
        stroke_weight: 3.0,
        dash: None,
    }
}
