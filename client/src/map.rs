use std::collections::HashMap;

use leptos::prelude::*;
use serde_json::Value;

use emokarta_shared::{Geometry, MapFeature};

use crate::app::{Interaction, RaisedFeature, Selected, StyleOverrides};
use crate::interact::{Effects, Paint, PointerEvent, SelectionEvent};
use crate::style::{StyleProps, style_for};

// Fixed map frame covering the mapped territory (lon 20..190, lat 35..77,
// the original view bounds). A plain linear placement, not a geographic
// projection — the engine treats coordinates as opaque and this is only the
// stand-in for a mapping widget.
const LON_MIN: f64 = 20.0;
const LON_MAX: f64 = 190.0;
const LAT_MIN: f64 = 35.0;
const LAT_MAX: f64 = 77.0;
pub(crate) const VIEW_W: f64 = 1000.0;
pub(crate) const VIEW_H: f64 = 600.0;

/// Place a lon/lat pair into the SVG viewBox.
pub(crate) fn project(lon: f64, lat: f64) -> (f64, f64) {
    (
        (lon - LON_MIN) / (LON_MAX - LON_MIN) * VIEW_W,
        (LAT_MAX - lat) / (LAT_MAX - LAT_MIN) * VIEW_H,
    )
}

fn push_ring(ring: &Value, path: &mut String) {
    let Some(points) = ring.as_array() else {
        return;
    };
    let mut command = 'M';
    for point in points {
        let Some(pair) = point.as_array() else {
            continue;
        };
        let (Some(lon), Some(lat)) = (
            pair.first().and_then(Value::as_f64),
            pair.get(1).and_then(Value::as_f64),
        ) else {
            continue;
        };
        let (x, y) = project(lon, lat);
        path.push(command);
        path.push_str(&format!("{x:.1} {y:.1} "));
        command = 'L';
    }
    if command == 'L' {
        path.push_str("Z ");
    }
}

/// Build an SVG path for a polygonal geometry; `None` for points or
/// malformed coordinate payloads (those render as markers or not at all).
pub(crate) fn svg_path(geometry: &Geometry) -> Option<String> {
    let mut path = String::new();
    match geometry.kind.as_str() {
        "Polygon" => {
            for ring in geometry.coordinates.as_array()? {
                push_ring(ring, &mut path);
            }
        }
        "MultiPolygon" => {
            for polygon in geometry.coordinates.as_array()? {
                for ring in polygon.as_array()? {
                    push_ring(ring, &mut path);
                }
            }
        }
        _ => return None,
    }
    (!path.is_empty()).then(|| path.trim_end().to_string())
}

/// Marker position for a point geometry.
pub(crate) fn point_position(geometry: &Geometry) -> Option<(f64, f64)> {
    if !geometry.is_point() {
        return None;
    }
    let pair = geometry.coordinates.as_array()?;
    let lon = pair.first().and_then(Value::as_f64)?;
    let lat = pair.get(1).and_then(Value::as_f64)?;
    Some(project(lon, lat))
}

/// Apply one transition's effects to the view's paint state and forward the
/// selection hand-off.
pub(crate) fn apply_effects(
    effects: Effects,
    overrides: RwSignal<HashMap<String, StyleProps>>,
    raised: RwSignal<Option<String>>,
    selected: RwSignal<Option<SelectionEvent>>,
) {
    for restyle in effects.restyle {
        match restyle.paint {
            Paint::Raise => raised.set(Some(restyle.id.clone())),
            Paint::Lower => raised.update(|current| {
                if current.as_deref() == Some(restyle.id.as_str()) {
                    *current = None;
                }
            }),
        }
        overrides.update(|map| {
            map.insert(restyle.id, restyle.style);
        });
    }
    if let Some(selection) = effects.selection {
        selected.set(Some(selection));
    }
}

/// SVG rendering of the fused collection with per-feature interaction hooks.
#[component]
pub(crate) fn MapView() -> impl IntoView {
    let features: RwSignal<Vec<MapFeature>> = expect_context();
    let Interaction(interaction) = expect_context();
    let StyleOverrides(overrides) = expect_context();
    let RaisedFeature(raised) = expect_context();
    let Selected(selected) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    // Document order is paint order in SVG; the raised feature goes last.
    let ordered = Memo::new(move |_| {
        let mut list = features.get();
        if let Some(raised_id) = raised.get()
            && let Some(position) = list.iter().position(|f| f.id == raised_id)
        {
            let feature = list.remove(position);
            list.push(feature);
        }
        list
    });

    view! {
        <svg
            viewBox=format!("0 0 {VIEW_W} {VIEW_H}")
            style="width: 100%; height: auto; background: #dbeafe; border-radius: 8px;"
            on:pointermove=move |ev: web_sys::PointerEvent| {
                let position = (ev.client_x() as f64, ev.client_y() as f64);
                mouse_pos.set(position);
                interaction.update(|state| state.track_pointer(position.0, position.1));
            }
        >
            <For
                each=move || ordered.get()
                key=|feature| feature.id.clone()
                children=move |feature: MapFeature| {
                    feature_view(feature, interaction, overrides, raised, selected)
                }
            />
        </svg>
    }
}

fn feature_view(
    feature: MapFeature,
    interaction: RwSignal<crate::interact::InteractionState>,
    overrides: RwSignal<HashMap<String, StyleProps>>,
    raised: RwSignal<Option<String>>,
    selected: RwSignal<Option<SelectionEvent>>,
) -> impl IntoView {
    let id = feature.id.clone();
    let base = style_for(&feature);
    let style = move || {
        overrides
            .with(|map| map.get(&id).cloned())
            .unwrap_or_else(|| base.clone())
    };

    let enter_feature = feature.clone();
    let on_enter = move |_: web_sys::PointerEvent| {
        let effects = interaction
            .try_update(|state| state.apply(PointerEvent::Enter, &enter_feature))
            .unwrap_or_default();
        apply_effects(effects, overrides, raised, selected);
    };
    let leave_feature = feature.clone();
    let on_leave = move |_: web_sys::PointerEvent| {
        let effects = interaction
            .try_update(|state| state.apply(PointerEvent::Leave, &leave_feature))
            .unwrap_or_default();
        apply_effects(effects, overrides, raised, selected);
    };
    let click_feature = feature.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let effects = interaction
            .try_update(|state| state.apply(PointerEvent::Click, &click_feature))
            .unwrap_or_default();
        apply_effects(effects, overrides, raised, selected);
    };

    if let Some(path) = svg_path(&feature.geometry) {
        let fill = style.clone();
        let fill_opacity = style.clone();
        let stroke = style.clone();
        let stroke_weight = style.clone();
        view! {
            <path
                d=path
                fill=move || fill().fill_css()
                fill-opacity=move || fill_opacity().fill_opacity.to_string()
                stroke=move || stroke().stroke_css()
                stroke-width=move || stroke_weight().stroke_weight.to_string()
                stroke-dasharray=move || style().dash.map(str::to_string)
                on:pointerenter=on_enter
                on:pointerleave=on_leave
                on:click=on_click
            />
        }
        .into_any()
    } else if let Some((x, y)) = point_position(&feature.geometry) {
        let fill = style.clone();
        let fill_opacity = style.clone();
        let stroke = style.clone();
        view! {
            <circle
                cx=format!("{x:.1}")
                cy=format!("{y:.1}")
                r="8"
                fill=move || fill().fill_css()
                fill-opacity=move || fill_opacity().fill_opacity.to_string()
                stroke=move || stroke().stroke_css()
                stroke-width=move || style().stroke_weight.to_string()
                on:pointerenter=on_enter
                on:pointerleave=on_leave
                on:click=on_click
            />
        }
        .into_any()
    } else {
        // Unrecognized geometry kind with no usable coordinates.
        view! { <g /> }.into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::{point_position, project, svg_path, VIEW_H, VIEW_W};
    use emokarta_shared::Geometry;

    #[test]
    fn project_maps_corners_to_viewbox() {
        assert_eq!(project(20.0, 77.0), (0.0, 0.0));
        assert_eq!(project(190.0, 35.0), (VIEW_W, VIEW_H));
    }

    #[test]
    fn polygon_path_is_closed() {
        let geometry = Geometry {
            kind: "Polygon".to_string(),
            coordinates: serde_json::json!([[[20.0, 77.0], [190.0, 77.0], [190.0, 35.0]]]),
        };
        let path = svg_path(&geometry).unwrap();
        assert!(path.starts_with("M0.0 0.0"));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('L').count(), 2);
    }

    #[test]
    fn multipolygon_concatenates_rings() {
        let ring = serde_json::json!([[20.0, 77.0], [30.0, 77.0], [30.0, 70.0]]);
        let geometry = Geometry {
            kind: "MultiPolygon".to_string(),
            coordinates: serde_json::json!([[ring], [ring]]),
        };
        let path = svg_path(&geometry).unwrap();
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('Z').count(), 2);
    }

    #[test]
    fn point_geometry_has_no_path_but_a_position() {
        let geometry = Geometry::point(37.6173, 55.7558);
        assert!(svg_path(&geometry).is_none());
        assert!(point_position(&geometry).is_some());
    }

    #[test]
    fn malformed_coordinates_yield_nothing() {
        let geometry = Geometry {
            kind: "Polygon".to_string(),
            coordinates: serde_json::json!("not coordinates"),
        };
        assert!(svg_path(&geometry).is_none());
    }
}
