use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emotion::EmotionVector;

/// Geometry payload of a GeoJSON feature. Coordinates stay opaque — the
/// engine never walks polygon rings itself, it only forwards them to the map
/// widget for painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

impl Geometry {
    /// Synthetic placeholder point used when no real geometry is available.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: Value::from(vec![lon, lat]),
        }
    }

    pub fn is_point(&self) -> bool {
        self.kind == "Point"
    }
}

/// Properties of an incoming geometry feature. Only `name` matters for
/// fusion; everything else in the upstream file is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceProperties {
    #[serde(default)]
    pub name: Option<String>,
}

/// One feature of the externally fetched geometry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFeature {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: SourceProperties,
    pub geometry: Geometry,
}

/// The geometry file as fetched: `{"type": "FeatureCollection", "features": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<SourceFeature>,
}

/// A fused, renderable feature: geometry plus the region's attached emotion
/// data. Built once per (year, geometry-source) pair and never mutated
/// afterwards — `emotions` and `diary_count` are always present, defaults
/// applied during fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    pub id: String,
    pub name: String,
    pub geometry: Geometry,
    pub emotions: EmotionVector,
    pub diary_count: u32,
}

/// Ordered fused features for one render pass. Replaced wholesale on year
/// change or geometry-source resolution, never patched in place.
pub type FeatureCollection = Vec<MapFeature>;
