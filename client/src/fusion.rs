use std::collections::HashMap;

use emokarta_shared::{
    EmotionVector, FeatureCollection, Geometry, MapFeature, RegionStat, SourceCollection,
};

/// Anchor of the synthetic fallback grid, roughly Moscow. The grid carries no
/// geographic meaning — it only guarantees distinct, deterministic placeholder
/// positions when the real geometry file is unavailable.
const FALLBACK_ORIGIN: (f64, f64) = (37.6173, 55.7558);
const FALLBACK_SPACING_DEG: f64 = 2.0;
const FALLBACK_GRID_COLS: usize = 10;

/// Merge the geometry collection with per-region statistics into one
/// renderable collection.
///
/// With geometry available, output order follows the geometry file and every
/// geometry feature is emitted — regions without a matching stat render
/// neutral rather than disappearing. Stats with no matching geometry are
/// dropped on this path (the original behavior, kept for compatibility).
/// Without geometry, one placeholder point is synthesized per stat, in stat
/// order. Fusion never fails; malformed entries degrade to defaults.
pub fn fuse(base: Option<&SourceCollection>, stats: &[RegionStat]) -> FeatureCollection {
    match base {
        Some(collection) => fuse_with_geometry(collection, stats),
        None => synthesize_from_stats(stats),
    }
}

fn fuse_with_geometry(collection: &SourceCollection, stats: &[RegionStat]) -> FeatureCollection {
    // Exact-name lookup, no case folding. First occurrence wins on duplicate
    // stat names, matching a linear find over the list.
    let mut by_name: HashMap<&str, &RegionStat> = HashMap::with_capacity(stats.len());
    for stat in stats {
        by_name.entry(stat.name.as_str()).or_insert(stat);
    }

    collection
        .features
        .iter()
        .map(|source| {
            let name = source.properties.name.clone().unwrap_or_default();
            let stat = by_name.get(name.as_str()).copied();
            let emotions = stat
                .and_then(|s| s.emotions)
                .unwrap_or_else(EmotionVector::neutral);
            let diary_count = stat.map_or(0, |s| s.diary_count);
            let id = source.id.clone().unwrap_or_else(|| name.clone());
            MapFeature {
                id,
                name,
                geometry: source.geometry.clone(),
                emotions,
                diary_count,
            }
        })
        .collect()
}

fn synthesize_from_stats(stats: &[RegionStat]) -> FeatureCollection {
    stats
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            let id = stat
                .geo_id
                .clone()
                .unwrap_or_else(|| format!("region-{index}"));
            MapFeature {
                id,
                name: stat.name.clone(),
                geometry: Geometry::point(
                    FALLBACK_ORIGIN.0 + (index % FALLBACK_GRID_COLS) as f64 * FALLBACK_SPACING_DEG,
                    FALLBACK_ORIGIN.1 + (index / FALLBACK_GRID_COLS) as f64 * FALLBACK_SPACING_DEG,
                ),
                emotions: stat.emotions.unwrap_or_else(EmotionVector::neutral),
                diary_count: stat.diary_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fuse;
    use emokarta_shared::{
        EmotionVector, Geometry, RegionStat, SourceCollection, SourceFeature, SourceProperties,
    };

    fn polygon_feature(id: Option<&str>, name: Option<&str>) -> SourceFeature {
        SourceFeature {
            id: id.map(str::to_string),
            properties: SourceProperties {
                name: name.map(str::to_string),
            },
            geometry: Geometry {
                kind: "Polygon".to_string(),
                coordinates: serde_json::json!([[[37.0, 55.0], [38.0, 55.0], [37.5, 56.0]]]),
            },
        }
    }

    fn collection(features: Vec<SourceFeature>) -> SourceCollection {
        SourceCollection {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    fn moscow_stat() -> RegionStat {
        RegionStat {
            name: "Москва".to_string(),
            geo_id: Some("RU-MOW".to_string()),
            emotions: Some(EmotionVector {
                fear: 0.6,
                joy: 0.1,
                neutral: 0.2,
                sadness: 0.1,
            }),
            diary_count: 14,
        }
    }

    #[test]
    fn matched_geometry_attaches_stat_unchanged() {
        let base = collection(vec![polygon_feature(Some("RU-MOW"), Some("Москва"))]);
        let stats = vec![moscow_stat()];

        let fused = fuse(Some(&base), &stats);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].id, "RU-MOW");
        assert_eq!(fused[0].name, "Москва");
        assert_eq!(fused[0].emotions, stats[0].emotions.unwrap());
        assert_eq!(fused[0].diary_count, 14);
    }

    #[test]
    fn unmatched_geometry_is_emitted_neutral() {
        let base = collection(vec![
            polygon_feature(None, Some("Москва")),
            polygon_feature(None, Some("Сибирь")),
        ]);
        let stats = vec![moscow_stat()];

        let fused = fuse(Some(&base), &stats);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[1].name, "Сибирь");
        assert_eq!(fused[1].emotions, EmotionVector::neutral());
        assert_eq!(fused[1].diary_count, 0);
    }

    #[test]
    fn stat_without_geometry_is_dropped_on_base_path() {
        let base = collection(vec![polygon_feature(None, Some("Москва"))]);
        let mut stats = vec![moscow_stat()];
        stats.push(RegionStat {
            name: "Атлантида".to_string(),
            geo_id: None,
            emotions: None,
            diary_count: 7,
        });

        let fused = fuse(Some(&base), &stats);
        assert_eq!(fused.len(), 1);
        assert!(fused.iter().all(|f| f.name != "Атлантида"));
    }

    #[test]
    fn base_path_preserves_geometry_order() {
        let base = collection(vec![
            polygon_feature(None, Some("Б")),
            polygon_feature(None, Some("А")),
            polygon_feature(None, Some("В")),
        ]);
        let fused = fuse(Some(&base), &[]);
        let names: Vec<&str> = fused.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Б", "А", "В"]);
    }

    #[test]
    fn stat_with_missing_emotions_gets_neutral_default() {
        let base = collection(vec![polygon_feature(None, Some("Киев"))]);
        let stats = vec![RegionStat {
            name: "Киев".to_string(),
            geo_id: None,
            emotions: None,
            diary_count: 5,
        }];

        let fused = fuse(Some(&base), &stats);
        assert_eq!(fused[0].emotions, EmotionVector::neutral());
        assert_eq!(fused[0].diary_count, 5);
    }

    #[test]
    fn geometry_without_id_falls_back_to_name() {
        let base = collection(vec![polygon_feature(None, Some("Киев"))]);
        let fused = fuse(Some(&base), &[]);
        assert_eq!(fused[0].id, "Киев");
    }

    #[test]
    fn fallback_synthesizes_one_point_per_stat_in_order() {
        let stats = vec![
            moscow_stat(),
            RegionStat {
                name: "Киев".to_string(),
                geo_id: None,
                emotions: None,
                diary_count: 0,
            },
        ];

        let fused = fuse(None, &stats);
        assert_eq!(fused.len(), 2);
        assert!(fused.iter().all(|f| f.geometry.is_point()));
        assert_eq!(fused[0].id, "RU-MOW");
        assert_eq!(fused[1].id, "region-1");
        assert_eq!(fused[0].name, "Москва");
        assert_eq!(fused[1].emotions, EmotionVector::neutral());
    }

    #[test]
    fn fallback_grid_positions_never_collide() {
        let stats: Vec<RegionStat> = (0..25)
            .map(|i| RegionStat {
                name: format!("регион {i}"),
                geo_id: None,
                emotions: None,
                diary_count: 0,
            })
            .collect();

        let fused = fuse(None, &stats);
        let mut seen = std::collections::HashSet::new();
        for feature in &fused {
            let coords = feature.geometry.coordinates.to_string();
            assert!(seen.insert(coords), "duplicate fallback coordinate");
        }
    }

    #[test]
    fn empty_stats_without_geometry_yields_empty_collection() {
        assert!(fuse(None, &[]).is_empty());
    }

    #[test]
    fn fusion_is_idempotent() {
        let base = collection(vec![
            polygon_feature(Some("RU-MOW"), Some("Москва")),
            polygon_feature(None, None),
        ]);
        let stats = vec![moscow_stat()];

        assert_eq!(fuse(Some(&base), &stats), fuse(Some(&base), &stats));
        assert_eq!(fuse(None, &stats), fuse(None, &stats));
    }

    #[test]
    fn duplicate_stat_names_match_first_occurrence() {
        let base = collection(vec![polygon_feature(None, Some("Москва"))]);
        let stats = vec![
            moscow_stat(),
            RegionStat {
                diary_count: 99,
                ..moscow_stat()
            },
        ];

        let fused = fuse(Some(&base), &stats);
        assert_eq!(fused[0].diary_count, 14);
    }
}
