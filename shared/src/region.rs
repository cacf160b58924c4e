use serde::{Deserialize, Serialize};

use crate::emotion::EmotionVector;

/// One region's aggregated statistics for the selected year, as delivered by
/// the `/api/map/{year}` endpoint. `emotions` may be absent for regions the
/// classifier produced nothing for; fusion substitutes the neutral vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub name: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_id: Option<String>,
    #[serde(default)]
    pub emotions: Option<EmotionVector>,
    #[serde(default)]
    pub diary_count: u32,
}

/// Full map payload for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    pub year: i32,
    #[serde(default)]
    pub regions: Vec<RegionStat>,
}

/// A single diary excerpt shown in the region detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub text: String,
    pub author: String,
    pub date: String,
    pub url: String,
}

impl DiaryEntry {
    /// Entry dates arrive as `YYYY-MM-DD` strings; parse leniently so one
    /// malformed date degrades to "undated" instead of breaking the panel.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Population statistics attached to a region detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub change_percent: f64,
    pub year: i32,
}

/// Detailed response for one (year, region) pair from
/// `/api/region/{year}/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDetail {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub emotions: EmotionVector,
    #[serde(default)]
    pub diary_entries: Vec<DiaryEntry>,
    pub stats: PopulationStats,
}

#[cfg(test)]
mod tests {
    use super::{MapPayload, RegionStat};

    #[test]
    fn map_payload_parses_backend_shape() {
        let json = r#"{
            "year": 1941,
            "regions": [
                {
                    "name": "Москва",
                    "geo_id": "RU-MOW",
                    "emotions": {"fear": 0.6, "joy": 0.1, "neutral": 0.2, "sadness": 0.1},
                    "diary_count": 14
                },
                {"name": "Киев"}
            ]
        }"#;
        let payload: MapPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.year, 1941);
        assert_eq!(payload.regions.len(), 2);
        assert_eq!(payload.regions[0].diary_count, 14);
        assert_eq!(payload.regions[0].geo_id.as_deref(), Some("RU-MOW"));

        let bare = &payload.regions[1];
        assert_eq!(bare.name, "Киев");
        assert!(bare.emotions.is_none());
        assert_eq!(bare.diary_count, 0);
        assert!(bare.geo_id.is_none());
    }

    #[test]
    fn region_stat_roundtrips_through_json() {
        let stat = RegionStat {
            name: "Ленинград".to_string(),
            geo_id: None,
            emotions: None,
            diary_count: 3,
        };
        let json = serde_json::to_string(&stat).unwrap();
        assert!(!json.contains("geo_id"));
        let back: RegionStat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stat);
    }
}
