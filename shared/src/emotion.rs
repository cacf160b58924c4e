use serde::{Deserialize, Serialize};

/// Per-region emotion intensities for one year, as produced by the
/// classification backend. Each component is conceptually in `[0, 1]` but the
/// payload is not validated and the four values are not assumed to sum to 1.
///
/// Every field carries `#[serde(default)]` so a stat entry missing one or
/// more components parses with those components at 0 instead of being
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionVector {
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub sadness: f64,
}

/// Which emotion wins the color branch for a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominant {
    /// Fear or sadness holds the maximum (red scale).
    Distress,
    /// Joy is the strict winner over fear/sadness (green scale).
    Joy,
    /// Neutral dominates, or everything is zero (flat gray).
    Neutral,
}

impl EmotionVector {
    /// Fallback vector for a region with no attached data: fully neutral.
    pub const fn neutral() -> Self {
        Self {
            fear: 0.0,
            joy: 0.0,
            neutral: 1.0,
            sadness: 0.0,
        }
    }

    /// Classify the dominant component. Ties resolve in a fixed precedence:
    /// fear/sadness beat joy, joy beats neutral. The distress-first order is
    /// deliberate — regions where fear or sadness merely ties joy still render
    /// on the red scale.
    pub fn dominant(&self) -> Dominant {
        let max = self
            .fear
            .max(self.joy)
            .max(self.neutral)
            .max(self.sadness);
        if max == self.fear || max == self.sadness {
            Dominant::Distress
        } else if max == self.joy {
            Dominant::Joy
        } else {
            Dominant::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dominant, EmotionVector};

    #[test]
    fn neutral_fallback_is_fully_neutral() {
        let v = EmotionVector::neutral();
        assert_eq!(v.dominant(), Dominant::Neutral);
        assert_eq!(v.neutral, 1.0);
        assert_eq!(v.fear + v.joy + v.sadness, 0.0);
    }

    #[test]
    fn fear_max_classifies_as_distress() {
        let v = EmotionVector {
            fear: 0.6,
            joy: 0.1,
            neutral: 0.2,
            sadness: 0.1,
        };
        assert_eq!(v.dominant(), Dominant::Distress);
    }

    #[test]
    fn strict_joy_max_classifies_as_joy() {
        let v = EmotionVector {
            fear: 0.1,
            joy: 0.7,
            neutral: 0.1,
            sadness: 0.1,
        };
        assert_eq!(v.dominant(), Dominant::Joy);
    }

    #[test]
    fn fear_sadness_tie_still_distress() {
        let v = EmotionVector {
            fear: 0.4,
            joy: 0.1,
            neutral: 0.1,
            sadness: 0.4,
        };
        assert_eq!(v.dominant(), Dominant::Distress);
    }

    #[test]
    fn fear_tying_joy_resolves_to_distress() {
        let v = EmotionVector {
            fear: 0.5,
            joy: 0.5,
            neutral: 0.0,
            sadness: 0.0,
        };
        assert_eq!(v.dominant(), Dominant::Distress);
    }

    #[test]
    fn joy_tying_neutral_resolves_to_joy() {
        let v = EmotionVector {
            fear: 0.0,
            joy: 0.5,
            neutral: 0.5,
            sadness: 0.0,
        };
        assert_eq!(v.dominant(), Dominant::Joy);
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let v: EmotionVector = serde_json::from_str(r#"{"joy": 0.9}"#).unwrap();
        assert_eq!(v.fear, 0.0);
        assert_eq!(v.joy, 0.9);
        assert_eq!(v.neutral, 0.0);
        assert_eq!(v.sadness, 0.0);
    }
}
