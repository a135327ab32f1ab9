//! STI (short-term incentive) target models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A target bonus band, as a fraction of annual salary.
///
/// Serializes as `{"min": .., "max": ..}`. Deserializes from that map or
/// from a `[min, max]` pair, which is how the STI tables store it.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TargetRange;
///
/// let pair: TargetRange = serde_json::from_str("[0.1, 0.2]").unwrap();
/// let map: TargetRange = serde_json::from_str(r#"{"min": "0.1", "max": "0.2"}"#).unwrap();
/// assert_eq!(pair, map);
/// assert!(pair.is_configured());
/// assert!(!TargetRange::default().is_configured());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TargetRangeRepr")]
pub struct TargetRange {
    /// Lower bound of the band.
    pub min: Decimal,
    /// Upper bound of the band.
    pub max: Decimal,
}

/// The shapes a [`TargetRange`] is read from.
#[derive(Deserialize)]
#[serde(untagged)]
enum TargetRangeRepr {
    Pair(Decimal, Decimal),
    Bounds { min: Decimal, max: Decimal },
}

impl From<TargetRangeRepr> for TargetRange {
    fn from(repr: TargetRangeRepr) -> Self {
        match repr {
            TargetRangeRepr::Pair(min, max) | TargetRangeRepr::Bounds { min, max } => {
                Self { min, max }
            }
        }
    }
}

impl From<(Decimal, Decimal)> for TargetRange {
    fn from((min, max): (Decimal, Decimal)) -> Self {
        Self { min, max }
    }
}

impl TargetRange {
    /// Returns false for the `(0, 0)` range used when no target is configured.
    pub fn is_configured(&self) -> bool {
        !(self.min.is_zero() && self.max.is_zero())
    }
}

/// The outcome of checking an actual bonus against its target band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StiEvaluation {
    /// The job area looked up.
    pub area: String,
    /// The job level looked up.
    pub level: String,
    /// The target band, `(0, 0)` when none is configured.
    pub target: TargetRange,
    /// Whether a band exists for this area and level.
    pub target_configured: bool,
    /// Annual bonus divided by annual salary.
    pub actual_ratio: Decimal,
    /// Whether `actual_ratio` falls inside the band.
    pub in_band: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_target_range_reads_table_pairs() {
        let range: TargetRange = serde_json::from_str("[0.15, 0.3]").unwrap();

        assert_eq!(range, TargetRange::from((dec("0.15"), dec("0.3"))));
    }

    #[test]
    fn test_target_range_serializes_as_bounds() {
        let json = serde_json::to_string(&TargetRange::from((dec("0.15"), dec("0.3")))).unwrap();

        assert_eq!(json, r#"{"min":"0.15","max":"0.3"}"#);
    }

    #[test]
    fn test_sti_evaluation_reads_its_own_output() {
        let evaluation = StiEvaluation {
            area: "Sales".to_string(),
            level: "Manager".to_string(),
            target: TargetRange::from((dec("0.15"), dec("0.3"))),
            target_configured: true,
            actual_ratio: dec("0.2"),
            in_band: true,
        };

        let json = serde_json::to_string(&evaluation).unwrap();
        let restored: StiEvaluation = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, evaluation);
    }

    #[test]
    fn test_target_range_rejects_other_shapes() {
        assert!(serde_json::from_str::<TargetRange>("[0.1]").is_err());
        assert!(serde_json::from_str::<TargetRange>(r#"{"min": "0.1"}"#).is_err());
    }
}
