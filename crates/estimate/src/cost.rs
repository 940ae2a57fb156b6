//! The size/risk cost model.
//!
//! Board items carry two single-select labels, "Size" and "Risk", whose option
//! names include explanatory text (`"M (3–5 days)"`, `"High: significant
//! unknowns"`). Only the leading code matters: the text before the first `(`
//! for sizes and before the first `:` for risks, compared case-insensitively.
//!
//! [`STANDARD_COST_TABLE`] maps every (size, risk) pair to a fixed number of
//! days. The table is a dense array indexed by the two enums, so there is no
//! representable "missing entry".

use serde::{Deserialize, Serialize};

use crate::{Days, EvaluationError};

// ---------------------------------------------------------------------------
// Codes
// ---------------------------------------------------------------------------

/// Canonical item size, parsed from the "Size" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeCode {
    Xs,
    S,
    M,
    L,
    Xl,
}

impl SizeCode {
    /// Classifies a free-text size label.
    ///
    /// The key is the text before the first `(`, trimmed and upper-cased. An
    /// unknown key yields [`EvaluationError::InvalidSize`] carrying both the
    /// original label and the derived key.
    pub fn from_label(label: &str) -> Result<Self, EvaluationError> {
        let key = label_key(label, '(');
        match key.as_str() {
            "XS" => Ok(Self::Xs),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::Xl),
            _ => Err(EvaluationError::InvalidSize {
                label: label.to_string(),
                key,
            }),
        }
    }

    /// Returns the canonical upper-case code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for SizeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// Canonical delivery risk, parsed from the "Risk" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCode {
    Low,
    Mid,
    High,
    Severe,
}

impl RiskCode {
    /// Classifies a free-text risk label.
    ///
    /// The key is the text before the first `:`, trimmed and upper-cased.
    pub fn from_label(label: &str) -> Result<Self, EvaluationError> {
        let key = label_key(label, ':');
        match key.as_str() {
            "LOW" => Ok(Self::Low),
            "MID" => Ok(Self::Mid),
            "HIGH" => Ok(Self::High),
            "SEVERE" => Ok(Self::Severe),
            _ => Err(EvaluationError::InvalidRisk {
                label: label.to_string(),
                key,
            }),
        }
    }

    /// Returns the canonical upper-case code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Mid => "MID",
            Self::High => "HIGH",
            Self::Severe => "SEVERE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RiskCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn label_key(label: &str, delimiter: char) -> String {
    label
        .split(delimiter)
        .next()
        .unwrap_or_default()
        .trim()
        .to_uppercase()
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Immutable (size, risk) → days table.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    // Rows are indexed by `SizeCode`, columns by `RiskCode`, both in declaration order.
    days: [[f64; 4]; 5],
}

/// The fixed table used by every run.
pub const STANDARD_COST_TABLE: CostTable = CostTable {
    days: [
        //  LOW   MID   HIGH  SEVERE
        [0.5, 1.0, 1.5, 4.0],     // XS
        [2.0, 3.0, 4.5, 12.0],    // S
        [4.0, 5.0, 7.5, 20.0],    // M
        [7.5, 10.0, 15.0, 40.0],  // L
        [15.0, 20.0, 30.0, 80.0], // XL
    ],
};

impl CostTable {
    /// Returns the table constant for an already-classified pair.
    pub fn days_for(&self, size: SizeCode, risk: RiskCode) -> Days {
        Days::from_table(self.days[size.index()][risk.index()])
    }

    /// Classifies both labels and returns the table constant for the pair.
    ///
    /// Size is classified first; a risk label is only inspected once the size
    /// is known to be valid. The returned value is the exact constant, with no
    /// rounding applied.
    pub fn lookup(&self, size_label: &str, risk_label: &str) -> Result<Days, EvaluationError> {
        let size = SizeCode::from_label(size_label)?;
        let risk = RiskCode::from_label(risk_label)?;
        Ok(self.days_for(size, risk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_returns_documented_constants() {
        let table = STANDARD_COST_TABLE;

        assert_eq!(
            table.lookup("XS (≤1 day)", "Low: well-understood").map(Days::as_f64),
            Ok(0.5)
        );
        assert_eq!(
            table.lookup("L (large)", "Severe: high uncertainty").map(Days::as_f64),
            Ok(40.0)
        );
        assert_eq!(
            table.lookup("M (3–5 days)", "High: significant unknowns").map(Days::as_f64),
            Ok(7.5)
        );
        assert_eq!(table.lookup("XL", "Low").map(Days::as_f64), Ok(15.0));
        assert_eq!(table.lookup("XL (huge)", "Severe: ???").map(Days::as_f64), Ok(80.0));
    }

    #[test]
    fn test_every_pair_maps_to_its_table_constant() {
        let cases = [
            ("XS (≤1 day)", "Low: well-understood", 0.5),
            ("XS (≤1 day)", "Mid: some unknowns", 1.0),
            ("XS (≤1 day)", "High: significant unknowns", 1.5),
            ("XS (≤1 day)", "Severe: high uncertainty", 4.0),
            ("S (small)", "Low: well-understood", 2.0),
            ("S (small)", "Mid: some unknowns", 3.0),
            ("S (small)", "High: significant unknowns", 4.5),
            ("S (small)", "Severe: high uncertainty", 12.0),
            ("M (3–5 days)", "Low: well-understood", 4.0),
            ("M (3–5 days)", "Mid: some unknowns", 5.0),
            ("M (3–5 days)", "High: significant unknowns", 7.5),
            ("M (3–5 days)", "Severe: high uncertainty", 20.0),
            ("L (large)", "Low: well-understood", 7.5),
            ("L (large)", "Mid: some unknowns", 10.0),
            ("L (large)", "High: significant unknowns", 15.0),
            ("L (large)", "Severe: high uncertainty", 40.0),
            ("XL (huge)", "Low: well-understood", 15.0),
            ("XL (huge)", "Mid: some unknowns", 20.0),
            ("XL (huge)", "High: significant unknowns", 30.0),
            ("XL (huge)", "Severe: high uncertainty", 80.0),
        ];

        for (size, risk, expected) in cases {
            assert_eq!(
                STANDARD_COST_TABLE.lookup(size, risk).map(Days::as_f64),
                Ok(expected),
                "{size} / {risk}"
            );
        }
    }

    #[test]
    fn test_classification_ignores_case_and_trailing_text() {
        assert_eq!(SizeCode::from_label("xs(whatever)"), Ok(SizeCode::Xs));
        assert_eq!(SizeCode::from_label("XS (1 day)"), Ok(SizeCode::Xs));
        assert_eq!(SizeCode::from_label("  xl  "), Ok(SizeCode::Xl));
        assert_eq!(RiskCode::from_label("mid: some unknowns"), Ok(RiskCode::Mid));
        assert_eq!(RiskCode::from_label("SEVERE"), Ok(RiskCode::Severe));
    }

    #[test]
    fn test_invalid_size_reports_label_and_key() {
        let err = STANDARD_COST_TABLE
            .lookup("Tiny (under an hour)", "Low")
            .unwrap_err();

        assert_eq!(
            err,
            EvaluationError::InvalidSize {
                label: "Tiny (under an hour)".to_string(),
                key: "TINY".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("Tiny (under an hour)"));
        assert!(message.contains("TINY"));
    }

    #[test]
    fn test_invalid_risk_reports_label_and_key() {
        let err = STANDARD_COST_TABLE.lookup("S", "Medium: meh").unwrap_err();

        assert_eq!(
            err,
            EvaluationError::InvalidRisk {
                label: "Medium: meh".to_string(),
                key: "MEDIUM".to_string(),
            }
        );
    }

    #[test]
    fn test_size_is_checked_before_risk() {
        let err = STANDARD_COST_TABLE.lookup("Weird", "Also weird").unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidSize { .. }));
    }

    #[test]
    fn test_empty_label_is_invalid() {
        assert!(matches!(
            SizeCode::from_label(""),
            Err(EvaluationError::InvalidSize { ref key, .. }) if key.is_empty()
        ));
    }
}
