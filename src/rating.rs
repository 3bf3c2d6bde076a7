//! Rating normalization and aggregation.
//!
//! Questions use three heterogeneous response scales; reports compare them
//! on a common 0–10 axis. All transforms are linear, so they apply equally
//! to single ratings and to pre-averaged fractions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// 1–3 scale (e.g. poor / average / good).
    Scale3,
    /// 1–10 scale, already on the common axis. A clamped raw 0 is outside
    /// the documented domain but passes through unchanged rather than
    /// invalidating stored rows.
    Scale1To10,
    /// 0 = no, 1 = yes.
    YesNo,
}

impl QuestionKind {
    /// Parse a stored type tag. Unrecognized or missing tags fall back to
    /// the identity scale so legacy rows without a snapshot still aggregate.
    pub fn parse(s: &str) -> QuestionKind {
        match s {
            "scale_3" => QuestionKind::Scale3,
            "yes_no" => QuestionKind::YesNo,
            _ => QuestionKind::Scale1To10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Scale3 => "scale_3",
            QuestionKind::Scale1To10 => "scale_1_10",
            QuestionKind::YesNo => "yes_no",
        }
    }
}

/// Clamp a raw rating to the storable [0, 10] range.
pub fn clamp_rating(raw: f64) -> f64 {
    raw.clamp(0.0, 10.0)
}

/// Rescale a raw rating to the common 0–10 axis.
pub fn normalize(raw: f64, kind: QuestionKind) -> f64 {
    match kind {
        QuestionKind::YesNo => raw * 10.0,
        QuestionKind::Scale3 => (raw / 3.0) * 10.0,
        QuestionKind::Scale1To10 => raw,
    }
}

/// Mean of normalized ratings across one response's items.
/// Zero items means "no signal" and averages to 0.
pub fn response_average(items: &[(f64, QuestionKind)]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: f64 = items.iter().map(|&(raw, kind)| normalize(raw, kind)).sum();
    sum / items.len() as f64
}

/// Arithmetic mean of raw values; 0 when empty.
pub fn raw_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
