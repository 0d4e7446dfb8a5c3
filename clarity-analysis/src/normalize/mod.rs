//! Likert normalization.
//!
//! One canonical scale rule for the whole engine: detectors and gates that
//! reason in adjusted 1–5 units convert via [`score_to_adjusted`] instead of
//! carrying their own thresholds on a second scale.

use serde::Serialize;

use clarity_core::errors::NormalizeError;

/// A normalized Likert answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedScore {
    /// The raw 1–5 value as recorded.
    pub raw: u8,
    /// After reverse-scoring: `6 - raw` for reverse questions.
    pub adjusted: u8,
    /// 0–100 scale: `(adjusted - 1) * 25`.
    pub score: f64,
    pub is_reverse: bool,
}

/// Normalize a raw Likert value.
///
/// Accepts `f64` so out-of-domain inputs (0, 6, 3.5) from loosely typed
/// upstream payloads fail here, once, with [`NormalizeError::InvalidLikertValue`].
pub fn normalize(
    question_id: &str,
    raw: f64,
    is_reverse: bool,
) -> Result<NormalizedScore, NormalizeError> {
    if raw.fract() != 0.0 || !(1.0..=5.0).contains(&raw) {
        return Err(NormalizeError::InvalidLikertValue {
            question_id: question_id.to_string(),
            value: raw as u8,
        });
    }
    let raw = raw as u8;
    let adjusted = if is_reverse { 6 - raw } else { raw };
    Ok(NormalizedScore {
        raw,
        adjusted,
        score: f64::from(adjusted - 1) * 25.0,
        is_reverse,
    })
}

/// Arithmetic mean, or `None` for an empty list.
///
/// Never 0, never NaN: "no data" must stay distinguishable from "scored 0"
/// all the way up the aggregation chain.
pub fn mean_of(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Convert a 0–100 score back to the adjusted 1–5 scale.
pub fn score_to_adjusted(score: f64) -> f64 {
    score / 25.0 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_scoring_maps_linearly() {
        for raw in 1..=5u8 {
            let n = normalize("q", f64::from(raw), false).unwrap();
            assert_eq!(n.adjusted, raw);
            assert_eq!(n.score, f64::from(raw - 1) * 25.0);
        }
    }

    #[test]
    fn reverse_scoring_mirrors_the_scale() {
        for raw in 1..=5u8 {
            let n = normalize("q", f64::from(raw), true).unwrap();
            assert_eq!(n.adjusted, 6 - raw);
            assert_eq!(n.score, f64::from(5 - raw) * 25.0);
        }
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        for raw in [0.0, 6.0, 3.5, -1.0, f64::NAN] {
            assert!(normalize("q", raw, false).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean_of(&[]), None);
        assert_eq!(mean_of(&[50.0, 100.0]), Some(75.0));
    }

    #[test]
    fn score_round_trips_to_adjusted() {
        for raw in 1..=5u8 {
            let n = normalize("q", f64::from(raw), false).unwrap();
            assert_eq!(score_to_adjusted(n.score), f64::from(n.adjusted));
        }
    }
}
