//! Anchor-set assessment
//!
//! Data problems are reported, never raised: callers decide whether a
//! warning-laden deployment is acceptable. Only the conditions that make
//! positioning impossible are graded as errors.

use crate::core::{Anchor, RangedAnchor};
use std::collections::HashSet;
use std::fmt;

/// Conditions that prevent positioning outright
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two configured anchors share an id
    DuplicateAnchorId { id: String },
    /// Fewer usable anchors than the geometric minimum
    InsufficientAnchors { available: usize, required: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateAnchorId { id } => {
                write!(f, "duplicate anchor id '{}'", id)
            }
            ValidationError::InsufficientAnchors {
                available,
                required,
            } => {
                write!(
                    f,
                    "only {} anchors available, {} required",
                    available, required
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of an assessment pass
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// Minimum anchors for 2D positioning
const MIN_ANCHORS: usize = 3;

/// Anchors closer together than this reduce geometric strength (meters)
const MIN_ANCHOR_SPACING_M: f64 = 1.0;

/// Assess a configured anchor registry: duplicate ids are errors;
/// near-collinear layouts and tight spacing are warnings.
pub fn validate_anchor_set(anchors: &[Anchor]) -> ValidationResult {
    let mut result = ValidationResult::default();

    let mut seen: HashSet<&str> = HashSet::new();
    for anchor in anchors {
        if !seen.insert(anchor.id.as_str()) {
            result.errors.push(ValidationError::DuplicateAnchorId {
                id: anchor.id.clone(),
            });
        }
    }

    if anchors.len() < MIN_ANCHORS {
        result.errors.push(ValidationError::InsufficientAnchors {
            available: anchors.len(),
            required: MIN_ANCHORS,
        });
    }

    if anchors.len() >= MIN_ANCHORS && anchors_nearly_collinear(anchors) {
        result
            .warnings
            .push("anchors are nearly collinear, positioning accuracy will suffer".to_string());
        result
            .suggestions
            .push("spread anchors to form a triangle around the coverage area".to_string());
    }

    for i in 0..anchors.len() {
        for j in (i + 1)..anchors.len() {
            let spacing = anchors[i].position.distance(&anchors[j].position);
            if spacing < MIN_ANCHOR_SPACING_M {
                result.warnings.push(format!(
                    "anchors '{}' and '{}' are only {:.2} m apart",
                    anchors[i].id, anchors[j].id, spacing
                ));
            }
        }
    }

    result.finish()
}

/// Assess a ranged-anchor batch right before solving. Nonpositive reported
/// distances are a warning: the solver assumes positivity upstream and may
/// produce meaningless output if it is violated.
pub fn validate_ranged(ranged: &[RangedAnchor]) -> ValidationResult {
    let mut result = ValidationResult::default();

    if ranged.len() < MIN_ANCHORS {
        result.errors.push(ValidationError::InsufficientAnchors {
            available: ranged.len(),
            required: MIN_ANCHORS,
        });
    }

    for (index, anchor) in ranged.iter().enumerate() {
        if anchor.distance <= 0.0 {
            result.warnings.push(format!(
                "ranged anchor {} reports a nonpositive distance ({:.3} m)",
                index, anchor.distance
            ));
            result
                .suggestions
                .push("check the signal model calibration for this anchor".to_string());
        }
    }

    result.finish()
}

fn anchors_nearly_collinear(anchors: &[Anchor]) -> bool {
    // Largest triangle area over all pairs against the first anchor; tiny
    // area relative to span means the layout is close to a line
    let origin = anchors[0].position;
    let mut max_cross: f64 = 0.0;
    let mut max_span: f64 = 0.0;

    for i in 1..anchors.len() {
        let a = anchors[i].position - origin;
        max_span = max_span.max(a.dot(&a).sqrt());
        for j in (i + 1)..anchors.len() {
            let b = anchors[j].position - origin;
            max_cross = max_cross.max(a.cross(&b).abs());
        }
    }

    if max_span == 0.0 {
        return true;
    }
    max_cross / (max_span * max_span) < 1e-3
}
