//! Accessibility formatting
//!
//! Dyslexia mode is approximated by upper-casing; the real font swap is up to
//! the renderer.

use std::fmt::Display;

use serde::Serialize;

use crate::consts::MAX_VISUAL_AID;
use crate::quiz::Problem;
use crate::settings::AccessibilitySettings;

/// Text as it should be displayed under the current settings
pub fn format_text(settings: &AccessibilitySettings, text: &str) -> String {
    if settings.dyslexic_font {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

/// Stringify a value, then format it like text
pub fn format_value(settings: &AccessibilitySettings, value: impl Display) -> String {
    format_text(settings, &value.to_string())
}

/// Number of tally markers drawn for a value (clamped to `0..=MAX_VISUAL_AID`)
pub fn visual_aid_markers(value: i32) -> usize {
    value.clamp(0, MAX_VISUAL_AID) as usize
}

/// Tally markers for both operands of a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualAid {
    pub left: usize,
    pub symbol: &'static str,
    pub right: usize,
}

impl VisualAid {
    pub fn for_problem(problem: &Problem) -> Self {
        Self {
            left: visual_aid_markers(problem.operand_a),
            symbol: problem.operation.symbol(),
            right: visual_aid_markers(problem.operand_b),
        }
    }
}
