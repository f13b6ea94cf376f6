//! Arithmetic operations offered on the menu

use serde::{Deserialize, Serialize};

use super::answer::Answer;

/// One of the four quiz operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Menu order
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Identifier used in actions and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "addition" | "add" | "+" => Some(Operation::Addition),
            "subtraction" | "sub" | "-" => Some(Operation::Subtraction),
            "multiplication" | "mul" | "×" | "x" | "*" => Some(Operation::Multiplication),
            "division" | "div" | "÷" | "/" => Some(Operation::Division),
            _ => None,
        }
    }

    /// Button label on the menu
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division => "Division",
        }
    }

    /// Operator glyph shown in the problem text
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Apply the operation. Only division by zero has no answer.
    pub fn apply(&self, a: i32, b: i32) -> Option<Answer> {
        match self {
            Operation::Addition => Some(Answer::whole(a + b)),
            Operation::Subtraction => Some(Answer::whole(a - b)),
            Operation::Multiplication => Some(Answer::whole(a * b)),
            Operation::Division => Answer::ratio(a, b),
        }
    }
}
