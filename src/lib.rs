//! Beck's Math Safari - an arithmetic quiz game for kids
//!
//! Core modules:
//! - `quiz`: Deterministic quiz core (problem generation, session state machine, timers)
//! - `game`: Driver that wires the quiz core to a scheduler and a speech adapter
//! - `settings`: Accessibility toggles
//! - `format`: Accessibility text formatting and visual aids
//! - `speech`: Text-to-speech side channel
//! - `ui`: View model plus HTML and terminal renderers

pub mod format;
pub mod game;
pub mod quiz;
pub mod settings;
pub mod speech;
pub mod ui;

pub use game::Game;
pub use settings::{AccessibilitySettings, SettingKey};

/// Game configuration constants
pub mod consts {
    use std::ops::RangeInclusive;
    use std::time::Duration;

    /// Tries granted at the start of every game
    pub const STARTING_TRIES: u8 = 3;
    /// Seconds on the clock for each problem
    pub const ROUND_SECONDS: u8 = 30;
    /// Points for a correct answer
    pub const POINTS_PER_CORRECT: u32 = 10;

    /// How long the answer feedback stays on screen before advancing
    pub const FEEDBACK_DELAY: Duration = Duration::from_secs(2);
    /// Countdown granularity
    pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

    /// Operands are drawn from this range (inclusive)
    pub const OPERAND_RANGE: RangeInclusive<i32> = 1..=10;
    /// Wrong choices are drawn from this range (inclusive)
    pub const DISTRACTOR_RANGE: RangeInclusive<i32> = 1..=20;
    /// Number of multiple-choice options
    pub const CHOICE_COUNT: usize = 4;

    /// Visual aids never draw more markers than this
    pub const MAX_VISUAL_AID: i32 = 20;
}
