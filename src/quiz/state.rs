//! Session state for one player
//!
//! Everything the screens render lives here. The RNG is seeded from the run
//! seed so a session replays identically given the same intents and timers.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::answer::Answer;
use super::operation::Operation;
use super::problem::{ChoiceSet, Problem, generate};
use crate::consts::*;
use crate::settings::AccessibilitySettings;

/// Which screen the player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Operation picker
    Menu,
    /// Answering problems
    Playing,
    /// Accessibility toggles
    Settings,
    /// Out of tries
    GameOver,
}

/// Mutable state of a quiz session
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub operation: Option<Operation>,
    pub problem: Option<Problem>,
    /// Only `Some` while playing
    pub choices: Option<ChoiceSet>,
    pub score: u32,
    pub tries_left: u8,
    /// Seconds left on the current problem
    pub time_left: u8,
    /// Answer being shown as feedback
    pub selected_answer: Option<Answer>,
    pub answered_correctly: Option<bool>,
    /// Countdown is allowed to run for the current problem
    pub timer_running: bool,
    /// Bumped on every phase change, new problem and submission; timers
    /// armed under an older epoch are ignored
    pub epoch: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl GameSession {
    /// Create a session on the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            operation: None,
            problem: None,
            choices: None,
            score: 0,
            tries_left: STARTING_TRIES,
            time_left: ROUND_SECONDS,
            selected_answer: None,
            answered_correctly: None,
            timer_running: false,
            epoch: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Invalidate every timer armed so far
    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Switch screens, invalidating pending timers
    pub fn enter(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.bump_epoch();
    }

    /// Fresh score/tries/clock for a new game with `operation`
    pub fn start(&mut self, operation: Operation) {
        self.operation = Some(operation);
        self.score = 0;
        self.tries_left = STARTING_TRIES;
        self.time_left = ROUND_SECONDS;
        self.selected_answer = None;
        self.answered_correctly = None;
        self.timer_running = false;
        self.enter(GamePhase::Playing);
    }

    /// Pose the next problem and restart the clock.
    ///
    /// Returns `false` (leaving state untouched) when not playing or no
    /// operation has been chosen.
    pub fn next_problem(&mut self) -> bool {
        let Some(operation) = self.operation else {
            log::debug!("next_problem ignored: no operation selected");
            return false;
        };
        if self.phase != GamePhase::Playing {
            log::debug!("next_problem ignored in {:?}", self.phase);
            return false;
        }

        let (problem, choices) = generate(operation, &mut self.rng);
        self.pose(problem, choices);
        true
    }

    /// Put a specific problem on screen and restart the clock
    pub fn pose(&mut self, problem: Problem, choices: ChoiceSet) {
        self.problem = Some(problem);
        self.choices = Some(choices);
        self.time_left = ROUND_SECONDS;
        self.selected_answer = None;
        self.answered_correctly = None;
        self.timer_running = true;
        self.bump_epoch();
    }

    /// Out of tries
    pub fn end(&mut self) {
        self.tries_left = 0;
        self.timer_running = false;
        self.problem = None;
        self.choices = None;
        self.selected_answer = None;
        self.answered_correctly = None;
        self.enter(GamePhase::GameOver);
        log::info!("Game over with score {}", self.score);
    }

    /// Back to the menu with a clean slate. Seed and RNG stream carry on so
    /// the next game gets new problems.
    pub fn restart(&mut self) {
        self.operation = None;
        self.problem = None;
        self.choices = None;
        self.score = 0;
        self.tries_left = STARTING_TRIES;
        self.time_left = ROUND_SECONDS;
        self.selected_answer = None;
        self.answered_correctly = None;
        self.timer_running = false;
        self.enter(GamePhase::Menu);
    }

    /// An answer is on screen and the feedback pause has not ended
    pub fn feedback_pending(&self) -> bool {
        self.selected_answer.is_some()
    }

    /// The countdown should be ticking right now
    pub fn countdown_active(&self, settings: &AccessibilitySettings) -> bool {
        self.phase == GamePhase::Playing
            && self.problem.is_some()
            && !self.feedback_pending()
            && settings.show_timer
            && self.timer_running
    }

    /// Mutable access to the session RNG (for scripted rounds)
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_menu() {
        let s = GameSession::new(1);
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.tries_left, STARTING_TRIES);
        assert_eq!(s.time_left, ROUND_SECONDS);
        assert!(s.problem.is_none() && s.choices.is_none());
        assert!(!s.timer_running);
    }

    #[test]
    fn test_next_problem_needs_operation_and_playing() {
        let mut s = GameSession::new(1);
        let epoch = s.epoch;
        assert!(!s.next_problem());
        assert_eq!(s.epoch, epoch);

        s.operation = Some(Operation::Addition);
        assert!(!s.next_problem(), "still on the menu");
        assert!(s.problem.is_none());

        s.enter(GamePhase::Playing);
        assert!(s.next_problem());
        assert!(s.problem.is_some());
        assert!(s.timer_running);
    }

    #[test]
    fn test_countdown_gating() {
        let mut s = GameSession::new(5);
        let mut settings = AccessibilitySettings::default();
        s.start(Operation::Subtraction);
        s.next_problem();
        assert!(s.countdown_active(&settings));

        settings.show_timer = false;
        assert!(!s.countdown_active(&settings));
        settings.show_timer = true;

        s.selected_answer = Some(Answer::whole(1));
        assert!(!s.countdown_active(&settings));
        s.selected_answer = None;

        s.timer_running = false;
        assert!(!s.countdown_active(&settings));
    }

    #[test]
    fn test_restart_keeps_rng_stream() {
        let mut a = GameSession::new(77);
        a.start(Operation::Addition);
        a.next_problem();
        a.restart();
        assert_eq!(a.phase, GamePhase::Menu);
        assert!(a.problem.is_none());
        a.start(Operation::Addition);
        a.next_problem();

        // Same as drawing twice without a restart in between
        let mut b = GameSession::new(77);
        b.start(Operation::Addition);
        b.next_problem();
        b.next_problem();
        assert_eq!(a.problem, b.problem);
        assert_eq!(a.choices, b.choices);
    }

    #[test]
    fn test_snapshot_skips_rng() {
        let s = GameSession::new(3);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["phase"], "menu");
        assert!(json.get("rng").is_none());
    }
}
