//! Session transitions
//!
//! `apply` is the whole state machine: it takes the session, the settings and
//! one event, mutates them, and returns the side effects (timers to arm, text
//! to speak) for the driver to carry out.

use std::time::Duration;

use super::answer::Answer;
use super::operation::Operation;
use super::scheduler::{TimerKind, TimerToken};
use super::state::{GamePhase, GameSession};
use crate::consts::*;
use crate::settings::{AccessibilitySettings, SettingKey};

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectOperation(Operation),
    OpenSettings,
    CloseSettings,
    SubmitAnswer(Answer),
    ToggleSetting(SettingKey),
    PlayAgain,
    /// Read the current problem aloud
    SpeakProblem,
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Intent(Intent),
    Timer(TimerToken),
}

impl From<Intent> for GameEvent {
    fn from(intent: Intent) -> Self {
        GameEvent::Intent(intent)
    }
}

impl From<TimerToken> for GameEvent {
    fn from(token: TimerToken) -> Self {
        GameEvent::Timer(token)
    }
}

/// Work for the driver after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop every armed timer
    CancelTimers,
    /// Arm a one-shot timer
    Schedule { delay: Duration, token: TimerToken },
    /// Hand text to the speech adapter
    Speak(String),
}

/// Advance the session by one event
pub fn apply(
    session: &mut GameSession,
    settings: &mut AccessibilitySettings,
    event: GameEvent,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    match event {
        GameEvent::Intent(intent) => handle_intent(session, settings, intent, &mut effects),
        GameEvent::Timer(token) => handle_timer(session, settings, token, &mut effects),
    }
    effects
}

fn handle_intent(
    session: &mut GameSession,
    settings: &mut AccessibilitySettings,
    intent: Intent,
    effects: &mut Vec<Effect>,
) {
    match (session.phase, intent) {
        (GamePhase::Menu, Intent::SelectOperation(op)) => {
            session.start(op);
            session.next_problem();
            effects.push(Effect::CancelTimers);
            log::info!("Started {} game (seed {})", op.as_str(), session.seed);
        }
        (GamePhase::Menu, Intent::OpenSettings) => {
            session.enter(GamePhase::Settings);
            effects.push(Effect::CancelTimers);
        }
        (GamePhase::Settings, Intent::CloseSettings) => {
            session.enter(GamePhase::Menu);
            effects.push(Effect::CancelTimers);
        }
        (GamePhase::Playing, Intent::SubmitAnswer(answer)) => {
            submit(session, answer, effects);
        }
        (_, Intent::ToggleSetting(key)) => {
            settings.toggle(key);
        }
        (GamePhase::GameOver, Intent::PlayAgain) => {
            session.restart();
            effects.push(Effect::CancelTimers);
        }
        (GamePhase::Playing, Intent::SpeakProblem) => {
            match &session.problem {
                Some(problem) if settings.text_to_speech => {
                    effects.push(Effect::Speak(problem.display_text.clone()));
                }
                _ => log::debug!("SpeakProblem ignored (text-to-speech off)"),
            }
        }
        (phase, intent) => {
            log::debug!("Ignored {:?} in {:?}", intent, phase);
        }
    }
}

fn submit(session: &mut GameSession, answer: Answer, effects: &mut Vec<Effect>) {
    // One answer per problem: later clicks during feedback are dropped
    if session.feedback_pending() {
        log::debug!("Ignored {} while feedback is showing", answer);
        return;
    }
    let Some(problem) = &session.problem else {
        log::debug!("Ignored {} with no problem on screen", answer);
        return;
    };

    let correct = problem.is_correct(answer);
    session.timer_running = false;
    session.selected_answer = Some(answer);
    session.answered_correctly = Some(correct);
    session.bump_epoch();

    effects.push(Effect::CancelTimers);
    effects.push(Effect::Schedule {
        delay: FEEDBACK_DELAY,
        token: TimerToken::feedback(session.epoch),
    });
}

fn handle_timer(
    session: &mut GameSession,
    settings: &AccessibilitySettings,
    token: TimerToken,
    effects: &mut Vec<Effect>,
) {
    if token.epoch != session.epoch {
        log::debug!("Stale {:?} (epoch {} != {})", token.kind, token.epoch, session.epoch);
        return;
    }
    match token.kind {
        TimerKind::Countdown => countdown_step(session, settings, effects),
        TimerKind::Feedback => resolve_feedback(session, effects),
    }
}

fn countdown_step(
    session: &mut GameSession,
    settings: &AccessibilitySettings,
    effects: &mut Vec<Effect>,
) {
    if !session.countdown_active(settings) {
        return;
    }
    session.time_left = session.time_left.saturating_sub(1);
    if session.time_left == 0 {
        log::debug!("Time up on {:?}", session.problem.as_ref().map(|p| &p.display_text));
        lose_try(session, effects);
    }
}

fn resolve_feedback(session: &mut GameSession, effects: &mut Vec<Effect>) {
    if session.phase != GamePhase::Playing || !session.feedback_pending() {
        return;
    }
    let correct = session.answered_correctly == Some(true);
    session.selected_answer = None;
    session.answered_correctly = None;

    if correct {
        session.score += POINTS_PER_CORRECT;
        session.next_problem();
        effects.push(Effect::CancelTimers);
    } else {
        lose_try(session, effects);
    }
}

/// Wrong answer or timeout: spend a try, then either end or move on
fn lose_try(session: &mut GameSession, effects: &mut Vec<Effect>) {
    session.tries_left = session.tries_left.saturating_sub(1);
    if session.tries_left == 0 {
        session.end();
    } else {
        session.next_problem();
    }
    effects.push(Effect::CancelTimers);
}
