//! Game driver
//!
//! Owns the session, the settings, a scheduler and a speaker, and carries out
//! the effects returned by [`quiz::apply`](crate::quiz::apply). Frontends only
//! talk to this type: they dispatch intents, feed elapsed time, and render.

use std::time::Duration;

use serde::Serialize;

use crate::consts::*;
use crate::quiz::{
    ChoiceSet, Effect, GameEvent, GamePhase, GameSession, Intent, Problem, Scheduler,
    TimerHandle, TimerKind, TimerQueue, TimerToken, apply,
};
use crate::settings::AccessibilitySettings;
use crate::speech::Speaker;

#[derive(Serialize)]
struct Snapshot<'a> {
    session: &'a GameSession,
    settings: &'a AccessibilitySettings,
}

/// A running quiz
pub struct Game<S: Scheduler = TimerQueue> {
    session: GameSession,
    settings: AccessibilitySettings,
    scheduler: S,
    speaker: Box<dyn Speaker>,
    /// Armed feedback pause
    feedback: Option<TimerHandle>,
    /// Armed countdown step and the epoch it was armed in
    countdown: Option<(TimerHandle, u64)>,
    /// Bumped whenever anything visible may have changed
    revision: u64,
}

impl<S: Scheduler> Game<S> {
    pub fn new(seed: u64, scheduler: S, speaker: Box<dyn Speaker>) -> Self {
        Self {
            session: GameSession::new(seed),
            settings: AccessibilitySettings::default(),
            scheduler,
            speaker,
            feedback: None,
            countdown: None,
            revision: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Direct session access for scripted rounds (drills, tests)
    pub fn session_mut(&mut self) -> &mut GameSession {
        self.revision += 1;
        &mut self.session
    }

    /// Put a specific problem on screen (scripted drills, tests) and restart
    /// the countdown for it. Ignored outside the playing phase.
    pub fn pose(&mut self, problem: Problem, choices: ChoiceSet) {
        if self.session.phase != GamePhase::Playing || self.session.feedback_pending() {
            log::debug!("pose ignored in {:?}", self.session.phase);
            return;
        }
        self.session.pose(problem, choices);
        self.cancel_timers();
        self.sync_countdown();
        self.revision += 1;
    }

    /// Changes every time the rendered screen may differ
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Handle a player intent
    pub fn dispatch(&mut self, intent: Intent) {
        self.handle(GameEvent::Intent(intent));
    }

    /// Handle a timer that came due
    pub fn fire(&mut self, token: TimerToken) {
        match token.kind {
            TimerKind::Countdown => {
                if self.countdown.is_some_and(|(_, epoch)| epoch == token.epoch) {
                    self.countdown = None;
                }
            }
            TimerKind::Feedback => self.feedback = None,
        }
        self.handle(GameEvent::Timer(token));
    }

    fn handle(&mut self, event: GameEvent) {
        let effects = apply(&mut self.session, &mut self.settings, event);
        for effect in effects {
            match effect {
                Effect::CancelTimers => self.cancel_timers(),
                Effect::Schedule { delay, token } => {
                    let handle = self.scheduler.after(delay, token);
                    if token.kind == TimerKind::Feedback {
                        self.feedback = Some(handle);
                    }
                }
                Effect::Speak(text) => self.speaker.speak(&text),
            }
        }
        self.sync_countdown();
        self.revision += 1;
    }

    /// Keep exactly one countdown step armed while the countdown should run
    fn sync_countdown(&mut self) {
        let wanted = self
            .session
            .countdown_active(&self.settings)
            .then_some(self.session.epoch);

        match (self.countdown, wanted) {
            (Some((_, armed)), Some(epoch)) if armed == epoch => {}
            (current, wanted) => {
                if let Some((handle, _)) = current {
                    self.scheduler.cancel(handle);
                }
                self.countdown = wanted.map(|epoch| {
                    let handle = self.scheduler.after(COUNTDOWN_STEP, TimerToken::countdown(epoch));
                    (handle, epoch)
                });
            }
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.feedback.take() {
            self.scheduler.cancel(handle);
        }
        if let Some((handle, _)) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Release every timer and silence speech; later tokens are stale
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.scheduler.cancel_all();
        self.session.bump_epoch();
        self.speaker.cancel();
    }

    /// JSON view of session and settings for web hosts
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Snapshot {
            session: &self.session,
            settings: &self.settings,
        })
    }
}

impl Game<TimerQueue> {
    /// Game on a virtual clock, driven by [`Game::advance`]
    pub fn with_seed(seed: u64, speaker: Box<dyn Speaker>) -> Self {
        Self::new(seed, TimerQueue::new(), speaker)
    }

    /// Feed elapsed wall time; fires every timer that comes due, in order
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(token) = self.scheduler.pop_due(until) {
            self.fire(token);
        }
        self.scheduler.settle(until);
    }
}

impl<S: Scheduler> Drop for Game<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
