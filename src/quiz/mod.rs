//! Deterministic quiz core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time only arrives as timer tokens
//! - No rendering or platform dependencies

pub mod answer;
pub mod operation;
pub mod problem;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use answer::Answer;
pub use operation::Operation;
pub use problem::{ChoiceSet, Problem, generate, generate_with_operands};
pub use scheduler::{Scheduler, TimerHandle, TimerKind, TimerQueue, TimerToken};
pub use state::{GamePhase, GameSession};
pub use tick::{Effect, GameEvent, Intent, apply};
