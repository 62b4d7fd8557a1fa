//! Visitor status lifecycle: the guarded state machine and the engine
//! that applies transitions on behalf of actors.

pub mod engine;

pub use engine::{Actor, Transition, TransitionEngine};
