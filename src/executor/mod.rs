//! Nested-loop execution.
//!
//! This module provides:
//! - `NestedExecutor`: runs the outer, middle and inner loops against a dashboard
//! - `RandomSource`: injectable uniform draws (`SeededRandom`, `ScriptedRandom`)
//! - `Pacer`: injectable pauses (`TokioPacer`, `InstantPacer`)

pub mod nested;
pub mod pacing;
pub mod random;

pub use nested::NestedExecutor;
pub use pacing::{InstantPacer, Pacer, TokioPacer};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
