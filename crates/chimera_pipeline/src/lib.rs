//! Classification-and-routing pipeline
//!
//! One [`Dispatcher::process`] call classifies an untyped input, routes it to
//! the matching capability handler, times the round trip, and wraps the
//! outcome in the uniform [`chimera_core::ProcessingResult`] envelope.

mod dispatcher;
mod error;
mod handlers;

pub use dispatcher::Dispatcher;
pub use error::PipelineError;
