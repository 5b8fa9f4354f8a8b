//! Application-level configuration.
//!
//! - [`ControllerParams`] — game loop control (debate length, memory strategy, pacing)

pub mod controller_params;

pub use controller_params::{ContextStrategy, ControllerParams, Pacing};
