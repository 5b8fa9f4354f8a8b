//! Live game presentation

pub mod presenter;
