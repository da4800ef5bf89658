//! Foundation utilities: math, logging and frame timing

pub mod logging;
pub mod math;
pub mod time;
