//! pcmsynth CLI library.
//!
//! Command implementations live here so they can be exercised from tests;
//! the `pcmsynth` binary only parses arguments and dispatches.

pub mod commands;
pub mod logging;
