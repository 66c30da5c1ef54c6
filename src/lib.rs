//! Route calculator for the Atlantis boost minigame.
//!
//! Given nine rooms and the finish room, [calc::calc_seed] ranks every way of spending two or
//! three boosts, charging pacelock when boost triggers land less than a minute apart.

pub mod calc;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod parallel;
pub mod report;
pub mod seen;
pub mod server;
