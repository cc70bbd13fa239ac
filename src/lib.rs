//! termfolio: a cyberpunk portfolio for the terminal.

pub mod config;
pub mod error;
pub mod hero;
pub mod konami;
pub mod logging;
pub mod profile;
pub mod report;
pub mod sequencer;
pub mod skills;
pub mod timer;
pub mod toast;
pub mod tui;
pub mod types;
