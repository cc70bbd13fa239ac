//! TUI module for the interactive portfolio.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, clipboard, links, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
