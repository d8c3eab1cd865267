//! Wall clock timers for the decomposition paths.
//!
//! Timers nest: starting a timer while another one is running makes it a
//! child of the running timer, so a run produces a small tree such as
//! `path A => decompose, validate`.

mod timers;
pub use timers::*;
