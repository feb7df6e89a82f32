//! UI modules for the route simulation.

pub mod app_shell;
pub mod constants;
pub mod controls;
pub mod map;
