// src/tui/mod.rs — Terminal front end.
//
// One section on screen at a time, driven by the controller. Launch via
// `cvscan` or `cvscan ui`.

pub mod app;
pub mod forms;
pub mod theme;
pub mod widgets;

pub use app::run_ui;
