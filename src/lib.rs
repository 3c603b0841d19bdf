// src/lib.rs — Library root for cvscan

pub mod api;
pub mod cli;
pub mod controller;
pub mod infra;
pub mod tui;
