//! Baatcheet TUI - Terminal interface for baatcheet
//!
//! This crate provides a full-screen chat view over the headless
//! conversation core, plus a line-mode surface for pipes and scripts.
//!
//! # Architecture
//!
//! - **App**: Event loop, input box, and layout
//! - **Display**: Pure conversion of messages into styled bubble lines
//! - **Headless**: Transcript-style stdin/stdout loop
//! - **Theme**: The chat palette

pub mod app;
pub mod display;
pub mod headless;
pub mod theme;

pub use app::App;
pub use headless::run_headless;
