//! Baatcheet Core - Headless Conversation Engine
//!
//! This crate holds everything a scripted chat session needs, completely
//! independent of any UI framework. It can drive a TUI, a line-mode shell, or
//! run headless under test.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surfaces                           │
//! │     ┌─────────────┐                  ┌──────────────────┐     │
//! │     │     TUI     │                  │     Headless     │     │
//! │     │  (ratatui)  │                  │ (stdin / stdout) │     │
//! │     └──────┬──────┘                  └────────┬─────────┘     │
//! │            │    submit(text)  ▲  messages()   │               │
//! │            └──────────────────┼───────────────┘               │
//! └───────────────────────────────┼───────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┼───────────────────────────────┐
//! │                        BAATCHEET CORE                          │
//! │  ┌────────────────────────────┴─────────────────────────────┐ │
//! │  │                        Conductor                          │ │
//! │  │   ┌──────────────┐  ┌────────────┐  ┌──────────────────┐  │ │
//! │  │   │ Conversation │  │ ReplyDelay │  │    Responder     │  │ │
//! │  │   │   history    │  │  (jitter)  │  │ (rule selector)  │  │ │
//! │  │   └──────────────┘  └────────────┘  └──────────────────┘  │ │
//! │  └───────────────────────────────────────────────────────────┘ │
//! │          Clock · RandomSource · LocaleFormat (injected)        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Conductor`]: The two-state machine surfaces talk to
//! - [`ResponseSelector`]: Rule table plus random fallbacks
//! - [`Conversation`]: Ordered, append-only message history
//! - [`Clock`] / [`RandomSource`]: The only ambient inputs, injectable for tests
//!
//! # Quick Start
//!
//! ```no_run
//! use baatcheet_core::{Conductor, ConductorConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut conductor = Conductor::scripted(ConductorConfig::default());
//!
//!     if conductor.submit("नमस्ते").is_ok() {
//!         if let Some(reply) = conductor.next_reply().await {
//!             println!("{}", reply.content());
//!         }
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`conductor`]: The conversation state machine
//! - [`config`]: TOML / environment / CLI configuration
//! - [`conversation`]: Message history
//! - [`locale`]: `hi-IN` time and date formatting
//! - [`messages`]: Message, identifiers, and state types
//! - [`responder`]: The responder seam and the scripted selector
//! - [`sources`]: Clock and randomness
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure business logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod conductor;
pub mod config;
pub mod conversation;
pub mod locale;
pub mod messages;
pub mod responder;
pub mod sources;

// Re-exports for convenience
pub use conductor::{Conductor, ConductorConfig, ReplyDelay, ReplyError, SubmitError};
pub use conversation::{Conversation, DEFAULT_GREETING};
pub use locale::{HindiIndia, LocaleFormat};
pub use messages::{ConductorState, Message, MessageId, MessageRole, SessionId};
pub use responder::{
    FallbackTemplate, Reply, ReplySource, ReplyTemplate, Responder, ResponseSelector, RuleGroup,
    RuleKind, RuleTable, Selection, RECOVERY_REPLY,
};
pub use sources::{Clock, FixedClock, RandomSource, StdRandom, SystemClock};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ChatConfigFile,
    ChatToml, ConfigError, ConfigOverrides, ConfigSource,
};
