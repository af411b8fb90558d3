//! Scripted Responder
//!
//! Produces the agent's replies. The state machine talks to it through the
//! [`Responder`] trait; the shipped implementation is [`ResponseSelector`],
//! which matches the user's text against an ordered rule table and falls back
//! to one of five generic templates.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use baatcheet_core::responder::ResponseSelector;
//! use baatcheet_core::sources::{StdRandom, SystemClock};
//!
//! let selector = ResponseSelector::new(
//!     Arc::new(SystemClock::local()),
//!     Arc::new(StdRandom::from_entropy()),
//! );
//! let reply = selector.select_response("kaise ho?");
//! ```

mod fallback;
mod rules;
mod selector;
mod traits;

pub use fallback::{FallbackTemplate, EXCERPT_CHARS, RECOVERY_REPLY, STANDARD_FALLBACKS};
pub use rules::{ReplyTemplate, RuleGroup, RuleKind, RuleTable};
pub use selector::{Reply, ReplySource, ResponseSelector, Selection};
pub use traits::Responder;
