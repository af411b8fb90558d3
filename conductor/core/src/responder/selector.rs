//! Response Selector
//!
//! Maps the latest user text to a reply: ordered rule matching first, then a
//! uniformly drawn fallback. The only outside inputs are the injected clock
//! (for time/date replies) and random source (for the fallback draw).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use super::fallback::{FallbackTemplate, STANDARD_FALLBACKS};
use super::rules::{ReplyTemplate, RuleKind, RuleTable};
use super::traits::Responder;
use crate::locale::{HindiIndia, LocaleFormat};
use crate::sources::{Clock, RandomSource};

/// A reply before locale formatting
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Plain reply text
    Text(String),
    /// Prefix plus the time of day at `at`
    Time {
        /// Text before the time
        prefix: &'static str,
        /// The instant to format
        at: DateTime<FixedOffset>,
    },
    /// Prefix plus the date at `at`
    Date {
        /// Text before the date
        prefix: &'static str,
        /// The instant to format
        at: DateTime<FixedOffset>,
    },
}

impl Reply {
    /// Render to display text
    pub fn render(&self, locale: &dyn LocaleFormat) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Time { prefix, at } => format!("{prefix}{}", locale.time(at)),
            Self::Date { prefix, at } => format!("{prefix}{}", locale.date(at)),
        }
    }
}

/// Where a reply came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    /// A rule group matched
    Rule(RuleKind),
    /// Nothing matched; index into the fallback list
    Fallback(usize),
}

/// The outcome of a selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Which rule or fallback produced the reply
    pub source: ReplySource,
    /// The unformatted reply
    pub reply: Reply,
}

/// Scripted reply selection over an ordered rule table
pub struct ResponseSelector {
    rules: RuleTable,
    fallbacks: Vec<FallbackTemplate>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    locale: Arc<dyn LocaleFormat>,
}

impl ResponseSelector {
    /// Standard rules and fallbacks, `hi-IN` formatting
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            rules: RuleTable::standard(),
            fallbacks: STANDARD_FALLBACKS.to_vec(),
            clock,
            random,
            locale: Arc::new(HindiIndia),
        }
    }

    /// Replace the rule table
    #[must_use]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Choose a reply for `user_text` without formatting it
    pub fn select(&self, user_text: &str) -> Selection {
        if let Some(group) = self.rules.find(user_text) {
            let reply = match group.reply {
                ReplyTemplate::Fixed(text) => Reply::Text(text.to_string()),
                ReplyTemplate::CurrentTime { prefix } => Reply::Time {
                    prefix,
                    at: self.clock.now(),
                },
                ReplyTemplate::CurrentDate { prefix } => Reply::Date {
                    prefix,
                    at: self.clock.now(),
                },
            };
            return Selection {
                source: ReplySource::Rule(group.kind),
                reply,
            };
        }

        let index = self.random.pick(self.fallbacks.len());
        Selection {
            source: ReplySource::Fallback(index),
            reply: Reply::Text(self.fallbacks[index].render(user_text)),
        }
    }

    /// Choose and format a reply for `user_text`
    pub fn select_response(&self, user_text: &str) -> String {
        let selection = self.select(user_text);
        match selection.source {
            ReplySource::Rule(kind) => tracing::debug!(rule = kind.name(), "Rule matched"),
            ReplySource::Fallback(index) => tracing::debug!(fallback = index, "No rule matched"),
        }
        selection.reply.render(self.locale.as_ref())
    }
}

#[async_trait]
impl Responder for ResponseSelector {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn respond(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.select_response(prompt))
    }
}
