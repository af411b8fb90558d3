//! Conductor - The Conversation State Machine
//!
//! The Conductor owns one chat session. It:
//! - Guards and records user submissions
//! - Schedules exactly one delayed reply per accepted submission
//! - Appends the reply (or a recovery reply) when it arrives
//! - Cancels pending work on teardown
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. Surfaces call [`Conductor::submit`] and read
//! the conversation back through [`Conductor::messages`] and
//! [`Conductor::state`]; they never mutate anything directly.
//!
//! Reply computation runs in a spawned tokio task that only sleeps and asks
//! the [`Responder`] for text. The result travels back over a oneshot
//! channel and is applied by whoever owns the `&mut Conductor`, so the
//! conversation has a single writer.
//!
//! # States
//!
//! ```text
//!            submit(text) accepted
//!   Idle ─────────────────────────────▶ AwaitingReply
//!    ▲                                        │
//!    └──────── reply (or recovery) ◀──────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::conversation::{Conversation, DEFAULT_GREETING};
use crate::messages::{ConductorState, Message, MessageId, SessionId};
use crate::responder::{Responder, ResponseSelector, RECOVERY_REPLY};
use crate::sources::{Clock, RandomSource, StdRandom, SystemClock};

/// Simulated typing latency: `base + uniform[0, jitter]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplyDelay {
    /// Minimum wait before a reply
    pub base: Duration,
    /// Upper bound of the random extra wait
    pub jitter: Duration,
}

impl ReplyDelay {
    /// Create a delay window
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// No delay at all
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draw one delay from the window
    pub fn sample(&self, random: &dyn RandomSource) -> Duration {
        self.base + random.jitter(self.jitter)
    }

    /// Longest delay this window can produce
    pub fn longest(&self) -> Duration {
        self.base + self.jitter
    }
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(1000))
    }
}

/// Conductor configuration
#[derive(Clone, Debug)]
pub struct ConductorConfig {
    /// Simulated typing latency
    pub reply_delay: ReplyDelay,
    /// Agent message the conversation is seeded with
    pub greeting: String,
    /// Seed for fallback choice and delay jitter; entropy when `None`
    pub rng_seed: Option<u64>,
    /// Pin timestamps to this offset; system local time when `None`
    pub utc_offset: Option<FixedOffset>,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            reply_delay: ReplyDelay::default(),
            greeting: DEFAULT_GREETING.to_string(),
            rng_seed: None,
            utc_offset: None,
        }
    }
}

impl ConductorConfig {
    /// Clock honoring `utc_offset`
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.utc_offset {
            Some(offset) => Arc::new(SystemClock::with_offset(offset)),
            None => Arc::new(SystemClock::local()),
        }
    }

    /// Random source honoring `rng_seed`
    pub fn random(&self) -> Arc<dyn RandomSource> {
        match self.rng_seed {
            Some(seed) => Arc::new(StdRandom::with_seed(seed)),
            None => Arc::new(StdRandom::from_entropy()),
        }
    }
}

/// Why a submission was not accepted
///
/// Neither variant changes the conversation or the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The text was empty or whitespace only
    #[error("submission is empty")]
    EmptySubmission,
    /// A reply is still being composed
    #[error("a reply is already pending")]
    ConcurrentSubmission,
}

/// Why a reply could not be produced
///
/// Never shown to the user; the recovery reply is appended instead.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The responder returned an error
    #[error("responder failed: {0}")]
    SelectorFailure(#[source] anyhow::Error),
    /// The reply task ended without sending a result (panic or abort)
    #[error("reply task ended without a result")]
    Abandoned,
}

/// The reply currently in flight
struct PendingReply {
    handle: JoinHandle<()>,
    rx: oneshot::Receiver<anyhow::Result<String>>,
}

/// The conversation state machine
///
/// `submit` spawns onto the ambient tokio runtime, so it must be called from
/// within one.
pub struct Conductor<R: Responder + 'static> {
    config: ConductorConfig,
    responder: Arc<R>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    conversation: Conversation,
    state: ConductorState,
    pending: Option<PendingReply>,
}

impl Conductor<ResponseSelector> {
    /// Conductor with the standard scripted responder
    ///
    /// The responder and the conductor share one clock and one random
    /// source, both built from `config`.
    pub fn scripted(config: ConductorConfig) -> Self {
        let clock = config.clock();
        let random = config.random();
        let selector = ResponseSelector::new(Arc::clone(&clock), Arc::clone(&random));
        Self::with_sources(Arc::new(selector), config, clock, random)
    }
}

impl<R: Responder + 'static> Conductor<R> {
    /// Create a new Conductor with sources derived from `config`
    pub fn new(responder: R, config: ConductorConfig) -> Self {
        let clock = config.clock();
        let random = config.random();
        Self::with_sources(Arc::new(responder), config, clock, random)
    }

    /// Create a new Conductor with explicit clock and random source
    pub fn with_sources(
        responder: Arc<R>,
        config: ConductorConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let conversation = Conversation::seeded(config.greeting.clone(), clock.now());
        tracing::info!(
            session = %conversation.id(),
            responder = responder.name(),
            "Session started"
        );

        Self {
            config,
            responder,
            clock,
            random,
            conversation,
            state: ConductorState::Idle,
            pending: None,
        }
    }

    /// Submit user text
    ///
    /// On success the user message is already in the conversation and a
    /// reply is scheduled. Rejections leave everything untouched.
    ///
    /// A reply that finished since the last poll is applied first, so an
    /// unpolled but completed reply never blocks the next submission.
    pub fn submit(&mut self, text: impl Into<String>) -> Result<MessageId, SubmitError> {
        let text = text.into();
        if text.trim().is_empty() {
            tracing::debug!("Ignoring empty submission");
            return Err(SubmitError::EmptySubmission);
        }
        self.poll_reply();
        if self.state.is_composing() {
            tracing::debug!("Ignoring submission while a reply is pending");
            return Err(SubmitError::ConcurrentSubmission);
        }

        let id = self
            .conversation
            .add_user_message(text.clone(), self.clock.now());
        self.state = ConductorState::AwaitingReply;

        let delay = self.config.reply_delay.sample(self.random.as_ref());
        tracing::debug!(
            session = %self.conversation.id(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Reply scheduled"
        );

        let (tx, rx) = oneshot::channel();
        let responder = Arc::clone(&self.responder);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = responder.respond(&text).await;
            // Receiver gone means the conductor was torn down
            let _ = tx.send(result);
        });
        self.pending = Some(PendingReply { handle, rx });

        Ok(id)
    }

    /// Apply the reply if it has arrived, without waiting
    ///
    /// Returns the appended agent message, or `None` when nothing was
    /// pending or the reply is not ready yet.
    pub fn poll_reply(&mut self) -> Option<&Message> {
        let pending = self.pending.as_mut()?;
        let outcome = match pending.rx.try_recv() {
            Ok(result) => result.map_err(ReplyError::SelectorFailure),
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(ReplyError::Abandoned),
        };
        self.complete(outcome)
    }

    /// Wait for the pending reply and apply it
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<&Message> {
        let pending = self.pending.as_mut()?;
        let outcome = match (&mut pending.rx).await {
            Ok(result) => result.map_err(ReplyError::SelectorFailure),
            Err(_) => Err(ReplyError::Abandoned),
        };
        self.complete(outcome)
    }

    fn complete(&mut self, outcome: Result<String, ReplyError>) -> Option<&Message> {
        self.pending = None;

        let content = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    session = %self.conversation.id(),
                    error = %e,
                    "Reply failed, substituting recovery reply"
                );
                RECOVERY_REPLY.to_string()
            }
        };

        let id = self
            .conversation
            .add_agent_message(content, self.clock.now());
        self.state = ConductorState::Idle;
        self.conversation.get_message(&id)
    }

    /// Current state
    ///
    /// Read-only accessors do not drive the reply task: a reply that has
    /// arrived shows up here only after `poll_reply`, `next_reply` or the
    /// next `submit` applies it.
    pub fn state(&self) -> ConductorState {
        self.state
    }

    /// Whether a reply is being composed
    pub fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// The full conversation
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Get session ID
    pub fn session_id(&self) -> &SessionId {
        self.conversation.id()
    }

    /// End the session, cancelling any pending reply
    pub fn shutdown(self) {
        tracing::info!(
            session = %self.conversation.id(),
            messages = self.conversation.len(),
            "Session ended"
        );
    }
}

impl<R: Responder + 'static> Drop for Conductor<R> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            tracing::debug!(session = %self.conversation.id(), "Cancelled pending reply");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageRole;
    use crate::sources::FixedClock;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    fn instant() -> DateTime<FixedOffset> {
        ist().with_ymd_and_hms(2026, 10, 19, 15, 45, 12).unwrap()
    }

    fn seeded_config() -> ConductorConfig {
        ConductorConfig {
            rng_seed: Some(7),
            utc_offset: Some(ist()),
            ..ConductorConfig::default()
        }
    }

    fn scripted_fixed() -> Conductor<ResponseSelector> {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(instant()));
        let random: Arc<dyn RandomSource> = Arc::new(StdRandom::with_seed(7));
        let selector = ResponseSelector::new(Arc::clone(&clock), Arc::clone(&random));
        Conductor::with_sources(Arc::new(selector), seeded_config(), clock, random)
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        fn name(&self) -> &str {
            "failing"
        }

        async fn respond(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("rule table unavailable")
        }
    }

    struct PanickingResponder;

    #[async_trait]
    impl Responder for PanickingResponder {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn respond(&self, _prompt: &str) -> anyhow::Result<String> {
            panic!("responder blew up")
        }
    }

    struct CountingResponder(Arc<AtomicUsize>);

    #[async_trait]
    impl Responder for CountingResponder {
        fn name(&self) -> &str {
            "counting"
        }

        async fn respond(&self, prompt: &str) -> anyhow::Result<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo: {prompt}"))
        }
    }

    #[test]
    fn test_reply_delay_default_window() {
        let delay = ReplyDelay::default();
        assert_eq!(delay.base, Duration::from_millis(1000));
        assert_eq!(delay.longest(), Duration::from_millis(2000));

        let random = StdRandom::with_seed(3);
        for _ in 0..100 {
            let sampled = delay.sample(&random);
            assert!(sampled >= delay.base && sampled <= delay.longest());
        }
        assert_eq!(ReplyDelay::immediate().sample(&random), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state_is_seeded_idle() {
        let conductor = scripted_fixed();
        assert_eq!(conductor.state(), ConductorState::Idle);
        assert_eq!(conductor.messages().len(), 1);
        assert_eq!(conductor.messages()[0].role(), MessageRole::Agent);
        assert_eq!(conductor.messages()[0].content(), DEFAULT_GREETING);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hello_full_cycle() {
        let mut conductor = scripted_fixed();

        conductor.submit("Hello").unwrap();
        assert_eq!(conductor.messages().len(), 2);
        assert_eq!(conductor.state(), ConductorState::AwaitingReply);
        assert!(conductor.poll_reply().is_none());

        let reply = conductor.next_reply().await.unwrap();
        assert_eq!(reply.role(), MessageRole::Agent);
        assert_eq!(reply.content(), "नमस्ते! मैं आपकी कैसे मदद कर सकता हूं?");

        assert_eq!(conductor.messages().len(), 3);
        assert_eq!(conductor.state(), ConductorState::Idle);
        assert_eq!(conductor.messages()[1].role(), MessageRole::User);
        assert_eq!(conductor.messages()[1].content(), "Hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_base_delay() {
        let mut conductor = scripted_fixed();
        conductor.submit("thank you").unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(conductor.poll_reply().is_none());
        assert!(conductor.is_composing());

        tokio::time::sleep(Duration::from_millis(1001)).await;
        tokio::task::yield_now().await;
        let reply = conductor.poll_reply().unwrap();
        assert_eq!(reply.content(), "आपका स्वागत है! 😊");
        assert!(!conductor.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_reply_applied_before_next_submit() {
        let mut conductor = scripted_fixed();
        conductor.submit("Hello").unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(conductor.messages().len(), 2);

        let id = conductor.submit("alvida").unwrap();
        assert_eq!(conductor.messages().len(), 4);
        assert_eq!(
            conductor.messages()[2].content(),
            "नमस्ते! मैं आपकी कैसे मदद कर सकता हूं?"
        );
        assert_eq!(conductor.messages()[3].id(), &id);
        assert_eq!(conductor.state(), ConductorState::AwaitingReply);

        let reply = conductor.next_reply().await.unwrap();
        assert_eq!(reply.content(), "अलविदा! फिर मिलेंगे! 👋");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submission_rejected() {
        let mut conductor = scripted_fixed();
        assert_eq!(conductor.submit(""), Err(SubmitError::EmptySubmission));
        assert_eq!(conductor.submit("   "), Err(SubmitError::EmptySubmission));
        assert_eq!(conductor.messages().len(), 1);
        assert_eq!(conductor.state(), ConductorState::Idle);
        assert!(conductor.next_reply().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_double_submit_appends_once() {
        let mut conductor = scripted_fixed();
        assert!(conductor.submit("hi").is_ok());
        assert_eq!(conductor.submit("hi"), Err(SubmitError::ConcurrentSubmission));
        assert_eq!(conductor.messages().len(), 2);

        conductor.next_reply().await.unwrap();
        assert_eq!(conductor.messages().len(), 3);
        assert!(conductor.next_reply().await.is_none());

        // Accepted again once idle
        assert!(conductor.submit("hi").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_reply_matches_wall_clock() {
        let mut conductor = Conductor::scripted(seeded_config());
        conductor.submit("What time is it").unwrap();
        let reply = conductor.next_reply().await.unwrap().content().to_string();

        let stamp = reply.strip_prefix("अभी का समय है: ").unwrap();
        let parsed = NaiveTime::parse_from_str(stamp, "%I:%M:%S %P").unwrap();
        let now = chrono::Utc::now().with_timezone(&ist()).time();
        let diff = (i64::from(now.num_seconds_from_midnight())
            - i64::from(parsed.num_seconds_from_midnight()))
        .rem_euclid(86_400);
        assert!(diff <= 5 || diff >= 86_395, "reply {stamp}, now {now}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_responder_recovers() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(instant()));
        let random: Arc<dyn RandomSource> = Arc::new(StdRandom::with_seed(1));
        let mut conductor =
            Conductor::with_sources(Arc::new(FailingResponder), seeded_config(), clock, random);

        conductor.submit("anything").unwrap();
        let reply = conductor.next_reply().await.unwrap();
        assert_eq!(reply.content(), RECOVERY_REPLY);
        assert_eq!(conductor.state(), ConductorState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_responder_recovers() {
        let mut conductor = Conductor::new(PanickingResponder, seeded_config());

        conductor.submit("anything").unwrap();
        let reply = conductor.next_reply().await.unwrap();
        assert_eq!(reply.content(), RECOVERY_REPLY);
        assert_eq!(conductor.state(), ConductorState::Idle);
        assert!(conductor.submit("again").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_mid_delay_never_responds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut conductor =
            Conductor::new(CountingResponder(Arc::clone(&calls)), seeded_config());

        conductor.submit("hello").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(conductor);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_reply() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut conductor =
            Conductor::new(CountingResponder(Arc::clone(&calls)), seeded_config());

        conductor.submit("hello").unwrap();
        conductor.shutdown();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_unchanged_after_cycle() {
        let mut conductor = scripted_fixed();
        let before: Vec<(MessageRole, String)> = conductor
            .messages()
            .iter()
            .map(|m| (m.role(), m.content().to_string()))
            .collect();

        conductor.submit("Kya kar sakte ho?").unwrap();
        conductor.next_reply().await.unwrap();

        let after: Vec<(MessageRole, String)> = conductor
            .messages()
            .iter()
            .map(|m| (m.role(), m.content().to_string()))
            .collect();
        assert_eq!(after[..1], before[..]);
        assert_eq!(after[1], (MessageRole::User, "Kya kar sakte ho?".to_string()));
        assert_eq!(after[2].0, MessageRole::Agent);
        assert_eq!(conductor.messages()[2].timestamp().hour(), 15);
    }
}
