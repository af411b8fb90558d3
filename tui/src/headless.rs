//! Headless Line Mode
//!
//! Drives a conductor from a line-oriented stream instead of a terminal UI.
//! Each non-blank input line is submitted, the reply is awaited, and both are
//! written out as a transcript. Used for `--headless` and for scripting.

use baatcheet_core::{Conductor, LocaleFormat, Message, MessageRole, Responder};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Transcript label for the user
pub const USER_LABEL: &str = "आप";

/// Transcript label for the agent
pub const AGENT_LABEL: &str = "🤖";

/// One transcript line: `[03:45 pm] 🤖: text`
pub fn transcript_line(msg: &Message, locale: &dyn LocaleFormat) -> String {
    let label = match msg.role() {
        MessageRole::User => USER_LABEL,
        MessageRole::Agent => AGENT_LABEL,
    };
    format!("[{}] {label}: {}", locale.clock(&msg.timestamp()), msg.content())
}

/// Run a session over `input`/`output` until `input` is exhausted
///
/// Blank lines are skipped the same way the TUI ignores a blank Enter.
pub async fn run_headless<R, I, O>(
    mut conductor: Conductor<R>,
    locale: &dyn LocaleFormat,
    input: I,
    mut output: O,
) -> anyhow::Result<Conductor<R>>
where
    R: Responder + 'static,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    for msg in conductor.messages() {
        write_line(&mut output, &transcript_line(msg, locale)).await?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(e) = conductor.submit(line) {
            tracing::debug!(reason = %e, "Skipping input line");
            continue;
        }
        if let Some(user) = conductor.messages().last() {
            write_line(&mut output, &transcript_line(user, locale)).await?;
        }
        if let Some(reply) = conductor.next_reply().await {
            let text = transcript_line(reply, locale);
            write_line(&mut output, &text).await?;
        }
    }

    output.flush().await?;
    Ok(conductor)
}

async fn write_line<O: AsyncWrite + Unpin>(output: &mut O, line: &str) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use baatcheet_core::{
        Clock, ConductorConfig, FixedClock, HindiIndia, RandomSource, ReplyDelay,
        ResponseSelector, StdRandom,
    };
    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    fn conductor() -> Conductor<ResponseSelector> {
        let at = FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 15, 45, 12)
            .unwrap();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(at));
        let random: Arc<dyn RandomSource> = Arc::new(StdRandom::with_seed(5));
        let selector = ResponseSelector::new(Arc::clone(&clock), Arc::clone(&random));
        let config = ConductorConfig {
            greeting: "स्वागत है".to_string(),
            reply_delay: ReplyDelay::new(Duration::from_millis(10), Duration::ZERO),
            ..ConductorConfig::default()
        };
        Conductor::with_sources(Arc::new(selector), config, clock, random)
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcript_of_scripted_session() {
        let input: &[u8] = b"Hello\n\n   \nalvida\n";
        let mut output = Vec::new();

        let conductor = run_headless(conductor(), &HindiIndia, input, &mut output)
            .await
            .unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript.lines().collect::<Vec<_>>(),
            vec![
                "[03:45 pm] 🤖: स्वागत है",
                "[03:45 pm] आप: Hello",
                "[03:45 pm] 🤖: नमस्ते! मैं आपकी कैसे मदद कर सकता हूं?",
                "[03:45 pm] आप: alvida",
                "[03:45 pm] 🤖: अलविदा! फिर मिलेंगे! 👋",
            ]
        );
        assert_eq!(conductor.messages().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_prints_greeting_only() {
        let input: &[u8] = b"";
        let mut output = Vec::new();

        run_headless(conductor(), &HindiIndia, input, &mut output)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "[03:45 pm] 🤖: स्वागत है\n");
    }
}
