//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from the conductor's read model and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Conductor holds.
//! Display state is the bridge between the conversation and rendering:
//!
//! - `DisplayMessage`: A message with its clock stamp already formatted
//! - `DisplayState`: The thread plus the composing flag and status text
//!
//! Everything here is pure so line building can be tested without a terminal.

use baatcheet_core::{ConductorState, LocaleFormat, Message, MessageId, MessageRole};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme::{ACCENT_BLUE, ACCENT_VIOLET, AGENT_BUBBLE, AGENT_TEXT, USER_BUBBLE, USER_TEXT};

/// Share of the thread width a bubble may take
pub const BUBBLE_WIDTH_PERCENT: usize = 70;

/// Narrowest bubble text column, whatever the terminal width
pub const MIN_BUBBLE_TEXT: usize = 8;

/// Display role for messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayRole {
    /// Typed by the user, drawn on the right
    User,
    /// Scripted agent, drawn on the left
    Agent,
}

impl From<MessageRole> for DisplayRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => DisplayRole::User,
            MessageRole::Agent => DisplayRole::Agent,
        }
    }
}

impl DisplayRole {
    /// Which side of the thread the bubble hugs
    pub fn alignment(&self) -> Alignment {
        match self {
            DisplayRole::User => Alignment::Right,
            DisplayRole::Agent => Alignment::Left,
        }
    }

    /// Bubble colors
    pub fn bubble_style(&self) -> Style {
        match self {
            DisplayRole::User => Style::default().fg(USER_TEXT).bg(USER_BUBBLE),
            DisplayRole::Agent => Style::default().fg(AGENT_TEXT).bg(AGENT_BUBBLE),
        }
    }
}

/// A rendered conversation message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Who sent this message
    pub role: DisplayRole,
    /// The message content
    pub content: String,
    /// Short clock stamp (`03:45 pm`)
    pub stamp: String,
}

impl DisplayMessage {
    /// Create a display message from a conversation message
    pub fn from_message(msg: &Message, locale: &dyn LocaleFormat) -> Self {
        Self {
            id: msg.id().clone(),
            role: msg.role().into(),
            content: msg.content().to_string(),
            stamp: locale.clock(&msg.timestamp()),
        }
    }

    /// Lay the message out as a bubble for a thread `width` columns wide
    ///
    /// Text wraps at [`BUBBLE_WIDTH_PERCENT`] of the width; every row is padded
    /// to the widest one so the bubble reads as a block. The stamp sits on the
    /// last row, right-aligned inside the bubble. A blank spacer row follows.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let max_text = (width * BUBBLE_WIDTH_PERCENT / 100)
            .saturating_sub(2)
            .max(MIN_BUBBLE_TEXT)
            .min(width.saturating_sub(2).max(1));

        let wrapped: Vec<String> = textwrap::wrap(&self.content, max_text)
            .into_iter()
            .map(|cow| cow.into_owned())
            .collect();

        let inner = wrapped
            .iter()
            .map(|l| l.width())
            .chain(std::iter::once(self.stamp.width()))
            .max()
            .unwrap_or(0);

        let style = self.role.bubble_style();
        let alignment = self.role.alignment();

        let mut lines: Vec<Line<'static>> = wrapped
            .into_iter()
            .map(|text| {
                let pad = inner.saturating_sub(text.width());
                Line::from(Span::styled(format!(" {text}{} ", " ".repeat(pad)), style))
                    .alignment(alignment)
            })
            .collect();

        let pad = inner.saturating_sub(self.stamp.width());
        lines.push(
            Line::from(Span::styled(
                format!(" {}{} ", " ".repeat(pad), self.stamp),
                style.add_modifier(Modifier::DIM),
            ))
            .alignment(alignment),
        );
        lines.push(Line::default());
        lines
    }
}

/// Three bouncing dots; `frame` picks which one is raised
pub fn typing_indicator(frame: u64) -> Line<'static> {
    let raised = (frame % 3) as usize;
    let base = DisplayRole::Agent.bubble_style();

    let mut spans = vec![Span::styled(" ", base)];
    for i in 0..3 {
        let style = if i == raised {
            base.fg(ACCENT_VIOLET).add_modifier(Modifier::BOLD)
        } else {
            base.fg(ACCENT_BLUE)
        };
        spans.push(Span::styled("●", style));
        spans.push(Span::styled(" ", base));
    }
    Line::from(spans).alignment(Alignment::Left)
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Conversation messages
    pub messages: Vec<DisplayMessage>,
    /// Whether the agent is composing
    pub composing: bool,
    /// Status line text for the conductor state
    pub status: &'static str,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            composing: false,
            status: ConductorState::Idle.description(),
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Catch up with the conductor's read model
    ///
    /// The conversation only grows, so anything past what is already shown
    /// is new. Returns `true` when messages were added.
    pub fn sync(
        &mut self,
        messages: &[Message],
        state: ConductorState,
        locale: &dyn LocaleFormat,
    ) -> bool {
        let shown = self.messages.len();
        self.messages.extend(
            messages
                .iter()
                .skip(shown)
                .map(|m| DisplayMessage::from_message(m, locale)),
        );
        self.composing = state.is_composing();
        self.status = state.description();
        self.messages.len() > shown
    }

    /// Every thread line for a `width`-column view, typing indicator included
    pub fn thread_lines(&self, width: usize, frame: u64) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> =
            self.messages.iter().flat_map(|m| m.lines(width)).collect();
        if self.composing {
            lines.push(typing_indicator(frame));
        }
        lines
    }
}
