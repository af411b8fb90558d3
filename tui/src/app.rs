//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - The embedded Conductor for conversation state
//! - DisplayState for rendering
//!
//! The App never decides what the agent says or when. It forwards Enter to
//! [`Conductor::submit`], polls for the reply every frame, and draws whatever
//! the conductor's read model contains.

use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use baatcheet_core::{Conductor, HindiIndia, Responder, ResponseSelector};

use crate::display::DisplayState;
use crate::theme::{self, FADE_GRAY, INPUT_BORDER, SUBTITLE_GRAY};

/// Header title
pub const TITLE: &str = "🤖 AI Agent Chat";

/// Header subtitle
pub const SUBTITLE: &str = "आपका स्मार्ट बातचीत साथी";

/// Shown in the empty input box
pub const PLACEHOLDER: &str = "अपना संदेश लिखें...";

/// Send hint in the input border
pub const SEND_HINT: &str = " भेजें 📤 ";

/// Lines scrolled per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// Header height (title + subtitle)
const HEADER_HEIGHT: u16 = 2;

/// Bordered single-line input box
const INPUT_HEIGHT: u16 = 3;

/// Main application state
pub struct App<R: Responder + 'static = ResponseSelector> {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Conductor Integration ===
    /// The embedded conversation state machine
    conductor: Conductor<R>,
    /// Display state derived from the conductor's read model
    display: DisplayState,
    /// Formats message clock stamps
    locale: HindiIndia,

    // === Input State ===
    /// User input buffer
    input_buffer: String,
    /// Scroll offset (lines from bottom, 0 = latest)
    scroll_offset: usize,
    /// Total rendered lines (for scroll bounds)
    total_lines: usize,
    /// Where the thread was last drawn (for mouse hit-testing and paging)
    thread_area: Rect,

    // === Misc State ===
    /// Frames drawn so far (drives the typing indicator)
    frame_count: u64,
}

impl<R: Responder + 'static> App<R> {
    /// Create a new App around a conductor
    pub fn new(conductor: Conductor<R>) -> Self {
        let locale = HindiIndia;
        let mut display = DisplayState::new();
        display.sync(conductor.messages(), conductor.state(), &locale);

        Self {
            running: true,
            conductor,
            display,
            locale,
            input_buffer: String::new(),
            scroll_offset: 0,
            total_lines: 0,
            thread_area: Rect::default(),
            frame_count: 0,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // ~10 FPS is plenty for the typing indicator
        let frame_duration = Duration::from_millis(100);

        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                // Frame tick
                () = tokio::time::sleep(frame_duration) => {}
            }

            self.tick();
            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Pick up a finished reply and refresh display state
    pub fn tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.conductor.poll_reply();
        self.sync_display();
    }

    fn sync_display(&mut self) {
        let added = self.display.sync(
            self.conductor.messages(),
            self.conductor.state(),
            &self.locale,
        );
        if added {
            self.scroll_offset = 0;
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Submit on a plain Enter; the buffer survives a rejected submit
            KeyCode::Enter if key.modifiers.is_empty() => {
                match self.conductor.submit(self.input_buffer.clone()) {
                    Ok(_) => {
                        self.input_buffer.clear();
                        self.sync_display();
                    }
                    Err(e) => tracing::debug!(reason = %e, "Submission not accepted"),
                }
            }

            // Typing
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }

            // Conversation scrolling
            KeyCode::PageUp => self.scroll_up(self.page_size()),
            KeyCode::PageDown => self.scroll_down(self.page_size()),
            KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_offset = self.max_scroll();
            }
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_offset = 0;
            }

            _ => {}
        }
    }

    /// Handle mouse input; the wheel only scrolls over the thread
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self
            .thread_area
            .contains(Position::new(mouse.column, mouse.row))
        {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
            _ => {}
        }
    }

    fn page_size(&self) -> usize {
        usize::from(self.thread_area.height / 2).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.total_lines
            .saturating_sub(usize::from(self.thread_area.height))
    }

    fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let [header_area, thread_area, input_area, status_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);
        self.render_thread(frame, thread_area);
        self.render_input(frame, input_area);
        self.render_status(frame, status_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(TITLE, theme::title_style())),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(SUBTITLE_GRAY))),
        ]);
        frame.render_widget(header, area);
    }

    /// Render the conversation thread, newest at the bottom
    fn render_thread(&mut self, frame: &mut Frame, area: Rect) {
        self.thread_area = area;
        let height = usize::from(area.height);

        let mut lines = self
            .display
            .thread_lines(usize::from(area.width), self.frame_count);
        self.total_lines = lines.len();

        // Clamp scroll offset
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        let visible_end = self.total_lines.saturating_sub(self.scroll_offset);
        let visible_start = visible_end.saturating_sub(height);

        // Fade the edge rows when there is more content past them
        if visible_start > 0 {
            if let Some(line) = lines.get_mut(visible_start) {
                *line = line.clone().patch_style(Style::default().fg(FADE_GRAY));
            }
        }
        if self.scroll_offset > 0 && visible_end > 0 {
            if let Some(line) = lines.get_mut(visible_end - 1) {
                *line = line.clone().patch_style(Style::default().fg(FADE_GRAY));
            }
        }

        let visible: Vec<Line<'static>> = lines
            .into_iter()
            .skip(visible_start)
            .take(height)
            .collect();
        frame.render_widget(Paragraph::new(visible), area);
    }

    /// Render the input box with placeholder, send hint, and cursor
    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let has_text = !self.input_buffer.trim().is_empty();
        let sendable = has_text && !self.conductor.is_composing();

        let border_color = if has_text {
            theme::ACCENT_BLUE
        } else {
            INPUT_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(
                Line::from(Span::styled(
                    SEND_HINT,
                    theme::send_hint_style(sendable),
                ))
                .right_aligned(),
            );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.input_buffer.is_empty() {
            let placeholder = Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(SUBTITLE_GRAY)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(Paragraph::new(Line::from(placeholder)), inner);
            frame.set_cursor_position(Position::new(inner.x, inner.y));
            return;
        }

        // Keep the end of the buffer (where the cursor is) in view
        let room = usize::from(inner.width.saturating_sub(1));
        let visible = tail_within(&self.input_buffer, room);
        let cursor_x = inner.x + u16::try_from(visible.width()).unwrap_or(inner.width);
        frame.render_widget(Paragraph::new(visible), inner);
        frame.set_cursor_position(Position::new(cursor_x, inner.y));
    }

    /// Render status bar
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let scroll_info = if self.scroll_offset > 0 {
            format!(" │ ↑{} पंक्तियां", self.scroll_offset)
        } else {
            String::new()
        };

        let status = format!(
            " {} │ Enter भेजें │ PgUp/PgDn स्क्रॉल │ Esc बाहर{}",
            self.display.status, scroll_info
        );
        let style = if self.display.composing {
            Style::default().fg(theme::ACCENT_VIOLET)
        } else {
            Style::default().fg(SUBTITLE_GRAY)
        };
        frame.render_widget(Paragraph::new(Line::from(Span::styled(status, style))), area);
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current contents of the input box
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Lines scrolled up from the newest
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The embedded conductor
    pub fn conductor(&self) -> &Conductor<R> {
        &self.conductor
    }

    /// End the session, cancelling any pending reply
    pub fn shutdown(self) {
        self.conductor.shutdown();
    }
}

/// Longest suffix of `text` at most `columns` wide
fn tail_within(text: &str, columns: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        width += ch.width().unwrap_or(0);
        if width > columns {
            break;
        }
        start = idx;
    }
    &text[start..]
}
