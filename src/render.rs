//! Output rendering for the chat transcript.
//!
//! This module provides the [`Renderer`] trait and a plain-text
//! implementation that writes the transcript to a terminal, optionally with
//! ANSI styling.  Message content is printed verbatim.

use std::io::{self, Stdout, Write};

use crate::types::Message;

/// ANSI escape code for bold text (used for assistant replies).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for the typing indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for blue text (used for the user label).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for green text (used for the assistant label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for informational notes).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Return to column zero and erase the line.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Indentation for continuation lines of a multi-line message.
const CONTINUATION: &str = "    ";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Capturing output in tests
pub trait Renderer: Send {
    /// Print one transcript message.
    fn print_message(&mut self, message: &Message);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Called when a gateway call starts; shows a typing indicator.
    fn start_busy(&mut self) {}

    /// Called when a gateway call completes; removes the typing indicator.
    fn finish_busy(&mut self) {}
}

/// Plain text renderer with optional ANSI styling.
///
/// This renderer outputs text to stdout (or any writer) with optional ANSI
/// escape codes for author labels and the typing indicator.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    busy_shown: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            busy_shown: false,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, code: &'static str) -> &'static str {
        if self.use_color { code } else { "" }
    }

    // Terminal write failures are not actionable mid-conversation.
    fn emit(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    fn clear_busy(&mut self) {
        if self.busy_shown {
            if self.use_color {
                self.emit(ANSI_CLEAR_LINE);
            }
            self.busy_shown = false;
        }
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_message(&mut self, message: &Message) {
        self.clear_busy();
        let (label, label_color, body) = if message.is_user {
            ("You:", ANSI_BLUE, "")
        } else {
            ("AI:", ANSI_GREEN, ANSI_BOLD)
        };
        let body_style = self.style(body);
        let reset = self.style(ANSI_RESET);
        let mut rendered = format!("{}{label}{reset} {body_style}", self.style(label_color));
        for (idx, line) in message.content.lines().enumerate() {
            if idx > 0 {
                rendered.push('\n');
                rendered.push_str(CONTINUATION);
            }
            rendered.push_str(line);
        }
        rendered.push_str(reset);
        rendered.push('\n');
        self.emit(&rendered);
    }

    fn print_error(&mut self, error: &str) {
        self.clear_busy();
        let text = format!(
            "{}Error: {error}{}\n",
            self.style(ANSI_RED),
            self.style(ANSI_RESET)
        );
        self.emit(&text);
    }

    fn print_info(&mut self, info: &str) {
        self.clear_busy();
        let text = format!(
            "{}{info}{}\n",
            self.style(ANSI_YELLOW),
            self.style(ANSI_RESET)
        );
        self.emit(&text);
    }

    fn start_busy(&mut self) {
        if self.busy_shown {
            return;
        }
        self.busy_shown = true;
        if self.use_color {
            self.emit(&format!("{ANSI_DIM}AI is typing...{ANSI_RESET}"));
        } else {
            self.emit("AI is typing...\n");
        }
    }

    fn finish_busy(&mut self) {
        self.clear_busy();
    }
}
