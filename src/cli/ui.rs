//! Shared UI primitives for contactbook
//!
//! Design principles:
//! - Minimal: Show only what's needed
//! - Clean: No decorative borders except on dialogs
//! - Consistent: Same patterns everywhere
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `name: `
//! - Key hints in brackets: `[^A]dd`, `[esc] quit`
//! - Feedback: single word when possible: `Added.`

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, InquireError, Select, Text};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ============================================================================
// Terminal Writer
// ============================================================================

/// Terminal writer for the full-screen window.
///
/// Owns raw mode and the alternate screen while alive; both are restored on
/// drop, including when an action fails and the error unwinds out of the
/// event loop.
pub struct Term {
    stdout: io::Stdout,
}

impl Term {
    /// Enter raw mode on the alternate screen with the cursor hidden.
    pub fn try_fullscreen() -> Result<Self> {
        enable_raw_mode()?;
        let mut term = Self {
            stdout: io::stdout(),
        };
        term.stdout.execute(EnterAlternateScreen)?;
        term.stdout.execute(cursor::Hide)?;
        Ok(term)
    }

    /// Write a line. Raw mode needs an explicit carriage return.
    #[inline]
    pub fn line(&mut self, s: &str) {
        let _ = write!(self.stdout, "{}\r\n", s);
    }

    /// Write text without a newline
    #[inline]
    pub fn print(&mut self, s: &str) {
        let _ = write!(self.stdout, "{}", s);
    }

    /// Clear the screen and move cursor to top-left
    pub fn clear(&mut self) {
        let _ = self.stdout.execute(Clear(ClearType::All));
        let _ = self.stdout.execute(cursor::MoveTo(0, 0));
    }

    /// Flush output buffer
    #[inline]
    pub fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    /// Move cursor to position
    #[inline]
    pub fn move_to(&mut self, col: u16, row: u16) {
        let _ = self.stdout.execute(cursor::MoveTo(col, row));
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

// ============================================================================
// Status Bar Builder
// ============================================================================

/// Maximum actions a status bar can hold (stack-allocated)
const MAX_STATUS_ACTIONS: usize = 8;

/// Builder for consistent status bar formatting.
///
/// Example output: "3/12 [^A]dd [^U]pdate | [esc] quit"
pub struct StatusBar<'a> {
    counter: Option<(usize, usize)>,
    actions: [Option<(&'a str, &'a str)>; MAX_STATUS_ACTIONS],
    action_count: usize,
}

impl<'a> StatusBar<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            counter: None,
            actions: [None; MAX_STATUS_ACTIONS],
            action_count: 0,
        }
    }

    /// Add a counter (current/total)
    #[inline]
    pub fn counter(mut self, current: usize, total: usize) -> Self {
        self.counter = Some((current, total));
        self
    }

    /// Add an action hint (key, label)
    /// Example: `.action("^A", "dd")` produces `[^A]dd`
    #[inline]
    pub fn action(mut self, key: &'a str, label: &'a str) -> Self {
        if self.action_count < MAX_STATUS_ACTIONS {
            self.actions[self.action_count] = Some((key, label));
            self.action_count += 1;
        }
        self
    }

    /// Add a visual separator (" | ")
    #[inline]
    pub fn separator(mut self) -> Self {
        if self.action_count < MAX_STATUS_ACTIONS {
            self.actions[self.action_count] = Some(("|", ""));
            self.action_count += 1;
        }
        self
    }

    /// Render the status bar on a single line
    pub fn render(&self) -> String {
        let mut result = String::with_capacity(12 + self.action_count * 18);

        if let Some((current, total)) = self.counter {
            result.push_str(&counter(current, total));
        }

        for (key, label) in self.actions.iter().take(self.action_count).flatten() {
            if *key == "|" {
                result.push_str(" | ");
                continue;
            }
            if !result.is_empty() && !result.ends_with(" | ") {
                result.push(' ');
            }
            result.push('[');
            result.push_str(key);
            result.push(']');
            result.push_str(label);
        }

        result
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Layout Primitives
// ============================================================================

/// Return selection prefix for list items
#[inline]
pub fn selection_prefix(selected: bool) -> &'static str {
    if selected { "> " } else { "  " }
}

/// Truncate a string to `max_cols` terminal columns, adding an ellipsis if needed.
/// Wide characters (CJK, emoji) count as two columns.
pub fn truncate(s: &str, max_cols: usize) -> String {
    if max_cols == 0 {
        return String::new();
    }
    if s.width() <= max_cols {
        return s.to_string();
    }

    let budget = max_cols - 1; // Leave room for ellipsis
    let mut used = 0;
    let mut kept = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }
    format!("{}…", kept)
}

/// Truncate or pad to exactly `cols` terminal columns
pub fn fit(s: &str, cols: usize) -> String {
    let truncated = truncate(s, cols);
    let pad = cols.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(pad))
}

/// Format a counter string (e.g., "12/345")
#[inline]
pub fn counter(current: usize, total: usize) -> String {
    format!("{}/{}", current, total)
}

/// Get terminal dimensions, defaulting to 80x24 if unavailable
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

// ============================================================================
// Prompts (non-window commands)
// ============================================================================

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Result type for form inputs that can be cancelled
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for an optional field (returns empty string if skipped)
pub fn prompt_field_optional(field: &str) -> Result<FormResult<String>> {
    let prompt = format!("{}: ", field);

    let result = Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt();

    match result {
        Ok(input) => Ok(FormResult::Value(input.trim().to_string())),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for one of a fixed set of options, first option preselected
pub fn prompt_choice<T: ToString + Copy>(field: &str, options: &[T]) -> Result<FormResult<T>> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let prompt = format!("{}:", field);

    let result = Select::new(&prompt, labels.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(options.len().max(1))
        .with_vim_mode(true)
        .prompt();

    match result {
        Ok(selected) => {
            let idx = labels.iter().position(|l| *l == selected).unwrap_or(0);
            Ok(FormResult::Value(options[idx]))
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}
