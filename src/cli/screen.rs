//! Full-screen terminal window for the contact book.
//!
//! Left pane: search field and contact list. Right pane: details form and
//! the Add / Update / Delete buttons. Rendering and key handling are plain
//! functions over [`ContactWindow`] so they can be tested without a TTY.

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::{self, IsTerminal};
use unicode_width::UnicodeWidthStr;

use crate::cli::form::FormField;
use crate::cli::ui::{fit, selection_prefix, term_size, truncate, StatusBar, Term};
use crate::cli::window::{ContactWindow, Dialogs};
use crate::db::Database;

const TITLE: &str = "Contact Book";
const LABEL_WIDTH: usize = 10;
/// Address lines shown at once. The form and buttons must stay on screen.
const ADDRESS_ROWS: usize = 3;

/// Widgets that can hold keyboard focus, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
    Field(FormField),
    Category,
    Add,
    Update,
    Delete,
}

impl Focus {
    const ORDER: &'static [Focus] = &[
        Focus::Search,
        Focus::List,
        Focus::Field(FormField::Name),
        Focus::Field(FormField::Phone),
        Focus::Field(FormField::Email),
        Focus::Field(FormField::Address),
        Focus::Category,
        Focus::Add,
        Focus::Update,
        Focus::Delete,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Whether the event loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Open the window and run until the user closes it
pub fn run_window(db: &Database) -> Result<()> {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        return Err(anyhow!(
            "The contact window requires a terminal. Use subcommands for non-interactive use:\n  \
            contactbook list\n  \
            contactbook show <name>\n  \
            Run 'contactbook --help' for all options."
        ));
    }

    let mut window = ContactWindow::new(db)?;
    let mut focus = Focus::Search;
    let mut term = Term::try_fullscreen()?;
    tracing::info!("Contact window opened");

    loop {
        let (width, height) = term_size();
        draw(&mut term, &render(&window, focus, width, height));

        let key = match event::read()? {
            Event::Key(key) => key,
            _ => continue,
        };

        let mut dialogs = TerminalDialogs { term: &mut term };
        if handle_key(&mut window, &mut focus, key, &mut dialogs)? == Flow::Quit {
            break;
        }
    }

    tracing::info!("Contact window closed");
    Ok(())
}

fn draw(term: &mut Term, lines: &[String]) {
    term.clear();
    for (i, line) in lines.iter().enumerate() {
        if i + 1 == lines.len() {
            term.print(line);
        } else {
            term.line(line);
        }
    }
    term.flush();
}

// ============================================================================
// Key handling
// ============================================================================

/// Apply one key event to the window
pub fn handle_key(
    window: &mut ContactWindow,
    focus: &mut Focus,
    key: KeyEvent,
    dialogs: &mut dyn Dialogs,
) -> Result<Flow> {
    if key.kind != KeyEventKind::Press {
        return Ok(Flow::Continue);
    }

    // Windows reports AltGr as CONTROL | ALT; those keys type characters
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shortcut = ctrl && !alt;
    if key.code == KeyCode::Esc || (shortcut && key.code == KeyCode::Char('q')) {
        return Ok(Flow::Quit);
    }

    window.clear_status();

    if shortcut {
        match key.code {
            KeyCode::Char('a') => window.add_contact(dialogs)?,
            KeyCode::Char('u') => window.update_contact(dialogs)?,
            KeyCode::Char('d') => window.delete_contact(dialogs)?,
            _ => {}
        }
        return Ok(Flow::Continue);
    }

    match key.code {
        KeyCode::Tab => {
            *focus = focus.next();
            return Ok(Flow::Continue);
        }
        KeyCode::BackTab => {
            *focus = focus.prev();
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    let typed = match key.code {
        KeyCode::Char(c) if !alt || ctrl => Some(c),
        _ => None,
    };

    match *focus {
        Focus::Search => match key.code {
            KeyCode::Backspace => {
                let mut text = window.search_text().to_string();
                text.pop();
                window.search_contacts(&text);
            }
            KeyCode::Enter | KeyCode::Down => *focus = Focus::List,
            _ => {
                if let Some(c) = typed {
                    let text = format!("{}{}", window.search_text(), c);
                    window.search_contacts(&text);
                }
            }
        },
        Focus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => window.move_highlight(-1),
            KeyCode::Down | KeyCode::Char('j') => window.move_highlight(1),
            KeyCode::PageUp => window.move_highlight(-10),
            KeyCode::PageDown => window.move_highlight(10),
            KeyCode::Enter | KeyCode::Char(' ') => {
                window.select_highlighted()?;
            }
            _ => {}
        },
        Focus::Field(field) => match key.code {
            KeyCode::Backspace => {
                window.form.text_mut(field).pop();
            }
            KeyCode::Enter if field.is_multiline() => window.form.text_mut(field).push('\n'),
            KeyCode::Enter => *focus = focus.next(),
            _ => {
                if let Some(c) = typed {
                    window.form.text_mut(field).push(c);
                }
            }
        },
        Focus::Category => match key.code {
            KeyCode::Left => window.form.category = window.form.category.prev(),
            KeyCode::Right | KeyCode::Char(' ') => {
                window.form.category = window.form.category.next()
            }
            KeyCode::Enter => *focus = focus.next(),
            _ => {}
        },
        Focus::Add | Focus::Update | Focus::Delete => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                match *focus {
                    Focus::Add => window.add_contact(dialogs)?,
                    Focus::Update => window.update_contact(dialogs)?,
                    _ => window.delete_contact(dialogs)?,
                }
            }
        }
    }

    Ok(Flow::Continue)
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the whole window as exactly `height` lines, each `width` columns wide
pub fn render(window: &ContactWindow, focus: Focus, width: usize, height: usize) -> Vec<String> {
    let width = width.max(40);
    let height = height.max(13);
    let left_width = (width * 2 / 5).max(18);
    let right_width = width - left_width - 3;
    let body_rows = height - 4;

    let left = render_left(window, focus, left_width, body_rows);
    let right = render_right(window, focus, right_width);

    let mut lines = Vec::with_capacity(height);
    lines.push(fit(TITLE, width));
    lines.push(fit("", width));
    for row in 0..body_rows {
        let l = left.get(row).map(String::as_str).unwrap_or("");
        let r = right.get(row).map(String::as_str).unwrap_or("");
        lines.push(format!("{} │ {}", fit(l, left_width), fit(r, right_width)));
    }

    lines.push(fit(window.status().unwrap_or(""), width));

    let visible = window.visible_names().len();
    let hints = StatusBar::new()
        .counter(visible, window.entries().len())
        .action("^A", "dd")
        .action("^U", "pdate")
        .action("^D", "elete")
        .separator()
        .action("tab", " move")
        .action("esc", " quit")
        .render();
    lines.push(fit(&hints, width));

    lines
}

fn render_left(window: &ContactWindow, focus: Focus, width: usize, rows: usize) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}search: {}",
            selection_prefix(focus == Focus::Search),
            window.search_text()
        ),
        String::new(),
    ];

    let visible: Vec<(usize, &str)> = window
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.hidden)
        .map(|(i, e)| (i, e.name.as_str()))
        .collect();

    let list_rows = rows.saturating_sub(lines.len()).max(1);
    let cursor = window
        .highlighted()
        .and_then(|idx| visible.iter().position(|(i, _)| *i == idx))
        .unwrap_or(0);
    let scroll = if cursor >= list_rows {
        cursor + 1 - list_rows
    } else {
        0
    };

    if visible.is_empty() {
        lines.push("  No contacts.".to_string());
    }

    let marker = if focus == Focus::List { "*" } else { " " };
    for (idx, name) in visible.iter().skip(scroll).take(list_rows) {
        let highlighted = window.highlighted() == Some(*idx);
        let prefix = if highlighted {
            format!("{}>", marker)
        } else {
            "  ".to_string()
        };
        lines.push(format!("{} {}", prefix, truncate(name, width.saturating_sub(3))));
    }

    lines
}

fn render_right(window: &ContactWindow, focus: Focus, width: usize) -> Vec<String> {
    let form = &window.form;
    let value_width = width.saturating_sub(LABEL_WIDTH + 2);
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let prefix = selection_prefix(focus == Focus::Field(*field));
        let label = format!("{}:", field.label());
        let text = form.text(*field);

        let all: Vec<&str> = text.split('\n').collect();
        let shown = if field.is_multiline() && all.len() > ADDRESS_ROWS {
            // Follow the end while typing, otherwise show the start
            if focus == Focus::Field(*field) {
                &all[all.len() - ADDRESS_ROWS..]
            } else {
                &all[..ADDRESS_ROWS]
            }
        } else {
            &all[..]
        };

        let mut parts = shown.iter();
        let first = parts.next().copied().unwrap_or("");
        lines.push(format!(
            "{}{:<w$}{}",
            prefix,
            label,
            truncate(first, value_width),
            w = LABEL_WIDTH
        ));
        for more in parts {
            lines.push(format!(
                "  {:<w$}{}",
                "",
                truncate(more, value_width),
                w = LABEL_WIDTH
            ));
        }
    }

    lines.push(format!(
        "{}{:<w$}< {} >",
        selection_prefix(focus == Focus::Category),
        "Category:",
        form.category,
        w = LABEL_WIDTH
    ));
    lines.push(String::new());

    let buttons: Vec<String> = [(Focus::Add, "Add"), (Focus::Update, "Update"), (Focus::Delete, "Delete")]
        .iter()
        .map(|(f, label)| {
            if focus == *f {
                format!(">[{}]", label)
            } else {
                format!("[{}]", label)
            }
        })
        .collect();
    lines.push(format!("  {}", buttons.join(" ")));

    lines
}

// ============================================================================
// Dialogs
// ============================================================================

/// Box-drawn dialog lines, sized to the longest text line
pub fn dialog_lines(title: &str, message: &str, hint: &str) -> Vec<String> {
    let inner = [title, message, hint]
        .iter()
        .map(|s| s.width())
        .max()
        .unwrap_or(0)
        + 2;

    let row = |s: &str| format!("│{}│", fit(&format!(" {}", s), inner));
    vec![
        format!("┌{}┐", "─".repeat(inner)),
        row(title),
        row(""),
        row(message),
        row(""),
        row(hint),
        format!("└{}┘", "─".repeat(inner)),
    ]
}

/// Dialogs drawn over the window, answered with a single key
struct TerminalDialogs<'t> {
    term: &'t mut Term,
}

impl TerminalDialogs<'_> {
    fn show(&mut self, lines: &[String]) {
        let (width, height) = term_size();
        let box_width = lines.first().map(|l| l.width()).unwrap_or(0);
        let col = width.saturating_sub(box_width) / 2;
        let top = height.saturating_sub(lines.len()) / 2;

        for (i, line) in lines.iter().enumerate() {
            self.term.move_to(col as u16, (top + i) as u16);
            self.term.print(line);
        }
        self.term.flush();
    }

    fn read_key() -> Result<KeyCode> {
        loop {
            if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
                return Ok(code);
            }
        }
    }
}

impl Dialogs for TerminalDialogs<'_> {
    fn warning(&mut self, title: &str, message: &str) -> Result<()> {
        self.show(&dialog_lines(title, message, "[enter] ok"));
        loop {
            if matches!(Self::read_key()?, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                return Ok(());
            }
        }
    }

    fn confirm(&mut self, title: &str, question: &str) -> Result<bool> {
        self.show(&dialog_lines(title, question, "[y]es [n]o"));
        loop {
            match Self::read_key()? {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}
