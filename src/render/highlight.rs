//! Per-line filtering and keyword colorization.
//!
//! Keywords are matched as literal text, ignoring case. A line is scanned once
//! from left to right; at each position the keywords are tried in the rule
//! set's precedence order (longest first) and the first hit is wrapped in its
//! color sequence plus a reset. Wrapped text is never rescanned, so markers
//! never nest even when keywords overlap.

use crate::rules::{HighlightColor, RuleSet};
use ratatui::crossterm::style::{Color, ResetColor, SetForegroundColor};
use ratatui::crossterm::Command;
use std::borrow::Cow;

/// Terminal foreground color for a highlight color, `None` for no styling
pub fn terminal_color(color: HighlightColor) -> Option<Color> {
    match color {
        HighlightColor::Default => None,
        HighlightColor::Red => Some(Color::DarkRed),
        HighlightColor::Green => Some(Color::DarkGreen),
        HighlightColor::Yellow => Some(Color::DarkYellow),
        HighlightColor::Blue => Some(Color::DarkBlue),
        HighlightColor::Magenta => Some(Color::DarkMagenta),
        HighlightColor::Cyan => Some(Color::DarkCyan),
    }
}

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = command.write_ansi(&mut out);
    out
}

/// Escape sequence emitted before a highlighted keyword
pub fn start_sequence(color: HighlightColor) -> String {
    match terminal_color(color) {
        Some(fg) => ansi(SetForegroundColor(fg)),
        None => ansi(ResetColor),
    }
}

/// Escape sequence emitted after every highlighted keyword
pub fn reset_sequence() -> String {
    ansi(ResetColor)
}

/// Applies one rule set to lines. Escape sequences are computed once per styler.
pub struct LineStyler<'r> {
    rules: &'r RuleSet,
    prefixes: Vec<String>,
    reset: String,
}

impl<'r> LineStyler<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        let prefixes = rules
            .keywords()
            .iter()
            .map(|keyword| start_sequence(keyword.color()))
            .collect();
        Self {
            rules,
            prefixes,
            reset: reset_sequence(),
        }
    }

    /// Filter and highlight a line. `None` when the filter rejects it.
    pub fn style<'a>(&self, line: &'a str) -> Option<Cow<'a, str>> {
        if !self.rules.matches_filter(line) {
            return None;
        }
        Some(self.highlight(line))
    }

    /// Wrap every keyword occurrence in `line`, ignoring the filter.
    pub fn highlight<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let keywords = self.rules.keywords();
        if keywords.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut styled: Option<String> = None;
        let mut copied_to = 0;
        let mut pos = 0;

        while pos < line.len() {
            let hit = keywords.iter().enumerate().find_map(|(idx, keyword)| {
                keyword
                    .pattern()
                    .match_len_at(line, pos)
                    .map(|len| (idx, len))
            });

            match hit {
                Some((idx, len)) => {
                    let out = styled.get_or_insert_with(|| String::with_capacity(line.len() + 32));
                    out.push_str(&line[copied_to..pos]);
                    out.push_str(&self.prefixes[idx]);
                    out.push_str(&line[pos..pos + len]);
                    out.push_str(&self.reset);
                    pos += len;
                    copied_to = pos;
                }
                None => {
                    pos += line[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        match styled {
            Some(mut out) => {
                out.push_str(&line[copied_to..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(line),
        }
    }
}

/// Highlight a single line with `rules`, ignoring the filter
pub fn highlight_line<'a>(line: &'a str, rules: &RuleSet) -> Cow<'a, str> {
    LineStyler::new(rules).highlight(line)
}
