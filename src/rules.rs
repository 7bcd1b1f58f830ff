//! Rule Store: the active line filter and keyword highlight rules.
//!
//! A [`RuleSet`] is an immutable value built once per configuration load. The
//! [`RuleStore`] hands out `Arc` snapshots of the current set and replaces it
//! wholesale on reload, so readers never observe a half-built rule set.

use memchr::memmem;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Display color for a highlighted keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightColor {
    /// No visible styling
    #[default]
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl HighlightColor {
    /// Resolve a color name (case-insensitive). Unknown names yield `Default`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            _ => Self::Default,
        }
    }
}

/// Literal text matched case-insensitively.
///
/// Containment folds both strings with full lowercasing, so characters that
/// lowercase to several characters still match. Positional matching used for
/// highlighting compares one character at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralPattern {
    text: String,
    chars: Vec<char>,
    lowered: String,
}

impl LiteralPattern {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        let lowered = text.to_lowercase();
        Self {
            text,
            chars,
            lowered,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Byte length of the match starting at `start` in `haystack`, if the pattern
    /// matches there. `start` must lie on a char boundary.
    pub fn match_len_at(&self, haystack: &str, start: usize) -> Option<usize> {
        let mut rest = haystack[start..].chars();
        let mut len = 0;
        for &expected in &self.chars {
            let found = rest.next()?;
            if !chars_eq_ignore_case(found, expected) {
                return None;
            }
            len += found.len_utf8();
        }
        Some(len)
    }

    /// Whether `haystack` contains the pattern anywhere. An empty pattern is
    /// contained in every string.
    pub fn is_found_in(&self, haystack: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        let folded = if haystack.is_ascii() {
            haystack.to_ascii_lowercase()
        } else {
            haystack.to_lowercase()
        };
        memmem::find(folded.as_bytes(), self.lowered.as_bytes()).is_some()
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// A keyword registered for highlighting together with its color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pattern: LiteralPattern,
    color: HighlightColor,
}

impl Keyword {
    pub fn text(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn color(&self) -> HighlightColor {
        self.color
    }

    pub fn pattern(&self) -> &LiteralPattern {
        &self.pattern
    }
}

/// Immutable filter and highlight rules.
///
/// Keywords are kept in match precedence order: longer keywords first, ties in
/// lexical order of the keyword text. The renderer tries them in this order at
/// every position, so the longest keyword wins where several overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    filter: LiteralPattern,
    keywords: Vec<Keyword>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new("", BTreeMap::new())
    }
}

impl RuleSet {
    /// Build a rule set. Empty keywords are dropped since they would match
    /// between every pair of characters.
    pub fn new(filter: impl Into<String>, highlights: BTreeMap<String, HighlightColor>) -> Self {
        let mut keywords: Vec<Keyword> = highlights
            .into_iter()
            .filter(|(text, _)| !text.is_empty())
            .map(|(text, color)| Keyword {
                pattern: LiteralPattern::new(text),
                color,
            })
            .collect();
        // Stable sort keeps the BTreeMap's lexical order among equal lengths
        keywords.sort_by_key(|keyword| std::cmp::Reverse(keyword.pattern.chars.len()));

        Self {
            filter: LiteralPattern::new(filter),
            keywords,
        }
    }

    pub fn filter(&self) -> &str {
        self.filter.as_str()
    }

    /// Keywords in match precedence order
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Color registered for `keyword` (exact key lookup)
    pub fn color_for(&self, keyword: &str) -> Option<HighlightColor> {
        self.keywords
            .iter()
            .find(|candidate| candidate.text() == keyword)
            .map(Keyword::color)
    }

    /// A line is displayed iff the filter is empty or the line contains it,
    /// ignoring case.
    pub fn matches_filter(&self, line: &str) -> bool {
        self.filter.is_found_in(line)
    }
}

/// Shared holder of the current [`RuleSet`].
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Current rules. The read lock is released before this returns.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&*self.current.read())
    }

    /// Swap in a new rule set, returning the one it replaced.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let next = Arc::new(rules);
        std::mem::replace(&mut *self.current.write(), next)
    }
}
