//! Token-budgeted snippet assembly

/// Characters per estimated token
pub const CHARS_PER_TOKEN: usize = 4;
/// Leading characters of each file copied into the snippet
pub const MAX_EXCERPT_CHARS: usize = 2000;
/// Absolute ceiling on the finished snippet
pub const MAX_SNIPPET_CHARS: usize = 8000;

/// Deterministic token estimate: characters / 4, rounded up
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// The first `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Accumulates per-file excerpts until the token budget is spent
#[derive(Debug, Clone)]
pub struct SnippetBudget {
    max_tokens: usize,
    snippet: String,
    chars: usize,
    skipped: usize,
}

impl SnippetBudget {
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            snippet: String::new(),
            chars: 0,
            skipped: 0,
        }
    }

    /// Estimated tokens used so far
    pub fn used_tokens(&self) -> usize {
        self.chars.div_ceil(CHARS_PER_TOKEN)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used_tokens() >= self.max_tokens
    }

    /// Files turned away because the budget was already spent
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Append a header for `path` and an excerpt of `content`, unless the
    /// snippet is already at or over budget. Returns whether it was added.
    pub fn offer(&mut self, path: &str, content: &str) -> bool {
        if self.is_exhausted() {
            self.skipped += 1;
            tracing::debug!(path, used = self.used_tokens(), "token budget spent, excerpt skipped");
            return false;
        }

        let entry = format!(
            "\n// File: {}\n{}\n",
            path,
            truncate_chars(content, MAX_EXCERPT_CHARS)
        );
        self.chars += entry.chars().count();
        self.snippet.push_str(&entry);
        true
    }

    /// The snippet, cut to the absolute character ceiling
    pub fn finish(self) -> String {
        truncate_chars(&self.snippet, MAX_SNIPPET_CHARS).to_string()
    }
}
