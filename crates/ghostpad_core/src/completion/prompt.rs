//! Prompt construction and response cleanup for inline completions.

use crate::constants::{
    CONTEXT_LINES_AFTER, CONTEXT_LINES_BEFORE, MAX_COMPLETION_CHARS, MIN_CONTEXT_CHARS,
    WORD_BREAK_SENTINEL,
};
use crate::text::{char_len, split_at_char};

const SENTENCE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

const SYSTEM_PROMPT: &str = "You are an inline writing assistant. Continue the user's text \
exactly at the cursor. Reply with the continuation only: between 1 and 20 words, no quotes, \
no explanations, and never repeat text that already exists before or after the cursor.";

/// What sits immediately before the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBoundary {
    /// Whitespace (or nothing): the completion starts flush.
    Start,
    /// Sentence punctuation: the completion gets a separating space.
    Punctuation,
    /// Inside a word: the model decides between continuing it and starting a
    /// new one, signalled by the word-break sentinel.
    MidWord,
}

impl WordBoundary {
    fn after(before_cursor: &str) -> Self {
        match before_cursor.chars().last() {
            None => Self::Start,
            Some(ch) if ch.is_whitespace() => Self::Start,
            Some(ch) if SENTENCE_PUNCTUATION.contains(&ch) => Self::Punctuation,
            Some(_) => Self::MidWord,
        }
    }
}

/// The local text surrounding a cursor, trimmed to what the provider sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    lines_before: String,
    lines_after: String,
    boundary: WordBoundary,
}

/// System and user messages for a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub system: String,
    pub user: String,
}

impl CompletionContext {
    /// Capture context around char offset `cursor` (clamped to the text).
    ///
    /// # Returns
    /// `None` when fewer than 20 chars precede the cursor.
    pub fn new(text: &str, cursor: usize) -> Option<Self> {
        let (before, after) = split_at_char(text, cursor);
        if char_len(before) < MIN_CONTEXT_CHARS {
            return None;
        }

        let before_lines: Vec<&str> = before.split('\n').collect();
        let start = before_lines.len().saturating_sub(CONTEXT_LINES_BEFORE);
        let lines_before = before_lines[start..].join("\n");
        let lines_after = after
            .split('\n')
            .take(CONTEXT_LINES_AFTER)
            .collect::<Vec<_>>()
            .join("\n");

        Some(Self {
            lines_before,
            lines_after,
            boundary: WordBoundary::after(before),
        })
    }

    pub fn boundary(&self) -> WordBoundary {
        self.boundary
    }

    pub fn lines_before(&self) -> &str {
        &self.lines_before
    }

    pub fn lines_after(&self) -> &str {
        &self.lines_after
    }

    /// Render the provider prompt for this context.
    pub fn prompt(&self) -> CompletionPrompt {
        let mut user = format!(
            "Text before the cursor:\n{}\n\nText after the cursor:\n{}\n\n\
             Write only the text that belongs at the cursor.",
            self.lines_before, self.lines_after
        );
        if self.boundary == WordBoundary::MidWord {
            user.push_str(&format!(
                "\nThe cursor is directly after a partial word. If your continuation starts \
                 a new word, begin your reply with {} and nothing else before it. If it \
                 finishes the current word, continue without a leading space.",
                WORD_BREAK_SENTINEL
            ));
        }
        CompletionPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}

/// Clean raw provider output into an insertable suggestion.
///
/// Strips the word-break sentinel and normalizes the leading whitespace to
/// match the cursor's [`WordBoundary`].
///
/// # Returns
/// `None` for empty output, output longer than 100 chars, or output that
/// contains a blank line.
pub fn post_process(raw: &str, context: &CompletionContext) -> Option<String> {
    if raw.contains("\n\n") {
        return None;
    }
    let trimmed = raw.trim_end();

    let unindented = trimmed.trim_start();
    let (wants_break, body) = match unindented.strip_prefix(WORD_BREAK_SENTINEL) {
        Some(rest) => (true, rest.trim_start()),
        None => (unindented.len() != trimmed.len(), unindented),
    };
    if body.is_empty() {
        return None;
    }

    let completion = match context.boundary {
        WordBoundary::Start => body.to_string(),
        WordBoundary::MidWord if wants_break => format!(" {}", body),
        WordBoundary::MidWord => body.to_string(),
        WordBoundary::Punctuation if body.starts_with(SENTENCE_PUNCTUATION) => body.to_string(),
        WordBoundary::Punctuation => format!(" {}", body),
    };

    if char_len(&completion) > MAX_COMPLETION_CHARS {
        return None;
    }
    Some(completion)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_at_end(text: &str) -> CompletionContext {
        CompletionContext::new(text, char_len(text)).expect("enough context")
    }

    #[test]
    fn context_requires_twenty_chars_before_cursor() {
        assert!(CompletionContext::new("nineteen chars here", 19).is_none());
        assert!(CompletionContext::new("exactly twenty chars", 20).is_some());
        // Text after the cursor does not count.
        assert!(CompletionContext::new("short | plus a long tail after it", 5).is_none());
    }

    #[test]
    fn context_keeps_three_lines_before_and_two_after() {
        let text = "one\ntwo\nthree\nfour five six seven\neight\nnine\nten";
        let cursor = char_len("one\ntwo\nthree\nfour five six seven");
        let context = CompletionContext::new(text, cursor).expect("context");
        assert_eq!(context.lines_before(), "two\nthree\nfour five six seven");
        assert_eq!(context.lines_after(), "\neight");
    }

    #[test]
    fn boundary_follows_the_char_before_the_cursor() {
        assert_eq!(
            context_at_end("a sentence that ends. ").boundary(),
            WordBoundary::Start
        );
        assert_eq!(
            context_at_end("a sentence that ends.").boundary(),
            WordBoundary::Punctuation
        );
        assert_eq!(
            context_at_end("a sentence that is mid-wor").boundary(),
            WordBoundary::MidWord
        );
    }

    #[test]
    fn sentinel_instruction_only_for_mid_word_cursors() {
        let mid = context_at_end("a sentence that is mid-wor").prompt();
        assert!(mid.user.contains(WORD_BREAK_SENTINEL));
        let start = context_at_end("a sentence that ends. ").prompt();
        assert!(!start.user.contains(WORD_BREAK_SENTINEL));
        assert!(start.system.contains("20 words"));
    }

    #[test]
    fn mid_word_sentinel_becomes_a_single_space() {
        let context = context_at_end("I would like to say hello");
        assert_eq!(
            post_process("[SPACE]   world", &context).as_deref(),
            Some(" world")
        );
        assert_eq!(post_process("  world", &context).as_deref(), Some(" world"));
        assert_eq!(post_process("ish\n", &context).as_deref(), Some("ish"));
    }

    #[test]
    fn start_boundary_never_gets_a_leading_space() {
        let context = context_at_end("I would like to say ");
        assert_eq!(
            post_process("[SPACE] hello", &context).as_deref(),
            Some("hello")
        );
        assert_eq!(post_process("   hello", &context).as_deref(), Some("hello"));
    }

    #[test]
    fn punctuation_boundary_gets_one_space_unless_more_punctuation() {
        let context = context_at_end("That settles it, then.");
        assert_eq!(
            post_process("Next we eat.", &context).as_deref(),
            Some(" Next we eat.")
        );
        assert_eq!(post_process("..", &context).as_deref(), Some(".."));
    }

    #[test]
    fn runaway_and_empty_outputs_are_discarded() {
        let context = context_at_end("I would like to say ");
        assert_eq!(post_process("", &context), None);
        assert_eq!(post_process("  \n ", &context), None);
        assert_eq!(post_process("[SPACE]", &context), None);
        assert_eq!(post_process("one\n\ntwo", &context), None);
        assert_eq!(post_process("hello there\n\n", &context), None);
        assert_eq!(post_process(&"x".repeat(101), &context), None);
        assert_eq!(
            post_process(&"x".repeat(100), &context),
            Some("x".repeat(100))
        );
        assert_eq!(
            post_process("line one\nline two", &context).as_deref(),
            Some("line one\nline two")
        );
    }
}
