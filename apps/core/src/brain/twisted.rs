//! Heuristics for "twisted" questions: unclear, indirect, trick, or garbled
//! input that deserves a more forgiving matching pass and varied phrasing.
//!
//! Pure predicate over the lowercased, trimmed question. Any single heuristic
//! firing makes the whole predicate true. Empty input is NOT twisted so it
//! stays on the standard empty-input path.

use std::sync::LazyLock;

use regex::Regex;

/// One-word inputs that are direct commands, not garbled questions.
const SINGLE_WORD_COMMANDS: &[&str] = &["help", "about", "projects", "skills", "contact", "clear"];

/// A word this long is almost certainly keyboard mashing.
const GIBBERISH_WORD_LEN: usize = 20;

// Compile patterns once at startup
static ONLY_NON_LETTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^a-z]*$").expect("Invalid regex: only non-letters pattern")
});
static CONSECUTIVE_QUESTION_MARKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\?{2,}").expect("Invalid regex: consecutive question marks pattern")
});
static LEADING_ISOLATED_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]\s+[a-z]").expect("Invalid regex: isolated letters pattern")
});
static GIBBERISH_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[a-z]{{{GIBBERISH_WORD_LEN},}}"))
        .expect("Invalid regex: gibberish run pattern")
});
static ONLY_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^a-z0-9\s]+$").expect("Invalid regex: only symbols pattern")
});

/// Classify a question as twisted.
pub fn is_twisted(question: &str) -> bool {
    let q = question.trim().to_lowercase();
    if q.is_empty() {
        return false;
    }

    // unclear phrasing
    if q.chars().count() < 3 {
        return true;
    }
    if q.split_whitespace().count() == 1 && !SINGLE_WORD_COMMANDS.contains(&q.as_str()) {
        return true;
    }
    if ONLY_NON_LETTERS.is_match(&q) {
        return true;
    }

    // indirect questions missing a clarifying verb
    if q.starts_with("can you") && !q.contains("tell") && !q.contains("show") {
        return true;
    }
    if q.starts_with("do you") && !q.contains("know") && !q.contains("have") {
        return true;
    }
    if CONSECUTIVE_QUESTION_MARKS.is_match(&q) {
        return true;
    }

    // trick questions outside any portfolio's domain
    if q.contains("what is") && (q.contains("meaning of life") || q.contains("purpose")) {
        return true;
    }
    if q.contains("who am i") {
        return true;
    }
    if q.contains("what time") || q.contains("what date") || q.contains("what day") {
        return true;
    }
    if q.contains("weather") || q.contains("temperature") {
        return true;
    }

    // unusual patterns
    if LEADING_ISOLATED_LETTER.is_match(&q) {
        return true;
    }
    if q.chars().filter(|c| *c == '?').count() > 2 {
        return true;
    }
    if GIBBERISH_RUN.is_match(&q) {
        return true;
    }

    // confusing input
    if q.contains("!!!!") {
        return true;
    }
    if ONLY_SYMBOLS.is_match(&q) {
        return true;
    }

    false
}
