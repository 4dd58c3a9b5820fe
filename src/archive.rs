//! Lexical classification of raw model-archive text.
//!
//! Archives bundle named entries (theorems, lemmas, exercises) and tactic
//! scripts. Upload behavior depends on how many of each an archive contains,
//! so these scans run client-side on the raw text before any network call.
//! They are keyword heuristics, not a parse: malformed text degrades to
//! under- or over-counting, which callers accept. Real structural validation
//! belongs to the server-side parser.

use std::sync::LazyLock;

use regex::Regex;

/// Editor seed for a freshly opened upload dialog.
pub const NEW_ENTRY_TEMPLATE: &str =
    "ArchiveEntry \"New Entry\"\n\nProblem\n  /* fill in dL formula here */\nEnd.\nEnd.";

/// Fill-in-the-blank marker left in exercise models. A model containing it
/// is considered incomplete.
pub const INCOMPLETE_MARKER: &str = "__________";

/// A labeled block: entry keyword, optional whitespace, double-quoted label.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:Theorem|Lemma|ArchiveEntry|Exercise)\s*"[^"]*""#)
        .expect("entry pattern is valid")
});

/// A labeled tactic block.
static TACTIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Tactic\s*"[^"]*""#).expect("tactic pattern is valid"));

/// Number of named archive entries (Theorem/Lemma/ArchiveEntry/Exercise) in
/// `content`. Non-overlapping matches; 0 for empty input.
pub fn count_entries(content: &str) -> usize {
    ENTRY_PATTERN.find_iter(content).count()
}

/// Number of named tactics in `content`.
pub fn count_tactics(content: &str) -> usize {
    TACTIC_PATTERN.find_iter(content).count()
}

/// Whether model source text is complete, i.e. contains no fill-in marker.
pub fn is_complete(content: &str) -> bool {
    !content.contains(INCOMPLETE_MARKER)
}

/// Default model name for an uploaded file: the file name up to the first
/// `.`, or the whole name if it has none. Used only when the uploaded
/// content contains no named entries.
pub fn default_model_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(count_entries(""), 0);
        assert_eq!(count_tactics(""), 0);
    }

    #[test]
    fn counts_each_entry_keyword() {
        assert_eq!(count_entries(r#"Theorem "x""#), 1);
        assert_eq!(count_entries(r#"Lemma "invariant holds""#), 1);
        assert_eq!(count_entries(r#"ArchiveEntry "Water tank""#), 1);
        assert_eq!(count_entries(r#"Exercise "Fill in the loop invariant""#), 1);
    }

    #[test]
    fn counts_multiple_entries() {
        let archive = "ArchiveEntry \"A\".\nArchiveEntry \"B\".";
        assert_eq!(count_entries(archive), 2);

        let mixed = "Theorem \"t\"\nLemma \"l\"\nExercise \"e\"";
        assert_eq!(count_entries(mixed), 3);
    }

    #[test]
    fn keyword_without_label_not_counted() {
        assert_eq!(count_entries("Theorem x End."), 0);
        assert_eq!(count_tactics("Tactic auto End."), 0);
    }

    #[test]
    fn whitespace_between_keyword_and_label_allowed() {
        assert_eq!(count_entries("Theorem   \"spaced out\""), 1);
        assert_eq!(count_entries("Theorem\"tight\""), 1);
        assert_eq!(count_tactics("Tactic\n\"on next line\""), 1, "newline counts as whitespace");
        assert_eq!(count_tactics("Tactic \"t1\""), 1);
    }

    #[test]
    fn counts_tactics_independently_of_entries() {
        let archive = "ArchiveEntry \"A\"\nTactic \"t1\"\nTactic \"t2\"\nEnd.";
        assert_eq!(count_entries(archive), 1);
        assert_eq!(count_tactics(archive), 2);
    }

    #[test]
    fn template_is_a_single_anonymous_entry() {
        assert_eq!(count_entries(NEW_ENTRY_TEMPLATE), 1);
        assert_eq!(count_tactics(NEW_ENTRY_TEMPLATE), 0);
    }

    #[test]
    fn completeness_marker_detection() {
        assert!(is_complete("Problem x>0 -> [x:=x+1;]x>0 End."));
        assert!(!is_complete("Problem __________ End."));
        assert!(is_complete(""));
    }

    #[test]
    fn default_name_strips_extension() {
        assert_eq!(default_model_name("bouncing-ball.kyx"), "bouncing-ball");
        assert_eq!(default_model_name("lab2.solution.kyx"), "lab2");
        assert_eq!(default_model_name("noextension"), "noextension");
    }
}
