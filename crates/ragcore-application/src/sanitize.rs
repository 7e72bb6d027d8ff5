//! Filename sanitization and safe path allocation (§4.3).

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

const SUFFIX_LEN: usize = 12;
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn non_word_dot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\w.]").expect("static regex is valid"))
}

/// Strip non-word characters (anything not `[A-Za-z0-9_]`) other than `.`,
/// then turn spaces into underscores.
///
/// The strip runs first and already removes spaces, so the underscore pass
/// never has anything left to match (§4.3) — kept as-is rather than
/// reordered into a different output.
///
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`, since the output
/// alphabet (`\w` plus `.` plus `_`) is a fixed point of the same
/// transformation.
#[must_use]
pub fn sanitize_filename(original: &str) -> String {
    let trimmed = original.trim();
    let stripped = non_word_dot_pattern().replace_all(trimmed, "");
    stripped.replace(' ', "_")
}

/// Generate a random alphanumeric suffix of [`SUFFIX_LEN`] characters.
#[must_use]
pub fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_ALPHABET.len());
            SUFFIX_ALPHABET[idx] as char
        })
        .collect()
}

/// Build a stored filename candidate: `<suffix>_<sanitized>`. Callers
/// regenerate the suffix and retry while the candidate collides with an
/// existing name (§4.3, "On collision ... a new suffix is generated until
/// unique").
#[must_use]
pub fn build_stored_name(original_file_name: &str) -> String {
    let clean = sanitize_filename(original_file_name);
    format!("{}_{clean}", random_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_special_characters() {
        // The `[^\w.]` strip already removes the space before the
        // `.replace(' ', "_")` pass ever sees it, so no underscore appears.
        assert_eq!(sanitize_filename("my file!@#.txt"), "myfile.txt");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_filename("weird/name?.pdf");
        let twice = sanitize_filename(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn random_suffix_has_expected_length() {
        assert_eq!(random_suffix().chars().count(), SUFFIX_LEN);
    }

    #[test]
    fn stored_name_keeps_the_extension() {
        let name = build_stored_name("report final.docx");
        assert!(name.ends_with("_reportfinal.docx"));
    }
}
