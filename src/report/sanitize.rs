use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static FORBIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\?%*:|"<>° ]"#).unwrap());

/// Strip path delimiters, shell-unsafe characters, spaces and accents so a page
/// name can be used as a report filename.
pub fn sanitize(name: &str) -> String {
    let stripped = FORBIDDEN_RE.replace_all(name, "");
    let unaccented = remove_accents(&stripped);
    // Decomposition can expose forbidden characters, e.g. '≮' → '<' + U+0338.
    FORBIDDEN_RE.replace_all(&unaccented, "").into_owned()
}

fn remove_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

// Combining Diacritical Marks block only, other combining ranges are kept.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

// ── Tests ──
