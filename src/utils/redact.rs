use once_cell::sync::Lazy;
use regex::Regex;

const INLINE_REDACTION: &str = "***REDACTED***";

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~+/=-]{8,})").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b")
                .expect("inline redaction regex"),
            INLINE_REDACTION,
        ),
        (
            Regex::new(r#"(?i)("?(?:token|password|secret)"?\s*[:=]\s*"?)([^"\s,}]{4,})"#)
                .expect("inline redaction regex"),
            "${1}***REDACTED***",
        ),
    ]
});

/// Scrubs credentials that may appear in log lines or echoed error bodies.
pub fn redact_text(value: &str) -> String {
    let mut out = value.to_string();
    for (pattern, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if pattern.is_match(&out) {
            out = pattern.replace_all(&out, *replacement).into_owned();
        }
    }
    out
}

/// `********...wxyz` for long secrets, all stars for short ones.
pub fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 8 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}...{}", "*".repeat(8), tail)
}
