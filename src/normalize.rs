//! HTML tag normalization.
//!
//! A fixed, ordered list of literal rewrites applied to serialized HTML.
//! Each rule runs over the output of the previous one and replaces every
//! occurrence.

use std::sync::LazyLock;

use regex::Regex;

/// Rewrite rules in application order.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [("<em>", "<i>"), ("</em>", "</i>"), ("<br>", "<br />")]
        .into_iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&regex::escape(pattern))
                .expect("RULES: hardcoded regex is valid");
            (re, replacement)
        })
        .collect()
});

/// Apply every normalization rule to `html`.
///
/// Total and idempotent: input without matches comes back unchanged, and
/// none of the replacements produce text another rule matches.
pub fn normalize(html: &str) -> String {
    RULES
        .iter()
        .fold(html.to_owned(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}
