//! Line-local mitigation heuristics for reducing false positives.
//!
//! Raw-input and unescaped-output rules fire on syntactic shapes that are
//! frequently accompanied by a sanitizer or escaper on the same line. Before
//! a match in one of those categories becomes a finding, the line is checked
//! for known mitigating tokens; any hit drops the match. The check never
//! looks at surrounding lines, so a sanitizer applied to a different
//! variable on the same line suppresses too eagerly and one on a prior line
//! not at all. Results are a first pass and need manual review.

use crate::rules::types::Category;

/// Tokens that sanitize, coerce, or guard raw request input.
const INPUT_MITIGATORS: &[&str] = &[
    "sanitize_text_field(",
    "sanitize_key(",
    "sanitize_email(",
    "sanitize_file_name(",
    "sanitize_title(",
    "sanitize_user(",
    "absint(",
    "intval(",
    "(int)",
    "(float)",
    "floatval(",
    "filter_input(",
    "filter_var(",
    "wp_verify_nonce(",
    "check_admin_referer(",
    "check_ajax_referer(",
    "isset(",
    "empty(",
    "array_key_exists(",
];

/// Tokens that escape or neutralize output before it reaches a response.
const OUTPUT_MITIGATORS: &[&str] = &[
    "esc_html",
    "esc_attr",
    "esc_url",
    "esc_js",
    "esc_textarea",
    "wp_kses",
    "htmlspecialchars(",
    "htmlentities(",
    "rawurlencode(",
    "urlencode(",
    "absint(",
    "intval(",
    "(int)",
    "number_format(",
];

/// Returns true when `line` carries a recognized mitigating construct for
/// the given rule category. Only raw-input and unsafe-output findings are
/// eligible for suppression; every other category reports unconditionally.
pub fn is_mitigated(category: Category, line: &str) -> bool {
    let mitigators: &[&str] = match category {
        Category::RawInput => INPUT_MITIGATORS,
        Category::UnsafeOutput => OUTPUT_MITIGATORS,
        _ => return false,
    };

    mitigators.iter().any(|token| line.contains(token))
}
