//! Markup-entity decoding for display text.
//!
//! The question bank escapes quotes, ampersands and accented letters as HTML
//! entities. Only the presentation layer decodes them; answers are always
//! submitted in their raw form.

/// Replace named and numeric entities. Unknown entities are left as-is.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
