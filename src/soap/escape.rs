//! Escaping of reserved characters in the text handed to the typograf.
//!
//! The upstream expects HTML-ish input, so `&`, `<` and `>` are turned into
//! entities before the text is put into the envelope. Quotes are left alone:
//! converting them is the upstream's job.

use quick_xml::escape::partial_escape;

/// Escape `&`, `<` and `>` in a single left-to-right pass.
///
/// Ampersands produced by a substitution are never revisited, so `<` always
/// becomes `&lt;` and never `&amp;lt;`.
pub fn escape(text: &str) -> String {
    partial_escape(text).into_owned()
}
