// src/utils/html.rs

use ammonia::Builder;

/// Reduces admin-entered text to plain text before it is stored.
///
/// The quiz page shows question text as text, never as markup, so every tag
/// is stripped (script and style bodies included) and the entities the
/// sanitizer writes back are decoded. `Is 3 < 5 & 7 > 2?` is stored as
/// typed. Surrounding whitespace is trimmed.
pub fn clean_html(input: &str) -> String {
    let cleaned = Builder::empty().clean(input.trim()).to_string();
    decode_entities(&cleaned)
}

/// Undoes the text-node escaping of the HTML serializer. `&amp;` goes last
/// so `&amp;lt;` decodes to `&lt;` and not `<`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
