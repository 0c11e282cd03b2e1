//! Post slugs.

use deunicode::deunicode;

/// Turn a content file stem into a URL slug.
///
/// Non-ASCII text is transliterated first, then everything except ASCII
/// alphanumerics is dropped. Runs of whitespace, `-` and `_` collapse into
/// a single `-`, never leading or trailing.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Crème brûlée"), "creme-brulee");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut result = String::with_capacity(ascii.len());
    let mut last_was_dash = true; // Prevents leading dash

    for c in ascii.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
