//! Conversion of Android string values into iOS `.strings` values.
//!
//! Android and iOS agree on backslash escapes but not on everything else:
//! translators sometimes leave doubled quotes behind, Android tolerates bare
//! quotes, and Android placeholders (`%s`, `%02d`) become `%@` on iOS.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PRINTF_PLACEHOLDER: Regex = Regex::new(r"%.*?[ds]").unwrap();
}

/// Converts a raw Android value into a value safe to write between the quotes
/// of a `.strings` entry.
///
/// The steps run in a fixed order:
/// 1. doubled quotes collapse into one (`\""` becomes `\"`);
/// 2. every quote not preceded by a backslash gets one;
/// 3. `%` up to the nearest `d` or `s` becomes `%@`.
pub fn normalize_value(raw: &str) -> String {
    let collapsed = raw.replace("\"\"", "\"");
    let escaped = escape_bare_quotes(&collapsed);
    to_ios_placeholders(&escaped)
}

/// Prefixes every unescaped `"` with a backslash.
///
/// A quote at position 0 has nothing before it and is always escaped.
pub fn escape_bare_quotes(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut prev: Option<char> = None;
    for c in value.chars() {
        if c == '"' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Replaces printf-style `d`/`s` placeholders with the iOS object placeholder.
pub fn to_ios_placeholders(value: &str) -> String {
    PRINTF_PLACEHOLDER.replace_all(value, "%@").into_owned()
}

/// Whether a raw value carries the doubled escaped-quote artifact some
/// translation tools produce (`\""\""`).
pub fn is_questionable(raw: &str) -> bool {
    raw.contains(r#"\""\"""#)
}
