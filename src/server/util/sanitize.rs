//! Sanitizers for values submitted to the settings API and for redirect targets.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static INLINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static UNSAFE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<iframe\b.*?</iframe\s*>|<object\b.*?</object\s*>|<embed\b.*?</embed\s*>",
    )
    .unwrap()
});

// Leftover opening or closing tags of unsafe elements that were never closed
static UNSAFE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(script|style|iframe|object|embed)\b[^>]*>").unwrap()
});

static EVENT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

static JAVASCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(href|src|action)\s*=\s*("\s*javascript:[^"]*"|'\s*javascript:[^']*'|javascript:[^\s>]*)"#,
    )
    .unwrap()
});

// Anything outside the characters a redirect target may carry
static REDIRECT_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-~+_.?#=&;,/:%!*\[\]()@]").unwrap());

static ENCODED_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%0[ad0]").unwrap());

/// Strips tags, collapses every whitespace run (line breaks included) into one space and trims.
pub fn text_field(input: &str) -> String {
    let stripped = TAG.replace_all(input, "");

    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Strips tags while keeping line structure, each line is trimmed and blank lines are dropped.
pub fn textarea_field(input: &str) -> String {
    let stripped = TAG.replace_all(input, "");

    stripped
        .lines()
        .map(|line| INLINE_WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes scriptable content from an HTML template while keeping regular markup.
///
/// Drops `script`, `style`, `iframe`, `object` & `embed` elements, inline `on*` event handlers
/// and `javascript:` URLs.
pub fn html_template(input: &str) -> String {
    let html = UNSAFE_ELEMENT.replace_all(input, "");
    let html = UNSAFE_TAG.replace_all(&html, "");
    let html = EVENT_ATTRIBUTE.replace_all(&html, "");
    let html = JAVASCRIPT_URL.replace_all(&html, r##"$1="#""##);

    html.trim().to_string()
}

/// Makes a redirect target safe to send as a `Location` header.
///
/// Spaces & non-ASCII characters are percent-encoded, every other character outside the URL
/// character set is dropped and encoded CR, LF & NUL sequences are removed until none remain.
pub fn redirect_location(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());

    for c in input.chars() {
        if c == ' ' {
            encoded.push_str("%20");
        } else if c.is_ascii() {
            encoded.push(c);
        } else {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }

    let mut location = REDIRECT_DISALLOWED.replace_all(&encoded, "").into_owned();

    while ENCODED_CONTROL.is_match(&location) {
        location = ENCODED_CONTROL.replace_all(&location, "").into_owned();
    }

    location
}
