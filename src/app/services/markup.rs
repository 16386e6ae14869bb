/// Escape text for use inside element content or a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// ` checked` when set, nothing otherwise
pub fn checked_attr(checked: bool) -> &'static str {
    if checked { " checked" } else { "" }
}
