// src/core/sanitize.rs

/// Decode the handful of entities the site emits in text cells.
/// `&amp;` goes last so `&amp;lt;` stays a literal `&lt;`.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Digits of the first number in `s`, thousands separators dropped.
/// "1,234 votes total" → Some("1234")
pub fn leading_number(s: &str) -> Option<String> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_once() {
        assert_eq!(normalize_entities("A&amp;B&nbsp;&lt;C&gt;"), "A&B <C>");
        assert_eq!(normalize_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn leading_number_skips_separators() {
        assert_eq!(leading_number("1,234 votes total").as_deref(), Some("1234"));
        assert_eq!(leading_number("  87 votes total, average 7.52").as_deref(), Some("87"));
        assert_eq!(leading_number("no votes"), None);
    }
}
