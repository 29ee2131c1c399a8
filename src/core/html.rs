// src/core/html.rs
//
// Low-level HTML string helpers. Deliberately naive: they scan text instead of
// building a DOM, matching tag and attribute names case-insensitively.
// Lowercasing is ASCII-only so byte offsets in the lowered copy line up with
// the original.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Inner HTML between the first `open_pat` tag and the next `close_pat`.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

/// Next `<tag …>…</tag>` block at or after `from`, as a byte span.
/// Does not handle nesting of the same tag; fine for `<tr>` and `<td>`.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a whole element block.
pub fn text_of(block: &str) -> String {
    strip_tags(normalize_entities(&inner_after_open_tag(block)))
}

/// Lowercased tag name of an opening tag (`<td class=…>` → "td").
/// None for closing tags, comments and doctypes.
pub fn tag_name(open_tag: &str) -> Option<String> {
    let name: String = open_tag
        .strip_prefix('<')?
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() { None } else { Some(name.to_ascii_lowercase()) }
}

/// Value of `attr` inside an opening tag. Quoted or bare values.
pub fn attr_value<'a>(open_tag: &'a str, attr: &str) -> Option<&'a str> {
    let lc = to_lower(open_tag);
    let needle = format!("{}=", to_lower(attr));
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();
        // must start a new attribute: `data-class=` is not `class=`
        if !lc[..at].ends_with(|c: char| c.is_whitespace()) {
            continue;
        }
        let rest = &open_tag[from..];
        return match rest.chars().next()? {
            q @ ('"' | '\'') => {
                let end = rest[1..].find(q)?;
                Some(&rest[1..1 + end])
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                    .unwrap_or(rest.len());
                Some(&rest[..end])
            }
        };
    }
    None
}

pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr_value(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Position of the next opening `<name` tag (whole tag name only) at or after `from`.
fn find_open_tag_lc(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = format!("<{name}");
    let mut pos = from;
    loop {
        let at = lc.get(pos..)?.find(&pat)? + pos;
        let after = lc[at + pat.len()..].chars().next();
        if matches!(after, Some(c) if c.is_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        pos = at + pat.len();
    }
}

/// Span of the element whose opening tag starts at `start`, through its
/// matching close tag. Counts nested tags of the same name.
pub fn element_span_ci(s: &str, name: &str, start: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let name = to_lower(name);
    let close_pat = format!("</{name}");
    let mut depth = 0usize;
    let mut pos = start;

    loop {
        let next_close = lc.get(pos..)?.find(&close_pat)? + pos;
        match find_open_tag_lc(&lc, &name, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + name.len() + 1;
            }
            _ => {
                let end = lc[next_close..].find('>')? + next_close + 1;
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some((start, end));
                }
                pos = end;
            }
        }
    }
}

/// First element at or after `from` whose opening tag satisfies `pred`.
pub fn find_element<F>(s: &str, from: usize, pred: F) -> Option<(usize, usize)>
where
    F: Fn(&str) -> bool,
{
    let mut pos = from;
    while let Some(rel) = s.get(pos..)?.find('<') {
        let start = pos + rel;
        let open_end = s[start..].find('>')? + start + 1;
        let open_tag = &s[start..open_end];
        if let Some(name) = tag_name(open_tag) {
            if pred(open_tag) {
                return element_span_ci(s, &name, start);
            }
        }
        pos = start + 1;
    }
    None
}

/// First element carrying `class` among its classes.
pub fn find_by_class<'a>(s: &'a str, class: &str) -> Option<&'a str> {
    find_element(s, 0, |tag| has_class(tag, class)).map(|(a, b)| &s[a..b])
}

/// Element with `id="…"`.
pub fn find_by_id<'a>(s: &'a str, id: &str) -> Option<&'a str> {
    find_element(s, 0, |tag| attr_value(tag, "id") == Some(id)).map(|(a, b)| &s[a..b])
}

/// Opening tag of a block (`<td class="tc1">` out of `<td class="tc1">x</td>`).
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

/// All `<tag>` blocks directly scanned from `s`, in order.
pub fn tag_blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((a, b)) = next_tag_block_ci(s, &open, &close, pos) {
        out.push(&s[a..b]);
        pos = b;
    }
    out
}

/// The `<td>` of `row` carrying `class`.
pub fn cell_by_class<'a>(row: &'a str, class: &str) -> Option<&'a str> {
    tag_blocks(row, "td")
        .into_iter()
        .find(|td| has_class(open_tag(td), class))
}
