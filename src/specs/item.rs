// src/specs/item.rs
//
// The item's main page. Only the title is required; the vote-count hint and
// the release list are read when present.

use super::{parse_site_date, ParseError};
use crate::core::html::{
    attr_value, cell_by_class, find_by_class, find_by_id, find_element, open_tag, slice_between_ci,
    strip_tags, tag_blocks, tag_name, text_of,
};
use crate::core::sanitize::{leading_number, normalize_entities};
use crate::data::{ItemSummary, Release};

pub fn parse_item_page(html: &str) -> Result<ItemSummary, ParseError> {
    let main = find_by_id(html, "maincontent").unwrap_or(html);
    let title = slice_between_ci(main, "<h1", "</h1>")
        .map(|h| strip_tags(normalize_entities(h)))
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingTitle)?;

    let vote_count = match find_by_class(main, "votegraph") {
        Some(graph) => Some(parse_vote_total(graph)?),
        None => None,
    };

    let releases = find_by_class(main, "vnreleases")
        .map(parse_releases)
        .unwrap_or_default();

    Ok(ItemSummary { title, vote_count, releases })
}

/// "1,234 votes total, average 7.51 (Very good)" → 1234
fn parse_vote_total(graph: &str) -> Result<u32, ParseError> {
    let foot = slice_between_ci(graph, "<tfoot", "</tfoot>").unwrap_or(graph);
    let text = strip_tags(normalize_entities(foot));

    let count = text
        .find(" total")
        .map(|i| text[..i].trim_end())
        .and_then(|t| t.strip_suffix("votes").or_else(|| t.strip_suffix("vote")))
        .and_then(|t| t.split_whitespace().last())
        .and_then(leading_number)
        .and_then(|n| n.parse().ok());

    count.ok_or(ParseError::BadVoteCount(text))
}

/// Releases are grouped per language in `<details>` sections, each headed by
/// an `<abbr>` whose last class names the language.
fn parse_releases(block: &str) -> Vec<Release> {
    let mut sections = Vec::new();
    let mut from = 0;
    while let Some((a, b)) = find_element(block, from, |t| tag_name(t).as_deref() == Some("details")) {
        sections.push(&block[a..b]);
        from = b;
    }
    if sections.is_empty() {
        sections.push(block);
    }

    sections.into_iter().flat_map(parse_release_section).collect()
}

fn parse_release_section(section: &str) -> Vec<Release> {
    let lang = find_element(section, 0, |t| tag_name(t).as_deref() == Some("abbr"))
        .and_then(|(a, _)| attr_value(open_tag(&section[a..]), "class"))
        .and_then(|classes| classes.split_whitespace().last())
        .map(|c| s!(c))
        .unwrap_or_default();

    tag_blocks(section, "tr")
        .into_iter()
        .filter_map(|tr| {
            // TBA and partial-unknown dates have no place on a time axis
            let date = cell_by_class(tr, "tc1").map(text_of).and_then(|t| parse_site_date(&t))?;
            let title = cell_by_class(tr, "tc4").map(release_title).unwrap_or_default();
            Some(Release { date, title, lang: lang.clone() })
        })
        .collect()
}

/// The link's `title` attribute carries the original-script title; fall back
/// to the visible text.
fn release_title(cell: &str) -> String {
    let link = find_element(cell, 0, |t| tag_name(t).as_deref() == Some("a"))
        .map(|(a, b)| &cell[a..b]);
    match link.and_then(|a| attr_value(open_tag(a), "title")) {
        Some(t) if !t.trim().is_empty() => normalize_entities(t.trim()),
        _ => text_of(link.unwrap_or(cell)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const PAGE: &str = r#"<html><body><div id="maincontent">
<div class="mainbox"><h1>Ever17 &amp; more</h1>
<div class="vnreleases">
  <details open><summary><abbr class="icon-lang lang-ja" title="Japanese"></abbr> Japanese</summary>
  <table class="releases">
    <tr><td class="tc1">2002-08-29</td><td class="tc2">18+</td><td class="tc3"></td><td class="tc4"><a href="/r1" title="Ever17 -the out of infinity-">Ever17</a></td></tr>
    <tr><td class="tc1">TBA</td><td class="tc2"></td><td class="tc3"></td><td class="tc4"><a href="/r9">Remake</a></td></tr>
  </table></details>
  <details><summary><abbr class="icon-lang lang-en" title="English"></abbr> English</summary>
  <table class="releases">
    <tr><td class="tc1">2005-05</td><td class="tc2"></td><td class="tc3"></td><td class="tc4"><a href="/r2">Ever17 (EN)</a></td></tr>
  </table></details>
</div></div>
<div class="mainbox"><div class="votegraph"><table>
  <tbody><tr><td>10</td><td>500</td></tr></tbody>
  <tfoot><tr><td colspan="2">4,321 votes total, average 8.53 (Excellent)</td></tr></tfoot>
</table></div></div>
</div></body></html>"#;

    #[test]
    fn reads_title_count_and_dated_releases() {
        let item = parse_item_page(PAGE).unwrap();
        assert_eq!(item.title, "Ever17 & more");
        assert_eq!(item.vote_count, Some(4321));

        assert_eq!(item.releases.len(), 2);
        assert_eq!(item.releases[0].title, "Ever17 -the out of infinity-");
        assert_eq!(item.releases[0].lang, "lang-ja");
        assert_eq!(item.releases[0].date, Utc.with_ymd_and_hms(2002, 8, 29, 0, 0, 0).unwrap());
        assert_eq!(item.releases[1].title, "Ever17 (EN)");
        assert_eq!(item.releases[1].lang, "lang-en");
        assert_eq!(item.releases[1].date, Utc.with_ymd_and_hms(2005, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn single_vote_and_no_releases() {
        let html = r#"<div id="maincontent"><div><h1>Tiny</h1></div>
<div class="votegraph"><table><tfoot><tr><td>1 vote total, average 7.00</td></tr></tfoot></table></div></div>"#;
        let item = parse_item_page(html).unwrap();
        assert_eq!(item.vote_count, Some(1));
        assert!(item.releases.is_empty());
    }

    #[test]
    fn missing_pieces() {
        assert_eq!(parse_item_page("<p>nothing</p>"), Err(ParseError::MissingTitle));

        let html = r#"<div id="maincontent"><h1>T</h1><div class="votegraph"><table><tfoot><tr><td>no data</td></tr></tfoot></table></div></div>"#;
        assert_eq!(parse_item_page(html), Err(ParseError::BadVoteCount(s!("no data"))));

        let html = r#"<div id="maincontent"><h1>T</h1></div>"#;
        assert_eq!(parse_item_page(html).unwrap().vote_count, None);
    }
}
