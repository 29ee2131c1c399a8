// src/specs/votes.rs
//
// One page of `/<item>/votes?o=d&s=date`: a `votelist` table, newest first,
// with date (`tc1`), vote (`tc2`) and user (`tc3`) cells. Past the last page
// the site renders a mainbox with a short paragraph and no table.

use super::{parse_site_date, ParseError};
use crate::core::html::{cell_by_class, find_by_class, find_element, has_class, slice_between_ci, tag_blocks, text_of};
use crate::data::Vote;

#[derive(Clone, Debug, PartialEq)]
pub enum VotePage {
    /// Rows in page order (newest first)
    Votes(Vec<Vote>),
    /// The listing has run out
    EndOfPages,
}

pub fn parse_vote_page(html: &str) -> Result<VotePage, ParseError> {
    let Some(list) = find_by_class(html, "votelist") else {
        return if is_end_marker(html) {
            Ok(VotePage::EndOfPages)
        } else {
            Err(ParseError::MissingVoteList)
        };
    };

    let body = slice_between_ci(list, "<tbody", "</tbody>").ok_or(ParseError::MissingTableBody)?;

    tag_blocks(body, "tr")
        .into_iter()
        .enumerate()
        .map(|(row, tr)| parse_row(row, tr))
        .collect::<Result<Vec<_>, _>>()
        .map(VotePage::Votes)
}

/// A `mainbox` holding a bare paragraph.
fn is_end_marker(html: &str) -> bool {
    let mut from = 0;
    while let Some((a, b)) = find_element(html, from, |tag| has_class(tag, "mainbox")) {
        if !tag_blocks(&html[a..b], "p").is_empty() {
            return true;
        }
        from = a + 1;
    }
    false
}

fn parse_row(row: usize, tr: &str) -> Result<Vote, ParseError> {
    let cell = |class: &'static str| {
        cell_by_class(tr, class)
            .map(text_of)
            .ok_or(ParseError::MissingCell { row, cell: class })
    };

    let date_text = cell("tc1")?;
    let date = parse_site_date(&date_text).ok_or(ParseError::BadDate { row, text: date_text })?;

    let vote_text = cell("tc2")?;
    let value = vote_text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ParseError::BadVote { row, text: vote_text })?;

    let user = cell("tc3")?;

    Ok(Vote { date, value, user })
}
