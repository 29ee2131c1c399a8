// src/report.rs
//! Presentation models shared by the GUI and the CLI.
//!
//! - `fmt_sig`: the one place numbers get rounded.
//! - `TableData` + `table`/`sort_rows`: the per-vote table, also what gets
//!   copied and exported.
//! - `Chart` + `chart`: series, colors and tooltip labels, independent of
//!   how they are drawn.
//! - `Report`: all of the above for one collected item.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{
    config::consts::{DISPLAY_SCALE, SIG_FIGS},
    data::{ItemId, Release, Vote},
    scrape::Collected,
    stats::{compute_stats, PopularityPoint, VoteStats},
};

/// Round to `sig` significant figures for display. Magnitudes with more
/// integer digits than `sig` are shown as whole numbers (`1234.6` → `1235`).
pub fn fmt_sig(x: f64, sig: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let sig = sig.max(1);
    // exponent after rounding, so 9.996 counts as 10.0
    let sci = format!("{:.*e}", sig - 1, x);
    let exp: i64 = sci.rsplit('e').next().and_then(|e| e.parse().ok()).unwrap_or(0);
    let decimals = (sig as i64 - 1 - exp).max(0) as usize;
    format!("{:.*}", decimals, x)
}

fn fmt(x: f64) -> String {
    fmt_sig(x, SIG_FIGS)
}

/* ---------------- Table ---------------- */

pub const TABLE_HEADERS: [&str; 8] = [
    "Date", "User", "Vote", "Average", "1 Month Avg", "20 Vote Avg", "Percentile", "Popularity",
];

/// Headers + rows of display strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableData {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn with(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ncols(&self) -> usize {
        self.headers
            .as_ref()
            .map(|h| h.len())
            .or_else(|| self.rows.first().map(|r| r.len()))
            .unwrap_or(0)
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

/// One row per vote, oldest first. Popularity is taken from the latest
/// point at or before the vote; empty when there is none yet.
pub fn table(votes: &[Vote], stats: &VoteStats) -> TableData {
    let mut pop: &[PopularityPoint] = &stats.popularity;
    let mut current: Option<&PopularityPoint> = None;

    let rows = votes
        .iter()
        .zip(&stats.series)
        .map(|(vote, entry)| {
            while let Some((p, rest)) = pop.split_first() {
                if p.timestamp > vote.date {
                    break;
                }
                current = Some(p);
                pop = rest;
            }

            vec![
                vote.date.format("%Y-%m-%d").to_string(),
                vote.user.clone(),
                vote.value.to_string(),
                fmt(entry.running_average),
                fmt(entry.trailing_month_average),
                fmt(entry.trailing_twenty_average),
                fmt(entry.percent_rank),
                current.map(|p| fmt(p.normalized)).unwrap_or_default(),
            ]
        })
        .collect();

    TableData::with(Some(TABLE_HEADERS.iter().map(|h| s!(*h)).collect()), rows)
}

/// Sort key of one cell. Finite numbers sort before text.
#[derive(Debug, PartialEq)]
enum CellKey<'a> {
    Num(f64),
    Text(&'a str),
}

impl<'a> CellKey<'a> {
    fn of(cell: &'a str) -> Self {
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => CellKey::Num(n),
            _ => CellKey::Text(cell),
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellKey::Num(a), CellKey::Num(b)) => a.total_cmp(b),
            (CellKey::Num(_), CellKey::Text(_)) => Ordering::Less,
            (CellKey::Text(_), CellKey::Num(_)) => Ordering::Greater,
            (CellKey::Text(a), CellKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Stable sort on column `col`. Finite numeric cells compare numerically and
/// come before text cells, which compare lexicographically.
pub fn sort_rows(rows: &mut [Vec<String>], col: usize, descending: bool) {
    fn cell(row: &[String], col: usize) -> &str {
        row.get(col).map(String::as_str).unwrap_or("")
    }
    rows.sort_by(|a, b| {
        let ord = CellKey::of(cell(a, col)).order(&CellKey::of(cell(b, col)));
        if descending { ord.reverse() } else { ord }
    });
}

/* ---------------- Chart ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Connected line through the points
    Line,
    /// Scatter
    Points,
    /// Dashed vertical rule across the plot at each x
    Markers,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartPoint {
    /// Epoch milliseconds
    pub x: i64,
    pub y: f64,
    /// Tooltip text when the point carries its own
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub style: SeriesStyle,
    /// RGBA
    pub color: [u8; 4],
    pub points: Vec<ChartPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub title: String,
    pub series: Vec<ChartSeries>,
    /// Epoch milliseconds, inclusive
    pub x_range: (i64, i64),
    pub y_max: f64,
}

fn line(label: &'static str, color: [u8; 4], points: impl Iterator<Item = (i64, f64)>) -> ChartSeries {
    ChartSeries {
        label,
        style: SeriesStyle::Line,
        color,
        points: points.map(|(x, y)| ChartPoint { x, y, label: None }).collect(),
    }
}

/// Chart model: the three averages, the raw votes, the popularity curve and
/// one marker per release plus one for today.
pub fn chart(title: &str, votes: &[Vote], stats: &VoteStats, releases: &[Release], now: DateTime<Utc>) -> Chart {
    let xs = || votes.iter().map(|v| v.date.timestamp_millis());
    let s = &stats.series;

    let mut series = vec![
        line("Average", [107, 0, 110, 77], xs().zip(s.iter().map(|e| e.running_average))),
        line("1 Month Average", [52, 186, 235, 77], xs().zip(s.iter().map(|e| e.trailing_month_average))),
        line("20 Vote Average", [235, 140, 52, 77], xs().zip(s.iter().map(|e| e.trailing_twenty_average))),
        line(
            "Popularity",
            [46, 160, 67, 64],
            stats.popularity.iter().map(|p| (p.timestamp.timestamp_millis(), p.normalized)),
        ),
    ];

    series.push(ChartSeries {
        label: "Vote",
        style: SeriesStyle::Points,
        color: [0, 49, 158, 51],
        points: votes
            .iter()
            .map(|v| ChartPoint {
                x: v.date.timestamp_millis(),
                y: v.value,
                label: Some(format!("{}: {}", v.user, v.value)),
            })
            .collect(),
    });

    let today = Release { date: now, title: s!("Today"), lang: s!() };
    series.push(ChartSeries {
        label: "Releases",
        style: SeriesStyle::Markers,
        color: [255, 0, 0, 77],
        points: releases
            .iter()
            .chain(std::iter::once(&today))
            .map(|r| ChartPoint {
                x: r.date.timestamp_millis(),
                y: DISPLAY_SCALE,
                label: Some(if r.lang.is_empty() { r.title.clone() } else { format!("{}: {}", r.lang, r.title) }),
            })
            .collect(),
    });

    let all_x = series.iter().flat_map(|s| s.points.iter().map(|p| p.x));
    let (lo, hi) = all_x.fold((i64::MAX, i64::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));

    let y_max = votes.iter().map(|v| v.value).fold(DISPLAY_SCALE, f64::max);

    Chart { title: format!("{title} vote scores"), series, x_range: (lo, hi), y_max }
}

/* ---------------- Bundle ---------------- */

/// Everything the frontends show for one item.
#[derive(Clone, Debug)]
pub struct Report {
    pub item: ItemId,
    pub title: String,
    pub votes: Vec<Vote>,
    pub stats: VoteStats,
    pub table: TableData,
    pub chart: Chart,
    pub from_cache: bool,
    /// Title and releases came from an item page. False on a cache hit
    /// with no item page seen this session.
    pub has_summary: bool,
}

impl Report {
    pub fn build(collected: Collected, now: DateTime<Utc>) -> Self {
        let Collected { item, summary, votes, from_cache } = collected;
        let has_summary = summary.is_some();
        let (title, releases) = match summary {
            Some(s) => (s.title, s.releases),
            None => (item.to_string(), Vec::new()),
        };

        let stats = compute_stats(&votes, now);
        let table = table(&votes, &stats);
        let chart = chart(&title, &votes, &stats, &releases, now);

        Self { item, title, votes, stats, table, chart, from_cache, has_summary }
    }

    /// One-line outcome for a status bar.
    pub fn status_line(&self) -> String {
        let n = self.votes.len();
        match (self.from_cache, self.has_summary) {
            (false, _) => format!("{n} votes"),
            (true, true) => format!("{n} votes (from cache)"),
            (true, false) => format!("{n} votes (from cache; title and release dates not loaded, refetch to get them)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sig_figs() {
        assert_eq!(fmt_sig(8.0, 3), "8.00");
        assert_eq!(fmt_sig(7.0, 3), "7.00");
        assert_eq!(fmt_sig(10.0, 3), "10.0");
        assert_eq!(fmt_sig(6.666_666, 3), "6.67");
        assert_eq!(fmt_sig(9.996, 3), "10.0");
        assert_eq!(fmt_sig(0.012_345, 3), "0.0123");
        assert_eq!(fmt_sig(0.0, 3), "0.00");
        assert_eq!(fmt_sig(1234.6, 3), "1235");
        assert_eq!(fmt_sig(-2.5, 2), "-2.5");
    }

    fn vote(day: u32, hour: u32, value: f64, user: &str) -> Vote {
        Vote { date: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(), value, user: s!(user) }
    }

    #[test]
    fn table_rows_zip_popularity_backwards() {
        let votes = [vote(1, 10, 8.0, "a"), vote(2, 10, 6.0, "b"), vote(3, 10, 10.0, "c")];
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let stats = compute_stats(&votes, now);
        let t = table(&votes, &stats);

        assert_eq!(t.ncols(), 8);
        assert_eq!(t.rows[0], ["2024-01-01", "a", "8", "8.00", "8.00", "8.00", "3.33", ""]);
        assert_eq!(t.rows[1][3], "7.00");
        // points on the 2nd (1 vote), 3rd (2), 4th (3): vote on the 3rd sees the 3rd's point
        assert_eq!(t.rows[1][7], "3.33");
        assert_eq!(t.rows[2][7], "6.67");
    }

    #[test]
    fn sort_is_numeric_when_it_can_be() {
        let mut rows = vec![
            vec![s!("x"), s!("10")],
            vec![s!("y"), s!("9")],
            vec![s!("z"), s!("9")],
        ];
        sort_rows(&mut rows, 1, false);
        assert_eq!(rows.iter().map(|r| r[0].as_str()).collect::<Vec<_>>(), ["y", "z", "x"]);
        sort_rows(&mut rows, 1, true);
        assert_eq!(rows.iter().map(|r| r[0].as_str()).collect::<Vec<_>>(), ["x", "y", "z"]);
        sort_rows(&mut rows, 0, true);
        assert_eq!(rows[0][0], "z");
    }

    #[test]
    fn sort_mixed_column_is_a_total_order() {
        let mut rows: Vec<Vec<String>> = (0..200)
            .map(|i| match i % 3 {
                0 => vec![format!("{i}")],
                1 => vec![format!("{i}a")],
                _ => vec![format!("{}", i * 7 % 50)],
            })
            .collect();
        sort_rows(&mut rows, 0, false);

        let keys: Vec<_> = rows.iter().map(|r| CellKey::of(&r[0])).collect();
        assert!(keys.windows(2).all(|w| w[0].order(&w[1]) != Ordering::Greater));
        let first_text = keys.iter().position(|k| matches!(k, CellKey::Text(_))).unwrap();
        assert!(keys[first_text..].iter().all(|k| matches!(k, CellKey::Text(_))));
    }

    #[test]
    fn non_finite_cells_sort_as_text() {
        let mut rows = vec![vec![s!("nan")], vec![s!("jjj")], vec![s!("inf")], vec![s!("2")], vec![s!("10")]];
        sort_rows(&mut rows, 0, false);
        assert_eq!(rows.concat(), ["2", "10", "inf", "jjj", "nan"]);
        sort_rows(&mut rows, 0, true);
        assert_eq!(rows.concat(), ["nan", "jjj", "inf", "10", "2"]);
    }

    #[test]
    fn chart_has_today_marker_and_labels() {
        let votes = [vote(1, 0, 8.0, "alice")];
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let rel = Release { date: Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap(), title: s!("Orig"), lang: s!("lang-ja") };
        let c = chart("Foo", &votes, &compute_stats(&votes, now), &[rel], now);

        assert_eq!(c.title, "Foo vote scores");
        let releases = c.series.iter().find(|s| s.label == "Releases").unwrap();
        let labels: Vec<_> = releases.points.iter().filter_map(|p| p.label.as_deref()).collect();
        assert_eq!(labels, ["lang-ja: Orig", "Today"]);
        let vote_pts = c.series.iter().find(|s| s.label == "Vote").unwrap();
        assert_eq!(vote_pts.points[0].label.as_deref(), Some("alice: 8"));
        assert_eq!(c.x_range, (rel_ms(), now.timestamp_millis()));
        assert_eq!(c.y_max, 10.0);

        fn rel_ms() -> i64 {
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap().timestamp_millis()
        }
    }
}
