// src/stats.rs
//
// Per-vote series and the popularity curve. Everything accumulates in full
// f64 precision; rounding is the presentation layer's business
// (`report::fmt_sig`).

use std::collections::VecDeque;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::config::consts::{DISPLAY_SCALE, MONTH_MS, POPULARITY_DAYS, TRAILING_VOTES};
use crate::data::Vote;

/// Statistics at one vote, from that vote and the ones before it only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoteSeriesEntry {
    pub running_average: f64,
    pub trailing_month_average: f64,
    pub trailing_twenty_average: f64,
    /// Position in the list on the display scale: (i+1)/n × 10
    pub percent_rank: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopularityPoint {
    /// Start of a UTC day
    pub timestamp: DateTime<Utc>,
    /// Votes in `(timestamp - 14d, timestamp]`
    pub density: usize,
    /// `density` against the busiest point, 0–10
    pub normalized: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoteStats {
    /// Index-aligned with the votes
    pub series: Vec<VoteSeriesEntry>,
    /// Own time axis; sparse
    pub popularity: Vec<PopularityPoint>,
}

/// Sum + contents of a sliding window.
struct Window<T> {
    items: VecDeque<(T, f64)>,
    sum: f64,
}

impl<T> Window<T> {
    fn new() -> Self {
        Self { items: VecDeque::new(), sum: 0.0 }
    }

    fn push(&mut self, key: T, value: f64) {
        self.items.push_back((key, value));
        self.sum += value;
    }

    fn pop_front(&mut self) {
        if let Some((_, v)) = self.items.pop_front() {
            self.sum -= v;
        }
    }

    fn front(&self) -> Option<&T> {
        self.items.front().map(|(k, _)| k)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn mean(&self) -> f64 {
        self.sum / self.items.len() as f64
    }
}

/// `votes` must be oldest first. `now` bounds the popularity walk.
pub fn compute_stats(votes: &[Vote], now: DateTime<Utc>) -> VoteStats {
    VoteStats { series: vote_series(votes), popularity: popularity(votes, now) }
}

pub fn vote_series(votes: &[Vote]) -> Vec<VoteSeriesEntry> {
    let total = votes.len() as f64;
    let month = TimeDelta::milliseconds(MONTH_MS);

    let mut sum = 0.0;
    let mut by_time: Window<DateTime<Utc>> = Window::new();
    let mut by_count: Window<()> = Window::new();

    votes
        .iter()
        .enumerate()
        .map(|(i, vote)| {
            sum += vote.value;

            by_time.push(vote.date, vote.value);
            while by_time.front().is_some_and(|&d| d + month < vote.date) {
                by_time.pop_front();
            }

            by_count.push((), vote.value);
            if by_count.len() > TRAILING_VOTES {
                by_count.pop_front();
            }

            VoteSeriesEntry {
                running_average: sum / (i + 1) as f64,
                trailing_month_average: by_time.mean(),
                trailing_twenty_average: by_count.mean(),
                percent_rank: (i + 1) as f64 / total * DISPLAY_SCALE,
            }
        })
        .collect()
}

fn day_floor(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Walk day by day from the first vote's day to `now`, keeping the votes of
/// the trailing 14 days. A point is emitted only on days where the window
/// gained or lost a vote, so quiet stretches leave gaps rather than flat runs.
pub fn popularity(votes: &[Vote], now: DateTime<Utc>) -> Vec<PopularityPoint> {
    let Some(first) = votes.first() else { return Vec::new() };

    let day = TimeDelta::days(1);
    let span = TimeDelta::days(POPULARITY_DAYS);

    let mut points = Vec::new();
    let mut window: VecDeque<DateTime<Utc>> = VecDeque::new();
    let mut next = 0;
    let mut cursor = day_floor(first.date);

    loop {
        let mut changed = false;

        while let Some(v) = votes.get(next).filter(|v| v.date <= cursor) {
            window.push_back(v.date);
            next += 1;
            changed = true;
        }
        while window.front().is_some_and(|&d| d <= cursor - span) {
            window.pop_front();
            changed = true;
        }

        if changed {
            points.push(PopularityPoint { timestamp: cursor, density: window.len(), normalized: 0.0 });
        }

        if cursor >= now {
            break;
        }
        cursor += day;
    }

    let max = points.iter().map(|p| p.density).max().unwrap_or(0);
    if max > 0 {
        for p in &mut points {
            p.normalized = p.density as f64 / max as f64 * DISPLAY_SCALE;
        }
    }
    points
}
