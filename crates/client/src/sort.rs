//! Table sorting: three comparators and the column/direction toggle.
//!
//! Comparators operate on the displayed cell text. Missing values render as
//! `"-"`; the date comparator orders that placeholder after every real date,
//! so the direction flag alone decides whether empty rows land last
//! (ascending) or first (descending).

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::api::AnimeRecord;

/// Placeholder shown for a missing cell value.
const EMPTY_CELL: &str = "-";

fn season_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Accepts both the generated "Season N" label and legacy free text.
    RE.get_or_init(|| Regex::new(r"(?i)(?:Season|Saison)\s*(\d+)").unwrap())
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap())
}

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Season,
    Date,
    Status,
}

/// Sort direction; toggled by repeated activation of the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column and direction.
///
/// Activating the current column flips the direction; activating a different
/// column switches to it and resets to ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    column: Option<SortColumn>,
    direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self) -> Option<SortColumn> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Register a header activation and return the resulting direction.
    pub fn activate(&mut self, column: SortColumn) -> SortDirection {
        if self.column == Some(column) {
            self.direction = self.direction.flip();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }

    /// Sort `records` in place according to the current column/direction.
    /// No-op when no column has been activated yet.
    pub fn sort(&self, records: &mut [AnimeRecord]) {
        let Some(column) = self.column else { return };

        records.sort_by(|a, b| {
            let ordering = match column {
                SortColumn::Title => compare_text(&a.title, &b.title),
                SortColumn::Season => compare_seasons(
                    a.last_episode.as_deref().unwrap_or(EMPTY_CELL),
                    b.last_episode.as_deref().unwrap_or(EMPTY_CELL),
                ),
                SortColumn::Date => compare_dates(
                    a.watch_date.as_deref().unwrap_or(EMPTY_CELL),
                    b.watch_date.as_deref().unwrap_or(EMPTY_CELL),
                ),
                SortColumn::Status => compare_text(
                    a.status.as_deref().unwrap_or(EMPTY_CELL),
                    b.status.as_deref().unwrap_or(EMPTY_CELL),
                ),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Case-insensitive lexical comparison for text columns.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Season-aware comparison for the episode column.
///
/// When both cells carry a season number, compare numerically; otherwise
/// (or when the numbers tie) fall back to lexical order.
pub fn compare_seasons(a: &str, b: &str) -> Ordering {
    let a_season = season_regex()
        .captures(a)
        .and_then(|c| c[1].parse::<u32>().ok());
    let b_season = season_regex()
        .captures(b)
        .and_then(|c| c[1].parse::<u32>().ok());

    if let (Some(a_n), Some(b_n)) = (a_season, b_season) {
        if a_n != b_n {
            return a_n.cmp(&b_n);
        }
    }

    compare_text(a, b)
}

/// Calendar-date comparison for DD/MM/YYYY cells.
///
/// The `"-"` placeholder always compares after any real date. Cells that
/// match neither the placeholder nor the date format fall back to lexical
/// order.
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    match (a == EMPTY_CELL, b == EMPTY_CELL) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let parse = |s: &str| -> Option<(u32, u32, u32)> {
        let caps = date_regex().captures(s)?;
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        Some((year, month, day))
    };

    match (parse(a), parse(b)) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
        _ => compare_text(a, b),
    }
}
