//! Owned UI state: list cache, dialog guard, sort state, and the
//! season-field state machine.
//!
//! One `UiState` value replaces the original front-end's scattered globals;
//! event handlers mutate it through accessor methods and re-render from it.

use crate::api::AnimeRecord;
use crate::lookup::LookupResult;
use crate::sort::{SortColumn, SortState};

/// The season input next to the title field.
///
/// Starts as free text. When a title lookup succeeds, it becomes a dropdown
/// of generated "Season N" labels; clearing the title query drops back to
/// free text.
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonField {
    /// Plain text input, whatever the user typed.
    FreeText(String),
    /// Generated dropdown with `count` options; `selected` is 1-based.
    Dropdown { count: u32, selected: u32 },
}

impl SeasonField {
    /// The value to submit as the entry's `lastEpisode`.
    pub fn label(&self) -> String {
        match self {
            SeasonField::FreeText(text) => text.clone(),
            SeasonField::Dropdown { selected, .. } => format!("Season {selected}"),
        }
    }

    /// All selectable labels: empty for free text, "Season 1"... for a dropdown.
    pub fn options(&self) -> Vec<String> {
        match self {
            SeasonField::FreeText(_) => Vec::new(),
            SeasonField::Dropdown { count, .. } => {
                (1..=*count).map(|n| format!("Season {n}")).collect()
            }
        }
    }
}

/// Client-side state behind the library view.
#[derive(Debug)]
pub struct UiState {
    /// Last list fetched from the server; confirmation dialogs read entry
    /// details from here instead of refetching.
    cache: Vec<AnimeRecord>,
    sort: SortState,
    /// At most one confirmation/edit dialog may be open at a time.
    dialog_open: bool,
    season_field: SeasonField,
    /// Cover image of the last selected search result, submitted with the
    /// next add.
    selected_image: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            cache: Vec::new(),
            sort: SortState::new(),
            dialog_open: false,
            season_field: SeasonField::FreeText(String::new()),
            selected_image: None,
        }
    }

    // --- list cache ---

    /// Replace the cache with a freshly fetched list, re-applying the
    /// current sort.
    pub fn set_entries(&mut self, entries: Vec<AnimeRecord>) {
        self.cache = entries;
        self.sort.sort(&mut self.cache);
    }

    /// The cached entries in display order.
    pub fn entries(&self) -> &[AnimeRecord] {
        &self.cache
    }

    /// Look up a cached entry by id (e.g. to name it in a delete
    /// confirmation) without a refetch.
    pub fn entry(&self, id: i64) -> Option<&AnimeRecord> {
        self.cache.iter().find(|e| e.id == id)
    }

    // --- sorting ---

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Handle a column-header activation: toggle/reset the direction and
    /// re-sort the cache.
    pub fn activate_sort(&mut self, column: SortColumn) {
        self.sort.activate(column);
        self.sort.sort(&mut self.cache);
    }

    // --- dialog guard ---

    /// Try to open a dialog. Returns `false` (and changes nothing) when one
    /// is already open.
    pub fn try_open_dialog(&mut self) -> bool {
        if self.dialog_open {
            return false;
        }
        self.dialog_open = true;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    // --- season field ---

    pub fn season_field(&self) -> &SeasonField {
        &self.season_field
    }

    /// The cover image to submit with the next add, if a search result was
    /// selected.
    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    /// Apply a successful title lookup: switch to a season dropdown and
    /// remember the cover image.
    pub fn apply_lookup(&mut self, result: &LookupResult) {
        if result.season_count >= 1 {
            self.season_field = SeasonField::Dropdown {
                count: result.season_count,
                selected: 1,
            };
        }
        self.selected_image = result.image_url.clone();
    }

    /// Select the `n`-th season (1-based) in the dropdown. Out-of-range
    /// selections are ignored.
    pub fn select_season(&mut self, n: u32) {
        if let SeasonField::Dropdown { count, selected } = &mut self.season_field {
            if n >= 1 && n <= *count {
                *selected = n;
            }
        }
    }

    /// Free-text edit of the season field (only meaningful outside dropdown
    /// mode, e.g. "Season 2 - Ep 7").
    pub fn set_season_text(&mut self, text: impl Into<String>) {
        self.season_field = SeasonField::FreeText(text.into());
    }

    /// The title query was cleared (or fell under the search minimum):
    /// reset to an empty free-text field and drop the remembered image.
    pub fn clear_search(&mut self) {
        self.season_field = SeasonField::FreeText(String::new());
        self.selected_image = None;
    }
}
