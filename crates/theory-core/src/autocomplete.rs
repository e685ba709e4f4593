//! Autocomplete: the incremental substring-search session bound to one field.
//!
//! One [`Autocomplete`] exists per bound field and owns that field's
//! [`SearchSession`]. Nothing is shared between instances apart from the
//! immutable [`RecordCollection`] handed in on each input change.
//!
//! # State machine
//!
//! ```text
//!          qualifying input                   input changes
//!   Idle ───────────────────► Open(session) ◄──────────────┐
//!    ▲                           │    │                     │
//!    │  below min length /       │    └─────────────────────┘
//!    │  no matches / commit /    │
//!    └── Escape / dismiss ───────┘
//! ```
//!
//! # Keyboard protocol (while open)
//!
//! | Key | Effect |
//! |-----|--------|
//! | Down | highlight first row if none, else next row; stops at the last row |
//! | Up | previous row; stops at the first row |
//! | Enter | commit the highlighted row; no-op when nothing is highlighted |
//! | Tab | commit the highlighted row; no-op when nothing is highlighted |
//! | Escape | close without committing |

use crate::search::{find_matches, highlight_ranges, LabelTemplate, MatchTarget};
use crate::types::{Record, RecordCollection};
use std::collections::HashSet;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-field behaviour of an [`Autocomplete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// Queries with fewer characters than this never search.
    pub min_query_len: usize,
    /// Highlight the first row whenever the match set changes.
    pub auto_highlight_first: bool,
    /// Whether the query is matched against the full blob or the label only.
    pub match_on: MatchTarget,
    /// Builds the label shown in the popup and written on commit.
    pub label: LabelTemplate,
    /// Collapse rows whose labels are identical, keeping the first.
    pub distinct: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_query_len: 1,
            auto_highlight_first: false,
            match_on: MatchTarget::Blob,
            label: LabelTemplate::default(),
            distinct: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One rendered row of the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    /// Index of the record inside the collection that was searched.
    pub record_index: usize,
    pub label: String,
    /// Byte ranges of `label` that match the query.
    pub highlights: Vec<Range<usize>>,
}

/// Transient state of an open popup.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    records: RecordCollection,
    rows: Vec<MatchRow>,
    highlighted: Option<usize>,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rows(&self) -> &[MatchRow] {
        &self.rows
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_row(&self) -> Option<&MatchRow> {
        self.highlighted.and_then(|i| self.rows.get(i))
    }

    /// The record behind a row.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.rows
            .get(row)
            .and_then(|r| self.records.get(r.record_index))
    }

    /// Range of rows to draw when at most `max_rows` fit, scrolled just far
    /// enough that the highlighted row is visible.
    pub fn visible_window(&self, max_rows: usize) -> Range<usize> {
        let len = self.rows.len();
        let max_rows = max_rows.min(len);
        let start = match self.highlighted {
            Some(h) if h >= max_rows => h + 1 - max_rows,
            _ => 0,
        };
        start..start + max_rows
    }

    fn same_rows(&self, rows: &[MatchRow]) -> bool {
        self.rows.len() == rows.len()
            && self
                .rows
                .iter()
                .zip(rows)
                .all(|(a, b)| a.record_index == b.record_index && a.label == b.label)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Keys the popup reacts to. Anything else is ordinary text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Enter,
    Tab,
    Escape,
}

/// The row the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Text to write into the bound field.
    pub label: String,
    pub record: Record,
}

/// What happened to a key sent to [`Autocomplete::key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; the host should apply its normal handling.
    Ignored,
    /// Consumed by the popup.
    Handled,
    /// A row was committed and the popup closed.
    Committed(Commit),
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    config: AutocompleteConfig,
    session: Option<SearchSession>,
}

impl Autocomplete {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Recompute matches for the field's new value.
    ///
    /// `records` is whatever the field's provider currently yields; `None`
    /// or an empty collection simply means no popup.
    pub fn on_input(&mut self, query: &str, records: Option<RecordCollection>) {
        if query.chars().count() < self.config.min_query_len {
            self.close("query below minimum length");
            return;
        }
        let Some(records) = records.filter(|c| !c.is_empty()) else {
            self.close("no records available");
            return;
        };

        let label = &self.config.label;
        let hits = find_matches(records.iter(), query, self.config.match_on, |r| {
            label.format(r)
        });

        let mut seen = HashSet::new();
        let rows: Vec<MatchRow> = hits
            .into_iter()
            .filter_map(|record_index| {
                let record = records.get(record_index)?;
                let text = label.format(record);
                if self.config.distinct && !seen.insert(text.to_lowercase()) {
                    return None;
                }
                Some(MatchRow {
                    record_index,
                    highlights: highlight_ranges(&text, query),
                    label: text,
                })
            })
            .collect();

        if rows.is_empty() {
            self.close("no matches");
            return;
        }

        let highlighted = match &self.session {
            Some(prev) if prev.same_rows(&rows) => prev.highlighted,
            _ if self.config.auto_highlight_first => Some(0),
            _ => None,
        };

        tracing::debug!(query, matches = rows.len(), ?highlighted, "autocomplete: open");
        self.session = Some(SearchSession {
            query: query.to_string(),
            records,
            rows,
            highlighted,
        });
    }

    /// Apply one key of the keyboard protocol.
    pub fn key(&mut self, nav: Nav) -> KeyOutcome {
        let Some(session) = self.session.as_mut() else {
            return KeyOutcome::Ignored;
        };
        let last = session.rows.len().saturating_sub(1);

        match nav {
            Nav::Down => {
                session.highlighted = Some(match session.highlighted {
                    None => 0,
                    Some(i) => (i + 1).min(last),
                });
                tracing::debug!(highlighted = ?session.highlighted, "autocomplete: down");
                KeyOutcome::Handled
            }
            Nav::Up => {
                if let Some(i) = session.highlighted {
                    session.highlighted = Some(i.saturating_sub(1));
                }
                tracing::debug!(highlighted = ?session.highlighted, "autocomplete: up");
                KeyOutcome::Handled
            }
            Nav::Enter | Nav::Tab => match self.commit_highlighted() {
                Some(commit) => KeyOutcome::Committed(commit),
                None => KeyOutcome::Handled,
            },
            Nav::Escape => {
                self.close("escape");
                KeyOutcome::Handled
            }
        }
    }

    /// Pointer moved over `row`: it becomes the only highlighted row.
    pub fn hover(&mut self, row: usize) {
        if let Some(session) = self.session.as_mut() {
            if row < session.rows.len() && session.highlighted != Some(row) {
                session.highlighted = Some(row);
                tracing::debug!(row, "autocomplete: hover");
            }
        }
    }

    /// Pointer clicked `row`: commit it exactly like Enter would.
    pub fn click(&mut self, row: usize) -> Option<Commit> {
        let session = self.session.as_mut()?;
        if row >= session.rows.len() {
            return None;
        }
        session.highlighted = Some(row);
        self.commit_highlighted()
    }

    /// Close without committing (outside click, focus leaving the field).
    pub fn dismiss(&mut self) {
        self.close("dismissed");
    }

    fn commit_highlighted(&mut self) -> Option<Commit> {
        let session = self.session.as_ref()?;
        let row = session.highlighted_row()?;
        let record = session.records.get(row.record_index)?.clone();
        let commit = Commit {
            label: row.label.clone(),
            record,
        };
        tracing::debug!(label = %commit.label, "autocomplete: commit");
        self.session = None;
        Some(commit)
    }

    fn close(&mut self, reason: &str) {
        if self.session.take().is_some() {
            tracing::debug!(reason, "autocomplete: closed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
