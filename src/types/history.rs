use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A visited URL with the time of its most recent visit and its visit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub last_update: i64,
    pub count: i64,
}

/// Columns of the history table the user can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryColumn {
    Url,
    LastUpdate,
    Count,
}

impl HistoryColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryColumn::Url => "url",
            HistoryColumn::LastUpdate => "last_update",
            HistoryColumn::Count => "count",
        }
    }
}

impl fmt::Display for HistoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(HistoryColumn::Url),
            "last_update" => Ok(HistoryColumn::LastUpdate),
            "count" => Ok(HistoryColumn::Count),
            other => Err(format!("Unknown history column: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// User-selected ordering of the history table.
///
/// The store returns rows in no particular order; sorting is a presentation
/// concern and lives here rather than in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySort {
    pub column: HistoryColumn,
    pub order: SortOrder,
}

impl Default for HistorySort {
    fn default() -> Self {
        Self {
            column: HistoryColumn::LastUpdate,
            order: SortOrder::Descending,
        }
    }
}

impl HistorySort {
    /// Clicking a column header: the same column flips the order, a new
    /// column starts ascending.
    pub fn toggled(self, column: HistoryColumn) -> Self {
        if self.column == column {
            let order = match self.order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
            Self { column, order }
        } else {
            Self {
                column,
                order: SortOrder::Ascending,
            }
        }
    }

    fn compare(&self, a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
        let ord = match self.column {
            HistoryColumn::Url => a.url.cmp(&b.url),
            HistoryColumn::LastUpdate => a.last_update.cmp(&b.last_update),
            HistoryColumn::Count => a.count.cmp(&b.count),
        };
        match self.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }

    /// Sorts entries in place. Stable, so ties keep the store's order.
    pub fn apply(&self, entries: &mut [HistoryEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}
