//! Generic table column and row action descriptors.

use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Raw cell value extracted from a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue {
    Text(String),
    Flag(bool),
    Date(DateTime<Local>),
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{}", value.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One table column over rows of type `T`.
pub struct TableColumn<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    /// Width in pixels.
    pub width: Option<u32>,
    pub align: Option<ColumnAlign>,
    pub value: fn(&T) -> CellValue,
    /// Display override for the raw value.
    pub formatter: Option<fn(&CellValue) -> String>,
}

impl<T> TableColumn<T> {
    pub fn cell(&self, row: &T) -> CellValue {
        (self.value)(row)
    }

    /// Display text for `row`, through the formatter when one is set.
    pub fn render(&self, row: &T) -> String {
        let value = self.cell(row);
        match self.formatter {
            Some(format) => format(&value),
            None => value.to_string(),
        }
    }
}

/// Per-row action yielding an intent of type `A`.
pub struct TableAction<T, A> {
    pub icon: &'static str,
    pub color: Option<&'static str>,
    pub tooltip: Option<&'static str>,
    pub handler: fn(&T) -> A,
    /// Visibility predicate; the action is always shown when unset.
    pub show: Option<fn(&T) -> bool>,
}

impl<T, A> TableAction<T, A> {
    pub fn is_visible(&self, row: &T) -> bool {
        self.show.map_or(true, |show| show(row))
    }

    pub fn trigger(&self, row: &T) -> A {
        (self.handler)(row)
    }
}

/// Actions whose visibility predicate accepts `row`, in declaration order.
pub fn visible_actions<'a, T, A>(
    actions: &'a [TableAction<T, A>],
    row: &T,
) -> Vec<&'a TableAction<T, A>> {
    actions
        .iter()
        .filter(|action| action.is_visible(row))
        .collect()
}

/// Stable-sorts `rows` by `column`.
///
/// Returns `false` and leaves `rows` untouched when the column is not sortable.
pub fn sort_rows<T>(rows: &mut [&T], column: &TableColumn<T>, direction: SortDirection) -> bool {
    if !column.sortable {
        return false;
    }

    rows.sort_by(|left, right| {
        let ordering: Ordering = column.cell(left).cmp(&column.cell(right));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    true
}
