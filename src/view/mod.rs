//! UI-agnostic view model.
//!
//! A [`View`] is an ordered list of [`Column`]s. Each column reads one or
//! more typed attributes ([`Attr`]) from a backend or listener record, so no
//! field is ever looked up by name at runtime. The TUI maps the resulting
//! rows to ratatui cells; nothing here depends on ratatui.

pub mod common;
pub mod rows;
pub mod sort;

use crate::fmt::format_bytes;
use crate::model::{Backend, Listener, Stats};

pub use sort::{SortFn, SortKey, sort_backends};

/// Name of the only view currently defined.
pub const REALTIME: &str = "realtime";

/// Borrowed view of a row's data: a backend, or a listener (no proxy name).
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub stats: &'a Stats,
    pub proxy_name: Option<&'a str>,
}

impl<'a> Record<'a> {
    pub fn backend(backend: &'a Backend) -> Self {
        Self {
            stats: &backend.stats,
            proxy_name: Some(&backend.proxy_name),
        }
    }

    pub fn listener(listener: &'a Listener) -> Self {
        Self {
            stats: &listener.stats,
            proxy_name: None,
        }
    }
}

/// Typed attribute accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Name,
    Status,
    Scur,
    Slim,
    ReqRate,
    ReqTot,
    Bin,
    Bout,
    Ctime,
    Rtime,
    Qtime,
    Ttime,
    ProxyName,
}

/// Raw attribute value before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(Option<u64>),
}

impl Attr {
    pub fn extract(self, rec: Record<'_>) -> Value<'_> {
        let s = rec.stats;
        match self {
            Attr::Name => Value::Text(&s.name),
            Attr::Status => Value::Text(&s.status),
            Attr::ProxyName => Value::Text(rec.proxy_name.unwrap_or("")),
            Attr::Scur => Value::Number(s.scur),
            Attr::Slim => Value::Number(s.slim),
            Attr::ReqRate => Value::Number(s.req_rate),
            Attr::ReqTot => Value::Number(s.req_tot),
            Attr::Bin => Value::Number(s.bin),
            Attr::Bout => Value::Number(s.bout),
            Attr::Ctime => Value::Number(s.ctime),
            Attr::Rtime => Value::Number(s.rtime),
            Attr::Qtime => Value::Number(s.qtime),
            Attr::Ttime => Value::Number(s.ttime),
        }
    }
}

/// How numeric attribute values are stringified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Plain,
    Bytes,
}

impl Value<'_> {
    /// Stringifies the value; absent numbers become an empty string.
    pub fn render(&self, format: ValueFormat) -> String {
        match (self, format) {
            (Value::Text(s), _) => s.to_string(),
            (Value::Number(None), _) => String::new(),
            (Value::Number(Some(n)), ValueFormat::Plain) => n.to_string(),
            (Value::Number(Some(n)), ValueFormat::Bytes) => format_bytes(*n),
        }
    }
}

/// Which attributes a column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Single(Attr),
    /// Shown joined with [`COMPOSITE_SEPARATOR`].
    Composite(&'static [Attr]),
}

/// Separator between the parts of a composite cell.
pub const COMPOSITE_SEPARATOR: &str = " / ";
/// Stand-in for an empty part of a composite cell.
pub const PLACEHOLDER: &str = "-";

/// Role of a column, used for per-cell coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Name,
    Status,
    Plain,
}

/// One column of a view. Defined once at startup, never mutated.
#[derive(Clone)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
    pub selector: Selector,
    pub format: ValueFormat,
    pub kind: ColumnKind,
    /// Columns without a sort function are not offered in the sort menu.
    pub sort: Option<SortFn>,
}

impl Column {
    fn new(header: &'static str, width: u16, selector: Selector, sort: Option<SortFn>) -> Self {
        debug_assert!(width >= 1, "column {header} has zero width");
        Self {
            header,
            width: width.max(1),
            selector,
            format: ValueFormat::Plain,
            kind: ColumnKind::Plain,
            sort,
        }
    }

    fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }

    /// Builds the untruncated cell text for a record.
    pub fn value(&self, rec: Record<'_>) -> String {
        match self.selector {
            Selector::Single(attr) => attr.extract(rec).render(self.format),
            Selector::Composite(attrs) => attrs
                .iter()
                .map(|attr| {
                    let v = attr.extract(rec).render(self.format);
                    if v.is_empty() { PLACEHOLDER.to_string() } else { v }
                })
                .collect::<Vec<_>>()
                .join(COMPOSITE_SEPARATOR),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("width", &self.width)
            .field("selector", &self.selector)
            .field("sortable", &self.is_sortable())
            .finish()
    }
}

/// A named, ordered set of columns.
#[derive(Debug, Clone)]
pub struct View {
    pub name: &'static str,
    pub columns: Vec<Column>,
}

impl View {
    /// Live traffic view: sessions, requests, network I/O and timings.
    pub fn realtime() -> View {
        View {
            name: REALTIME,
            columns: vec![
                Column::new("NAME", 30, Selector::Single(Attr::Name), Some(sort::by_name))
                    .kind(ColumnKind::Name),
                Column::new("STATUS", 7, Selector::Single(Attr::Status), Some(sort::by_status))
                    .kind(ColumnKind::Status),
                Column::new(
                    "SESSIONS",
                    9,
                    Selector::Composite(&[Attr::Scur, Attr::Slim]),
                    Some(sort::by_sessions),
                ),
                Column::new(
                    "REQUESTS",
                    9,
                    Selector::Composite(&[Attr::ReqRate, Attr::ReqTot]),
                    Some(sort::by_request_rate),
                ),
                Column::new(
                    "NET I/O",
                    20,
                    Selector::Composite(&[Attr::Bin, Attr::Bout]),
                    Some(sort::by_traffic),
                )
                .format(ValueFormat::Bytes),
                Column::new(
                    "CRQ TIME",
                    20,
                    Selector::Composite(&[Attr::Ctime, Attr::Rtime, Attr::Qtime, Attr::Ttime]),
                    None,
                ),
                Column::new("PROXY", 15, Selector::Single(Attr::ProxyName), Some(sort::by_proxy)),
            ],
        }
    }

    /// Indices of the columns that can be sorted on, in view order.
    pub fn sortable_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_sortable())
            .map(|(i, _)| i)
            .collect()
    }

    /// First sortable column, used as the initial sort.
    pub fn default_sort_column(&self) -> usize {
        self.sortable_columns().first().copied().unwrap_or(0)
    }

    pub fn sort_fn(&self, column: usize) -> Option<SortFn> {
        self.columns.get(column).and_then(|c| c.sort)
    }
}
