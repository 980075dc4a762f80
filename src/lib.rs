//! haproxytop - live terminal dashboard for HAProxy statistics.
//!
//! Polls one or more HAProxy stats endpoints and shows their backends and
//! servers as a sortable, filterable tree table:
//! - `collector` - fetching and parsing stats (`StatsSource`)
//! - `provider` - merging servers into one display list, filtering
//! - `view` - column definitions, sort keys and row layout
//! - `tui` - event loop, key handling and rendering

pub mod collector;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod tui;
pub mod view;
