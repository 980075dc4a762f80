//! Aggregation of backend statistics across HAProxy instances.
//!
//! The `Aggregator` polls every configured server once per tick, keeps only
//! the latest poll of each, and flattens the results into the display list
//! consumed by the sorter and the renderer.

pub mod filter;

pub use filter::{Filter, FilterError, FilterField};

use tracing::{debug, warn};

use crate::collector::{StatsError, StatsSource};
use crate::model::{Backend, Counters};

/// One polling target and the result of its most recent poll.
pub struct Server {
    source: Box<dyn StatsSource>,
    backends: Vec<Backend>,
    last_error: Option<StatsError>,
}

impl Server {
    pub fn new(source: Box<dyn StatsSource>) -> Self {
        Self {
            source,
            backends: Vec::new(),
            last_error: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.source.endpoint()
    }

    /// Backends from the latest successful poll, empty after a failure.
    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn last_error(&self) -> Option<&StatsError> {
        self.last_error.as_ref()
    }

    /// Replaces the backend set with a fresh poll.
    ///
    /// On failure the previous backends are dropped so nothing stale is
    /// displayed, and the error is kept for the summary line.
    pub fn poll(&mut self) {
        match self.source.refresh() {
            Ok(backends) => {
                debug!(
                    endpoint = self.source.endpoint(),
                    backends = backends.len(),
                    "poll ok"
                );
                self.backends = backends;
                self.last_error = None;
            }
            Err(e) => {
                warn!(endpoint = self.source.endpoint(), error = %e, "poll failed");
                self.backends.clear();
                self.last_error = Some(e);
            }
        }
    }
}

/// Filtered backends for one tick plus the unfiltered totals.
#[derive(Debug, Default)]
pub struct DisplayList<'a> {
    pub backends: Vec<&'a Backend>,
    pub counters: Counters,
}

/// Merges the backend lists of all servers.
pub struct Aggregator {
    servers: Vec<Server>,
}

impl Aggregator {
    pub fn new(sources: Vec<Box<dyn StatsSource>>) -> Self {
        Self {
            servers: sources.into_iter().map(Server::new).collect(),
        }
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Polls every server in order. Blocks for the duration of all polls.
    pub fn poll(&mut self) {
        for server in &mut self.servers {
            server.poll();
        }
    }

    /// Totals over the latest poll, before any filter is applied.
    pub fn counters(&self) -> Counters {
        let backends = self.servers.iter().flat_map(|s| s.backends());
        let (backend_count, listener_count) =
            backends.fold((0, 0), |(b, l), backend| (b + 1, l + backend.listeners.len()));

        Counters {
            proxies: self.servers.len(),
            backends: backend_count,
            listeners: listener_count,
            unreachable: self
                .servers
                .iter()
                .filter(|s| s.last_error().is_some())
                .count(),
        }
    }

    /// Flattens all servers' backends in server order and applies `filter`.
    ///
    /// Counters are computed before filtering.
    pub fn display(&self, filter: Option<&Filter>) -> DisplayList<'_> {
        let counters = self.counters();
        let backends = self
            .servers
            .iter()
            .flat_map(|s| s.backends())
            .filter(|b| filter.is_none_or(|f| f.matches(b)))
            .collect();

        DisplayList { backends, counters }
    }
}
