//! Scripted stats source for testing the aggregator and the UI loop
//! without a running HAProxy.

use std::collections::VecDeque;

use crate::collector::traits::{StatsError, StatsSource};
use crate::model::{Backend, Listener, Stats};

/// Replays a fixed sequence of poll results.
///
/// Once the script runs out, the last result is repeated forever.
pub struct MockSource {
    endpoint: String,
    script: VecDeque<Result<Vec<Backend>, StatsError>>,
    last: Result<Vec<Backend>, StatsError>,
    /// Number of `refresh` calls served so far.
    pub polls: usize,
}

impl MockSource {
    /// A source that always returns `backends`.
    pub fn new(endpoint: &str, backends: Vec<Backend>) -> Self {
        Self::scripted(endpoint, vec![Ok(backends)])
    }

    /// A source that always fails with `error`.
    pub fn failing(endpoint: &str, error: StatsError) -> Self {
        Self::scripted(endpoint, vec![Err(error)])
    }

    /// A source that returns each result of `script` in turn.
    pub fn scripted(endpoint: &str, script: Vec<Result<Vec<Backend>, StatsError>>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            script: script.into(),
            last: Ok(Vec::new()),
            polls: 0,
        }
    }
}

impl StatsSource for MockSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn refresh(&mut self) -> Result<Vec<Backend>, StatsError> {
        self.polls += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }
}

/// Builds a backend with the given name, status and server names.
pub fn backend(name: &str, status: &str, proxy: &str, listeners: &[&str]) -> Backend {
    Backend {
        stats: Stats {
            name: name.to_string(),
            status: status.to_string(),
            ..Stats::default()
        },
        proxy_name: proxy.to_string(),
        listeners: listeners
            .iter()
            .map(|l| Listener {
                stats: Stats {
                    name: l.to_string(),
                    status: "UP".to_string(),
                    ..Stats::default()
                },
            })
            .collect(),
    }
}
