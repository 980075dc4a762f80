//! HAProxy statistics records.
//!
//! These structures hold one poll worth of backend and server statistics.
//! They are rebuilt from scratch on every refresh; nothing is diffed or kept
//! between ticks.

/// Statistics shared by backends and their listeners.
///
/// Numeric fields are `None` when HAProxy left the CSV cell empty
/// (e.g. `slim` for a backend without a session limit).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Stats {
    /// Display name.
    /// Source: `pxname` for backends, `svname` for servers
    pub name: String,

    /// Operational status string ("UP", "DOWN", "MAINT", "no check", ...).
    /// Source: `status`
    pub status: String,

    /// Current sessions.
    /// Source: `scur`
    pub scur: Option<u64>,

    /// Configured session limit.
    /// Source: `slim`
    pub slim: Option<u64>,

    /// HTTP requests per second over the last elapsed second.
    /// Source: `req_rate`
    pub req_rate: Option<u64>,

    /// Total HTTP requests received.
    /// Source: `req_tot`
    pub req_tot: Option<u64>,

    /// Bytes in.
    /// Source: `bin`
    pub bin: Option<u64>,

    /// Bytes out.
    /// Source: `bout`
    pub bout: Option<u64>,

    /// Average connect time in ms over the last 1024 requests.
    /// Source: `ctime`
    pub ctime: Option<u64>,

    /// Average response time in ms over the last 1024 requests.
    /// Source: `rtime`
    pub rtime: Option<u64>,

    /// Average queue time in ms over the last 1024 requests.
    /// Source: `qtime`
    pub qtime: Option<u64>,

    /// Average total session time in ms over the last 1024 requests.
    /// Source: `ttime`
    pub ttime: Option<u64>,
}

/// A single server entry inside a backend.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Listener {
    pub stats: Stats,
}

/// A named service group with its aggregate statistics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Backend {
    pub stats: Stats,

    /// Label of the HAProxy instance this backend was polled from.
    pub proxy_name: String,

    /// Servers in the order HAProxy reported them.
    pub listeners: Vec<Listener>,
}

impl Backend {
    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn status(&self) -> &str {
        &self.stats.status
    }
}

/// Totals shown in the summary line, recomputed every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Counters {
    /// Configured servers, reachable or not.
    pub proxies: usize,
    /// Backends across all servers that answered, before filtering.
    pub backends: usize,
    /// Listeners across those backends.
    pub listeners: usize,
    /// Servers whose last poll failed.
    pub unreachable: usize,
}

impl Counters {
    /// Formats the summary line, e.g. `2 proxy 2 backends 1 listeners`.
    pub fn summary(&self) -> String {
        let mut msg = self.totals();
        if let Some(flag) = self.unreachable_flag() {
            msg.push_str(&flag);
        }
        msg
    }

    /// The counters part of the summary line.
    pub fn totals(&self) -> String {
        format!(
            "{} proxy {} backends {} listeners",
            self.proxies, self.backends, self.listeners
        )
    }

    /// ` (<n> unreachable)` when at least one server failed its last poll.
    pub fn unreachable_flag(&self) -> Option<String> {
        (self.unreachable > 0).then(|| format!(" ({} unreachable)", self.unreachable))
    }
}
