//! Parser for HAProxy `show stat` CSV output.
//!
//! HAProxy prints one header line (`# pxname,svname,...`) followed by one
//! row per frontend, server and backend. Server rows come before the
//! `BACKEND` aggregate row of their proxy, so servers are buffered per
//! proxy until that row shows up.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::collector::traits::StatsError;
use crate::model::{Backend, Listener, Stats};

/// Value of the `type` column.
const TYPE_BACKEND: &str = "1";
const TYPE_SERVER: &str = "2";

/// Column positions resolved from the header line.
struct Columns {
    pxname: usize,
    svname: usize,
    kind: usize,
    status: Option<usize>,
    scur: Option<usize>,
    slim: Option<usize>,
    req_rate: Option<usize>,
    req_tot: Option<usize>,
    bin: Option<usize>,
    bout: Option<usize>,
    ctime: Option<usize>,
    rtime: Option<usize>,
    qtime: Option<usize>,
    ttime: Option<usize>,
}

impl Columns {
    fn from_header(line: &str) -> Result<Self, StatsError> {
        let header = line
            .strip_prefix('#')
            .ok_or_else(|| StatsError::Malformed("missing '# pxname,...' header line".into()))?;
        let names = split_fields(header);
        let find = |name: &str| names.iter().position(|n| n.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| StatsError::Malformed(format!("missing column '{}'", name)))
        };

        Ok(Self {
            pxname: require("pxname")?,
            svname: require("svname")?,
            kind: require("type")?,
            status: find("status"),
            scur: find("scur"),
            slim: find("slim"),
            req_rate: find("req_rate"),
            req_tot: find("req_tot"),
            bin: find("bin"),
            bout: find("bout"),
            ctime: find("ctime"),
            rtime: find("rtime"),
            qtime: find("qtime"),
            ttime: find("ttime"),
        })
    }
}

/// Splits one CSV line into fields.
///
/// A field wrapped in `"` may contain `,`, and `""` inside it is a literal
/// quote. HAProxy quotes free-text fields such as `last_chk` this way.
fn split_fields(line: &str) -> Vec<Cow<'_, str>> {
    let mut fields = Vec::new();
    let mut rest = line;
    loop {
        if let Some(quoted) = rest.strip_prefix('"') {
            let mut value = String::new();
            let mut end = quoted.len();
            let mut chars = quoted.char_indices().peekable();
            while let Some((i, c)) = chars.next() {
                if c != '"' {
                    value.push(c);
                } else if chars.next_if(|&(_, next)| next == '"').is_some() {
                    value.push('"');
                } else {
                    end = i + 1;
                    break;
                }
            }
            fields.push(Cow::Owned(value));
            // Anything between the closing quote and the next comma is dropped
            match quoted[end..].split_once(',') {
                Some((_, tail)) => rest = tail,
                None => break,
            }
        } else {
            match rest.split_once(',') {
                Some((field, tail)) => {
                    fields.push(Cow::Borrowed(field));
                    rest = tail;
                }
                None => {
                    fields.push(Cow::Borrowed(rest));
                    break;
                }
            }
        }
    }
    fields
}

/// One data row split into cells; missing trailing cells read as empty.
struct Row<'a> {
    cells: Vec<Cow<'a, str>>,
    line_no: usize,
}

impl Row<'_> {
    fn text(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|c| c.as_ref()).unwrap_or("")
    }

    fn opt_text(&self, idx: Option<usize>) -> &str {
        idx.map(|i| self.text(i)).unwrap_or("")
    }

    fn number(&self, idx: Option<usize>, name: &str) -> Result<Option<u64>, StatsError> {
        let raw = self.opt_text(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<u64>().map(Some).map_err(|_| {
            StatsError::Malformed(format!(
                "line {}: column '{}' is not a number: '{}'",
                self.line_no, name, raw
            ))
        })
    }

    fn stats(&self, cols: &Columns, name: &str) -> Result<Stats, StatsError> {
        Ok(Stats {
            name: name.to_string(),
            status: self.opt_text(cols.status).to_string(),
            scur: self.number(cols.scur, "scur")?,
            slim: self.number(cols.slim, "slim")?,
            req_rate: self.number(cols.req_rate, "req_rate")?,
            req_tot: self.number(cols.req_tot, "req_tot")?,
            bin: self.number(cols.bin, "bin")?,
            bout: self.number(cols.bout, "bout")?,
            ctime: self.number(cols.ctime, "ctime")?,
            rtime: self.number(cols.rtime, "rtime")?,
            qtime: self.number(cols.qtime, "qtime")?,
            ttime: self.number(cols.ttime, "ttime")?,
        })
    }
}

/// Parses a full CSV stats page into backends.
///
/// `proxy_name` labels every backend with the HAProxy instance it came from.
/// Frontend and socket listener rows are skipped, as are servers whose
/// proxy has no `BACKEND` row.
pub fn parse_stats(content: &str, proxy_name: &str) -> Result<Vec<Backend>, StatsError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| StatsError::Malformed("empty response".into()))?;
    let cols = Columns::from_header(header)?;

    let mut pending: HashMap<String, Vec<Listener>> = HashMap::new();
    let mut backends = Vec::new();

    for (idx, line) in lines {
        let row = Row {
            cells: split_fields(line),
            line_no: idx + 1,
        };
        let pxname = row.text(cols.pxname);

        match row.text(cols.kind) {
            TYPE_SERVER => {
                let stats = row.stats(&cols, row.text(cols.svname))?;
                pending
                    .entry(pxname.to_string())
                    .or_default()
                    .push(Listener { stats });
            }
            TYPE_BACKEND => {
                let stats = row.stats(&cols, pxname)?;
                backends.push(Backend {
                    stats,
                    proxy_name: proxy_name.to_string(),
                    listeners: pending.remove(pxname).unwrap_or_default(),
                });
            }
            _ => {}
        }
    }

    Ok(backends)
}
