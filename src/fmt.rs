//! Shared formatting helpers for table cells.
//!
//! Pure functions only: no ratatui styles, no layout.

const KB: u64 = 1_000;
const MB: u64 = KB * 1_000;
const GB: u64 = MB * 1_000;
const TB: u64 = GB * 1_000;

/// Format byte count with decimal (1000-based) units.
///
/// `"999 B"`, `"1.0 kB"`, `"1000.0 kB"` (999 999 rounds up within the unit),
/// `"1.0 mB"`, `"1.0 gB"`, `"1.0 tB"`. Each range is half-open, so exactly
/// 1000 of a unit moves into the next one.
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} kB", f / KB as f64)
    } else if bytes < GB {
        format!("{:.1} mB", f / MB as f64)
    } else if bytes < TB {
        format!("{:.1} gB", f / GB as f64)
    } else {
        format!("{:.1} tB", f / TB as f64)
    }
}

/// Shortens a cell value that does not fit its column.
///
/// Values whose character count reaches `width` are cut to `width - 4`
/// characters and suffixed with `...`, leaving one free cell before the next
/// column. Columns narrower than the ellipsis still get `"..."`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() < width {
        return s.to_string();
    }
    let keep = width.saturating_sub(4);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
