//! Sort keys and the backend sorter.

use std::cmp::Reverse;

use crate::model::Backend;

/// Comparable value extracted from a backend.
///
/// Missing numbers sort before any present value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Missing,
    Integer(u64),
    Text(String),
}

impl From<Option<u64>> for SortKey {
    fn from(v: Option<u64>) -> Self {
        v.map(SortKey::Integer).unwrap_or(SortKey::Missing)
    }
}

/// Key extractor attached to a sortable column.
pub type SortFn = fn(&Backend) -> SortKey;

pub fn by_name(b: &Backend) -> SortKey {
    SortKey::Text(b.stats.name.clone())
}

pub fn by_status(b: &Backend) -> SortKey {
    SortKey::Text(b.stats.status.clone())
}

pub fn by_sessions(b: &Backend) -> SortKey {
    b.stats.scur.into()
}

pub fn by_request_rate(b: &Backend) -> SortKey {
    b.stats.req_rate.into()
}

/// Bytes in plus bytes out.
pub fn by_traffic(b: &Backend) -> SortKey {
    match (b.stats.bin, b.stats.bout) {
        (None, None) => SortKey::Missing,
        (bin, bout) => SortKey::Integer(bin.unwrap_or(0).saturating_add(bout.unwrap_or(0))),
    }
}

pub fn by_proxy(b: &Backend) -> SortKey {
    SortKey::Text(b.proxy_name.clone())
}

/// Sorts in place by `key`, descending when `reversed`.
///
/// The sort is stable in both directions: backends with equal keys keep
/// the order they were polled in.
pub fn sort_backends(backends: &mut [&Backend], key: SortFn, reversed: bool) {
    if reversed {
        backends.sort_by_cached_key(|b| Reverse(key(b)));
    } else {
        backends.sort_by_cached_key(|b| key(b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::backend;

    fn with_scur(name: &str, scur: Option<u64>) -> Backend {
        let mut b = backend(name, "UP", "lb01", &[]);
        b.stats.scur = scur;
        b
    }

    fn names(list: &[&Backend]) -> Vec<String> {
        list.iter().map(|b| b.name().to_string()).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let (c, a, b) = (with_scur("c", None), with_scur("a", None), with_scur("b", None));
        let mut list = vec![&c, &a, &b];
        sort_backends(&mut list, by_name, false);
        assert_eq!(names(&list), vec!["a", "b", "c"]);

        sort_backends(&mut list, by_name, true);
        assert_eq!(names(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_missing_numbers_sort_first() {
        let (x, y, z) = (
            with_scur("x", Some(5)),
            with_scur("y", None),
            with_scur("z", Some(1)),
        );
        let mut list = vec![&x, &y, &z];
        sort_backends(&mut list, by_sessions, false);
        assert_eq!(names(&list), vec!["y", "z", "x"]);
    }

    #[test]
    fn test_constant_key_is_stable_both_ways() {
        let items: Vec<Backend> = ["d", "a", "c", "b"]
            .iter()
            .map(|n| with_scur(n, Some(7)))
            .collect();
        let original: Vec<&Backend> = items.iter().collect();

        let mut list = original.clone();
        sort_backends(&mut list, by_sessions, false);
        assert_eq!(list, original);

        sort_backends(&mut list, by_sessions, true);
        assert_eq!(list, original);
    }

    #[test]
    fn test_reverse_twice_restores_order() {
        let items: Vec<Backend> = [("a", 3), ("b", 1), ("c", 3), ("d", 2)]
            .iter()
            .map(|(n, s)| with_scur(n, Some(*s)))
            .collect();
        let mut list: Vec<&Backend> = items.iter().collect();

        sort_backends(&mut list, by_sessions, false);
        let ascending = names(&list);
        assert_eq!(ascending, vec!["b", "d", "a", "c"]);

        sort_backends(&mut list, by_sessions, true);
        assert_eq!(names(&list), vec!["a", "c", "d", "b"]);

        sort_backends(&mut list, by_sessions, false);
        assert_eq!(names(&list), ascending);
    }

    #[test]
    fn test_traffic_key_sums_directions() {
        let mut b = backend("t", "UP", "lb01", &[]);
        assert_eq!(by_traffic(&b), SortKey::Missing);
        b.stats.bin = Some(10);
        assert_eq!(by_traffic(&b), SortKey::Integer(10));
        b.stats.bout = Some(5);
        assert_eq!(by_traffic(&b), SortKey::Integer(15));
    }
}
