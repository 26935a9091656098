//! Blocking-pair detection for score-derived matchings
//!
//! When both sides rank each other by one symmetric score, a pair (p, r)
//! blocks a matching if the score of (p, r) strictly beats both p's current
//! partner and r's current partner. An unmatched participant accepts anyone.

use std::collections::BTreeMap;

/// Every blocking pair of `matching` under `score`, in input order
pub fn blocking_pairs<P, R, F>(proposers: &[P], receivers: &[R], score: F, matching: &BTreeMap<P, R>) -> Vec<(P, R)>
where
    P: Ord + Clone,
    R: Ord + Clone,
    F: Fn(&P, &R) -> f64,
{
    let holder: BTreeMap<&R, &P> = matching.iter().map(|(p, r)| (r, p)).collect();
    let mut blocking = Vec::new();

    for p in proposers {
        let p_current = matching.get(p).map(|r| score(p, r)).unwrap_or(f64::NEG_INFINITY);
        for r in receivers {
            if matching.get(p) == Some(r) {
                continue;
            }
            let candidate = score(p, r);
            let r_current = holder.get(r).map(|q| score(q, r)).unwrap_or(f64::NEG_INFINITY);
            if candidate > p_current && candidate > r_current {
                blocking.push((p.clone(), r.clone()));
            }
        }
    }
    blocking
}

/// `true` if no participant is matched twice on either side
pub fn is_injective<P: Ord, R: Ord>(matching: &BTreeMap<P, R>) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    matching.values().all(|r| seen.insert(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_swapped_assignment() {
        let score = |p: &u8, r: &u8| if p == r { 10.0 } else { 1.0 };
        let mut matching = BTreeMap::new();
        matching.insert(0u8, 1u8);
        matching.insert(1u8, 0u8);
        let blocking = blocking_pairs(&[0u8, 1], &[0u8, 1], score, &matching);
        assert_eq!(blocking, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_unmatched_pair_blocks() {
        let matching: BTreeMap<u8, u8> = BTreeMap::new();
        let blocking = blocking_pairs(&[0u8], &[0u8], |_, _| 0.0, &matching);
        assert_eq!(blocking, vec![(0, 0)]);
    }

    #[test]
    fn test_injective() {
        let mut matching = BTreeMap::new();
        matching.insert("a", 1);
        matching.insert("b", 1);
        assert!(!is_injective(&matching));
    }
}
