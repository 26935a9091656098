//! Deferred acceptance (Gale–Shapley)
//!
//! Generic over the identifiers on both sides, so it carries no logistics
//! assumptions. Proposers work down their preference lists; each receiver
//! holds on to the best proposal seen so far and releases the previous one.
//!
//! # Determinism
//!
//! - Free proposers are served in input order (FIFO)
//! - Identifiers are mapped to dense indices once, in input order
//! - Result is a `BTreeMap` for sorted iteration
//!
//! Worst case O(P × R) proposals.

use std::collections::{BTreeMap, VecDeque};

/// Rank used for a proposer the receiver never listed
const UNRANKED: usize = usize::MAX;

/// Compute a stable one-to-one matching
///
/// `proposers` and `receivers` list each participant with its preference
/// order, most preferred first. Identifiers that appear in a preference list
/// but not as a participant are ignored. Participants left over on the
/// larger side are absent from the result.
///
/// # Example
/// ```
/// use logistics_network_core::matching::stable_match;
///
/// let proposers = vec![
///     ("a", vec!["x", "y"]),
///     ("b", vec!["x", "y"]),
/// ];
/// let receivers = vec![
///     ("x", vec!["b", "a"]),
///     ("y", vec!["a", "b"]),
/// ];
/// let matching = stable_match(&proposers, &receivers);
/// assert_eq!(matching.get("a"), Some(&"y"));
/// assert_eq!(matching.get("b"), Some(&"x"));
/// ```
pub fn stable_match<P, R>(proposers: &[(P, Vec<R>)], receivers: &[(R, Vec<P>)]) -> BTreeMap<P, R>
where
    P: Ord + Clone,
    R: Ord + Clone,
{
    let proposer_index: BTreeMap<&P, usize> = proposers.iter().enumerate().map(|(i, (p, _))| (p, i)).collect();
    let receiver_index: BTreeMap<&R, usize> = receivers.iter().enumerate().map(|(i, (r, _))| (r, i)).collect();

    // Proposer preference lists as receiver indices
    let proposals: Vec<Vec<usize>> = proposers
        .iter()
        .map(|(_, prefs)| prefs.iter().filter_map(|r| receiver_index.get(r).copied()).collect())
        .collect();

    // rank[r][p] = position of proposer p in receiver r's list
    let rank: Vec<Vec<usize>> = receivers
        .iter()
        .map(|(_, prefs)| {
            let mut ranks = vec![UNRANKED; proposers.len()];
            for (position, p) in prefs.iter().enumerate() {
                if let Some(&p_idx) = proposer_index.get(p) {
                    if ranks[p_idx] == UNRANKED {
                        ranks[p_idx] = position;
                    }
                }
            }
            ranks
        })
        .collect();

    let mut next_choice = vec![0usize; proposers.len()];
    let mut held_by: Vec<Option<usize>> = vec![None; receivers.len()];
    let mut free: VecDeque<usize> = (0..proposers.len()).collect();

    while let Some(p) = free.pop_front() {
        while next_choice[p] < proposals[p].len() {
            let r = proposals[p][next_choice[p]];
            next_choice[p] += 1;

            let p_rank = rank[r][p];
            if p_rank == UNRANKED {
                continue;
            }
            match held_by[r] {
                None => {
                    held_by[r] = Some(p);
                    break;
                }
                Some(current) if p_rank < rank[r][current] => {
                    held_by[r] = Some(p);
                    free.push_back(current);
                    break;
                }
                Some(_) => {}
            }
        }
    }

    held_by
        .iter()
        .enumerate()
        .filter_map(|(r, holder)| holder.map(|p| (proposers[p].0.clone(), receivers[r].0.clone())))
        .collect()
}
