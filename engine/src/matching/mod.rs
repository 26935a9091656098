//! Stable matching
//!
//! Domain-free bipartite matching: the logistics network derives both sides'
//! preference lists from one throughput score and hands them to
//! `stable_match`. Nothing here knows about carriers or requests.

pub mod gale_shapley;
pub mod stability;

pub use gale_shapley::stable_match;
pub use stability::{blocking_pairs, is_injective};
