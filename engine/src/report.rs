//! Cycle report - serializable summary of one cycle
//!
//! Captures the registered requests and the resulting matching so a cycle
//! can be logged, diffed, or compared across runs.
//!
//! # Critical Invariants
//!
//! - **Determinism**: identical registrations against an identical world
//!   produce byte-identical reports and therefore identical digests

use crate::models::{Request, RequestId};
use crate::network::{LogisticsNetwork, Matching};
use crate::world::LogisticsWorld;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub domain: String,
    pub requests: Vec<Request>,
    pub assignments: BTreeMap<String, RequestId>,
    pub unmatched_carriers: Vec<String>,
}

impl CycleReport {
    pub fn new(domain: &str, requests: &[Request], matching: &Matching) -> Self {
        Self {
            domain: domain.to_string(),
            requests: requests.to_vec(),
            assignments: matching.assignments.clone(),
            unmatched_carriers: matching.unmatched_carriers.clone(),
        }
    }

    /// SHA-256 of the canonical JSON encoding, hex encoded
    pub fn digest(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Target reference assigned to `carrier`
    pub fn target_for(&self, carrier: &str) -> Option<&str> {
        let id = self.assignments.get(carrier)?;
        self.requests.iter().find(|r| r.id == *id).map(|r| r.target.as_str())
    }
}

impl LogisticsNetwork {
    /// Report for the current cycle, computing the matching if needed
    pub fn report<W: LogisticsWorld + ?Sized>(&mut self, world: &W) -> CycleReport {
        let matching = self.compute_matching(world).clone();
        CycleReport::new(self.domain(), self.requests(), &matching)
    }
}
