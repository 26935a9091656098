//! Domain models for the logistics network

pub mod carrier;
pub mod position;
pub mod request;
pub mod resource;
pub mod target;

// Re-exports
pub use carrier::{Carrier, Commitment};
pub use position::Position;
pub use request::{Request, RequestId, RequestOptions};
pub use resource::{Cargo, ResourceSelector, ResourceType, Store};
pub use target::{Slot, Target, TargetKind};
