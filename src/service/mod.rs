//! Stateful in-process services: access gating, quota accounting,
//! session memory, and prompt augmentation.

pub mod access;
pub mod augment;
pub mod quota;
pub mod session;

pub use access::AccessGate;
pub use augment::AugmentationSelector;
pub use quota::QuotaTracker;
pub use session::{SessionStore, SweeperHandle};
