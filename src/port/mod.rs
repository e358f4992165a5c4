//! Boundary traits for external collaborators. Adapters implement these;
//! the engine only ever sees the traits.

pub mod llm;
pub mod market;
pub mod search;
pub mod store;

pub use llm::Llm;
pub use market::MarketData;
pub use search::{SearchHit, WebSearch};
pub use store::QuotaStore;
