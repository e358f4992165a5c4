//! Concrete implementations of the boundary traits plus the Telegram
//! transport.

pub mod coingecko;
pub mod openai;
pub mod quota_file;
pub mod serper;
pub mod telegram;

pub use coingecko::CoinGecko;
pub use openai::OpenAi;
pub use quota_file::JsonQuotaStore;
pub use serper::Serper;
