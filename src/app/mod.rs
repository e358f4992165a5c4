//! Application root: the dispatcher and its presentation helpers.

pub mod dispatcher;
pub mod replies;
pub mod symbols;

pub use dispatcher::{Dispatcher, Timeouts};
pub use symbols::SymbolTable;
