//! Command implementations.

pub mod classify;
pub mod export;
pub mod serve;

pub use self::classify::execute_classify;
pub use self::export::execute_export;
pub use self::serve::execute_serve;
