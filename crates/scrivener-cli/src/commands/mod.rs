//! Command implementations.

pub mod ask;
pub mod show;

pub use self::ask::execute_ask;
pub use self::show::execute_show;
