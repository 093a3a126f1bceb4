pub mod connection;
pub mod error;
pub mod query;
pub mod session;

pub use connection::*;
pub use error::*;
pub use query::*;
pub use session::*;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod connection_tests;
