mod dispatch;
mod executor;
mod options;
mod sample_data;
mod script;
mod types;

pub use dispatch::*;
pub use executor::*;
pub use options::*;
pub use types::*;
