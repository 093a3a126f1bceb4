pub mod chart;
pub mod console;
pub mod result_table;

pub use chart::*;
pub use console::*;
pub use result_table::*;
