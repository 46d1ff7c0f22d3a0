// File: ./src/model/mod.rs
pub mod display;
pub mod item;
pub mod matcher;
pub mod parser;
pub mod sort;

pub use display::TaskRow;
pub use item::{Priority, Task};
pub use parser::TagSet;
pub use sort::Sort;
