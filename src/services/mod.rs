pub mod analyzer;
pub mod report;
pub mod resolver;
pub mod signals;

pub use analyzer::Analyzer;
pub use resolver::{resolve, sanitize};
