pub mod bar;
pub mod chart;
pub mod report;
pub mod signals;

pub use bar::*;
pub use chart::*;
pub use report::*;
pub use signals::*;
