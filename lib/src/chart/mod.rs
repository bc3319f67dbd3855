pub mod csv;
pub mod style;

mod chart;
mod fragment;
mod ticks;

pub use chart::*;
pub use fragment::*;
pub use ticks::*;
