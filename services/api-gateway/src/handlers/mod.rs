pub mod bom;
pub mod catalog;
pub mod cost;
pub mod health;

pub use bom::*;
pub use catalog::*;
pub use cost::*;
pub use health::*;
