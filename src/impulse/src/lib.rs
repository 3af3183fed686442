pub mod body;
pub mod body_set;
pub mod constraint;
pub mod error;
pub mod timestep;
pub mod world;

pub use math::{V3, EPS};
