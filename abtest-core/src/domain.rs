pub mod ids;
pub mod group;
pub mod config;
pub mod dataset;
pub mod result;

pub use ids::*;
pub use group::*;
pub use config::*;
pub use dataset::*;
pub use result::*;
