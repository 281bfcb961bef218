pub mod csv_io;
pub mod domain;
pub mod error;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use traits::*;
