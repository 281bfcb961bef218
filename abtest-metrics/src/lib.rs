pub mod aggregators;
pub mod analysis;
pub mod generators;
pub mod session;
pub mod statistical;

pub use aggregators::*;
pub use analysis::*;
pub use generators::*;
pub use session::*;
pub use statistical::*;
