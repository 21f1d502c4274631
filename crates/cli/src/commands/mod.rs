pub mod adapt;
pub mod dissect;
pub mod score;
pub mod util;

pub use adapt::*;
pub use dissect::*;
pub use score::*;
pub use util::*;
