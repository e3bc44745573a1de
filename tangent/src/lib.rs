pub mod batch;
pub mod data;
pub mod error;
pub mod logger;
pub mod math;
pub mod rank;
pub mod table;

pub use batch::*;
pub use data::*;
pub use error::*;
pub use logger::*;
pub use math::*;
pub use rank::*;
pub use table::*;
