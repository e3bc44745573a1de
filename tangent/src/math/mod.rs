pub use naive::*;
pub use polyfit::*;
pub use sgolay::*;
pub use spline::*;

pub mod naive;
pub mod polyfit;
pub mod sgolay;
pub mod spline;
