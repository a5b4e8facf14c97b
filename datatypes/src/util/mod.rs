pub mod helpers;
mod result;
pub mod tolerance;

pub use result::Result;
