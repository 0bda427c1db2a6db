//! CLI command implementations

mod batch;
mod convert;
mod info;

pub use batch::batch;
pub use convert::{convert, ConvertOptions};
pub use info::info;
