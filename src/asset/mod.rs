//! Media reference extraction and copying.

mod error;
mod process;
mod scan;

pub use error::CopyError;
pub use process::copy_media_assets;
