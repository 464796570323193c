//! File I/O, validation, and serialization for the confluence pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::RunName;
pub use error::IoError;
pub use reader::TableReader;
pub use writer::{ResultWriter, write_labeled_csv};
