//! Operating-system capabilities consumed by the enumerators and pipeline.
//!
//! Both are traits so discovery can run against in-memory fakes.

mod fs;
mod registry;

pub use fs::{FileSystem, LocalFileSystem};
pub use registry::{RegExe, Registry, RegistryView};
