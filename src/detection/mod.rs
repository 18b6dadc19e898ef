//! Detection implementation submodule.
//!
//! Internal details of probing a single candidate:
//!
//! - `is_executable`: search-path aware executability check
//! - `run_helper`: spawns the version helper with a 1 second timeout
//! - `parse_java_version`: regex extraction of `major.minor.patch[_update]`

mod helper;
mod parser;
mod path_finder;

pub(crate) use helper::{parse_helper_output, run_helper};
pub(crate) use parser::parse_java_version;
pub(crate) use path_finder::is_executable;
