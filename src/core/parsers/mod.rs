//! File parsers for component sources and message files.
//!
//! - `json`: locale message files (scans the messages directory)
//! - `sfc`: block boundaries of `.vue` single-file components
//! - `script`: script block contents (uses swc for AST generation)

pub mod json;
pub mod script;
pub mod sfc;
