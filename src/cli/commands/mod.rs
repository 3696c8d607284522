mod command_result;
pub mod init;
pub mod migrate;

pub use command_result::*;
