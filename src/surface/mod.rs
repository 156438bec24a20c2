pub mod console;

pub use console::{run_console, CommandParseError, EditCommand};
