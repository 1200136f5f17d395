//! Line-oriented presentation layer. Every command turns into one or more
//! store actions; nothing here decides what a valid entry is.

pub mod core;
pub mod output;
pub mod shell;

pub use self::core::{CliMode, CommandError, LoopControl, ShellContext};
pub use shell::{handle_line, run_cli};
