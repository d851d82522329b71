mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{OutputMode, run_with_format, run_with_writer};
pub use util::{parse_output_mode, parse_window};
