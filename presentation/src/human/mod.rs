//! Terminal input for the human seat

mod console;

pub use console::{HumanConsole, InputRejected, interpret, prompt_for, stdin_lines};
