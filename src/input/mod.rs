mod completer;
mod reader;

pub use completer::ShellCompleter;
pub use reader::{LineReader, ReadOutcome};
