mod completer;
mod reader;
pub mod tokenizer;

pub use completer::ShellCompleter;
pub use reader::{EditorSource, LineSource, ReadOutcome, ReaderSource};
pub use tokenizer::tokenize;
