pub mod config;
pub mod lattice;
pub mod lexer;
pub mod phrase;
pub mod span;

pub use config::DecodeConfig;
pub use lattice::{InputPath, InputPaths};
pub use phrase::{Sentence, SubPhrase};
pub use span::Span;
