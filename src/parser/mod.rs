pub mod lexer;
pub mod parse;

pub use lexer::{Lexer, Spanned, Token};
pub use parse::{parse_module, Parser};
