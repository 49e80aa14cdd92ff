// Bang Parser Library
// Hand-rolled scanner and recursive-descent parser for the Bang language

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::*;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::*;

// Main parsing function
pub fn parse_program(input: &str) -> Result<Node, ParseError> {
    Parser::new(input).parse_program()
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
