mod char_class;
mod parser;
mod printer;
pub mod resolve;

pub use char_class::special::{
    is_special_class_name, reduce_special_classes, reduction_order, special_class,
    special_classes, Reduced, SpecialClass,
};
pub use char_class::{CharClass, Range, MAX_CODE_POINT};
pub use parser::ast::{RESERVED_CHARS, SPECIAL_CHARS};
pub use parser::{Ast, Char, ClassElement, ParseError, Parser, MAX_NESTING};
pub use printer::Printer;

/// Parses a pattern into its syntax tree.
pub fn parse(pattern: &str) -> Result<Ast, ParseError> {
    Parser::parse(pattern)
}

/// Writes a syntax tree back as pattern text.
pub fn print(ast: &Ast) -> String {
    Printer::print(ast)
}

impl std::str::FromStr for Ast {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse(s)
    }
}
