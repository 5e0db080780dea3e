// syntax (like BNF)
//
// root          = alternation
// alternation   = concatenation ( '|' concatenation ) *
// concatenation = iteration *
// iteration     = atom ( '*' | '+' | '?' | '{' repeat '}' ) ?
// repeat        = number ( ',' number ? ) ?
// atom          = '(?:' root ')' | '(' root ')' | '.' | '$0' | '$e'
//               | '[' set ']' | named | char
// set           = '^' ? set-item *
// set-item      = named | char '-' char | char
// named         = '\' ( 's' | 'S' | 'w' | 'W' | 'd' | 'D' )
// char          = literal | '\' escaped | '\' special
//               | '\u' hex{4} | '\x' hex{2} | '\u{' hex{1,6} '}'
//
// Both folds are to the left: "abc" is ((a b) c) and "a|b|c" is ((a|b)|c).
// Whitespace is only allowed inside the repeat brackets.

pub mod ast;
mod error;
mod parser;

pub use ast::{Ast, Char, ClassElement};
pub use error::ParseError;
pub use parser::{Parser, MAX_NESTING};
