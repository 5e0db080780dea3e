use std::mem;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Ast {
    AnyChar,       // '.'
    Empty,         // '$e'
    ImplicitEmpty, // nothing, e.g. either side of '|' in "a|"
    Never,         // '$0'
    CharClass {
        negated: bool,
        elements: Vec<ClassElement>,
    },
    NamedCharClass(char), // \w, \s, \d, ...
    Char(Char),
    Alternation(Box<Ast>, Box<Ast>),
    Concatenation(Box<Ast>, Box<Ast>),
    Iteration(Box<Ast>),    // e+
    OptIteration(Box<Ast>), // e*
    Optional(Box<Ast>),     // e?
    ExactIteration(Box<Ast>, u32),
    MinIteration(Box<Ast>, u32),
    MinMaxIteration(Box<Ast>, u32, u32),
    Group(Box<Ast>),   // (?:e)
    Capture(Box<Ast>), // (e)
}

/// A single character as written in the pattern. Hex forms keep their digits
/// verbatim so the pattern can be printed back unchanged.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Char {
    Simple(char),       // a
    Escaped(char),      // \[
    Special(char),      // \n
    DoubleHex(String),  // \xHH
    QuadHex(String),    // \uHHHH
    DynamicHex(String), // \u{H...}
}

/// Characters that need a backslash to be matched literally.
pub const RESERVED_CHARS: [char; 14] = [
    '|', // alternation
    '*', // optional iteration
    '+', // iteration
    '?', // optional
    '^', // negated set
    '$', // '$0' never, '$e' empty
    '.', // any char
    '\\', // escape
    '{', '}', // repeat brackets
    '(', ')', // group brackets
    '[', ']', // set brackets
];

/// Letters usable after a backslash to write a control character.
pub const SPECIAL_CHARS: [(char, char); 5] = [
    ('n', '\n'),
    ('f', '\u{c}'),
    ('t', '\t'),
    ('v', '\u{b}'),
    ('r', '\r'),
];

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ClassElement {
    Named(char),
    Range(Char, Char), // a-z
    Char(Char),
}

impl Ast {
    pub fn alternation(opt1: Ast, opt2: Ast) -> Ast {
        Ast::Alternation(Box::new(opt1), Box::new(opt2))
    }

    pub fn concatenation(head: Ast, tail: Ast) -> Ast {
        Ast::Concatenation(Box::new(head), Box::new(tail))
    }

    pub fn simple(c: char) -> Ast {
        Ast::Char(Char::Simple(c))
    }

    // moves the children out, leaving empty leaves behind
    fn take_children(&mut self, out: &mut Vec<Ast>) {
        match self {
            Ast::Alternation(lhs, rhs) | Ast::Concatenation(lhs, rhs) => {
                out.push(mem::replace(lhs.as_mut(), Ast::ImplicitEmpty));
                out.push(mem::replace(rhs.as_mut(), Ast::ImplicitEmpty));
            }
            Ast::Iteration(expr)
            | Ast::OptIteration(expr)
            | Ast::Optional(expr)
            | Ast::ExactIteration(expr, _)
            | Ast::MinIteration(expr, _)
            | Ast::MinMaxIteration(expr, _, _)
            | Ast::Group(expr)
            | Ast::Capture(expr) => out.push(mem::replace(expr.as_mut(), Ast::ImplicitEmpty)),
            _ => {}
        }
    }
}

// Trees can be as deep as the pattern is long, so they are freed with an
// explicit stack instead of the recursive default.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.take_children(&mut stack);
        }
    }
}
