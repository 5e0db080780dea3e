use std::collections::BTreeSet;

use super::ast::*;
use super::error::ParseError;
use crate::char_class::special::is_special_class_name;

/// Groups nested deeper than this are rejected.
pub const MAX_NESTING: usize = 256;

enum RepeatKind {
    Exact(u32),
    Min(u32),
    MinMax(u32, u32),
}

/// Recursive descent parser. Every `parse_*` method either consumes its
/// production and returns it, or returns `None` with the position left
/// where it started.
///
/// Only groups nest, and at most [`MAX_NESTING`] deep. Past that the
/// pattern fails with `ParseError::NoAlternative` at the offending group.
pub struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    depth: usize,
    furthest: usize,
    expected: BTreeSet<String>,
}

impl<'a> Parser<'a> {
    pub fn parse(pattern: &str) -> Result<Ast, ParseError> {
        let mut parser = Parser {
            pattern,
            pos: 0,
            depth: 0,
            furthest: 0,
            expected: BTreeSet::new(),
        };

        let ast = parser.parse_root();
        if parser.pos == pattern.len() {
            return Ok(ast);
        }

        parser.fail("end of input");
        Err(parser.error())
    }

    fn error(self) -> ParseError {
        let expected = self.expected.into_iter().collect();
        if self.furthest > self.pos {
            ParseError::NoAlternative {
                offset: self.furthest,
                expected,
            }
        } else {
            ParseError::TrailingInput {
                offset: self.pos,
                expected,
            }
        }
    }

    fn parse_root(&mut self) -> Ast {
        self.parse_alternation()
    }

    fn parse_alternation(&mut self) -> Ast {
        let mut ast = self.parse_concatenation();
        while self.eat("|") {
            let rhs = self.parse_concatenation();
            ast = Ast::alternation(ast, rhs);
        }
        ast
    }

    fn parse_concatenation(&mut self) -> Ast {
        let mut ast = match self.parse_iteration() {
            Some(ast) => ast,
            None => return Ast::ImplicitEmpty,
        };
        while let Some(rhs) = self.parse_iteration() {
            ast = Ast::concatenation(ast, rhs);
        }
        ast
    }

    fn parse_iteration(&mut self) -> Option<Ast> {
        let ast = Box::new(self.parse_atom()?);

        if self.eat("*") {
            return Some(Ast::OptIteration(ast));
        }
        if self.eat("+") {
            return Some(Ast::Iteration(ast));
        }
        if self.eat("?") {
            return Some(Ast::Optional(ast));
        }

        let ast = match self.parse_repeat_kind() {
            Some(RepeatKind::Exact(n)) => Ast::ExactIteration(ast, n),
            Some(RepeatKind::Min(n)) => Ast::MinIteration(ast, n),
            Some(RepeatKind::MinMax(n, m)) => Ast::MinMaxIteration(ast, n, m),
            None => *ast,
        };
        Some(ast)
    }

    fn parse_repeat_kind(&mut self) -> Option<RepeatKind> {
        let start = self.pos;
        let kind = self.parse_repeat_bounds();
        if kind.is_none() {
            self.pos = start;
        }
        kind
    }

    fn parse_repeat_bounds(&mut self) -> Option<RepeatKind> {
        if !self.eat("{") {
            return None;
        }
        self.skip_whitespace();
        let min = self.parse_number()?;
        self.skip_whitespace();

        let kind = if self.eat(",") {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c.is_ascii_digit() => RepeatKind::MinMax(min, self.parse_number()?),
                _ => {
                    self.fail("digit");
                    RepeatKind::Min(min)
                }
            }
        } else {
            RepeatKind::Exact(min)
        };

        self.skip_whitespace();
        if !self.eat("}") {
            return None;
        }
        Some(kind)
    }

    fn parse_atom(&mut self) -> Option<Ast> {
        if let Some(ast) = self.parse_group("(?:") {
            return Some(Ast::Group(ast));
        }
        if let Some(ast) = self.parse_group("(") {
            return Some(Ast::Capture(ast));
        }
        if self.eat(".") {
            return Some(Ast::AnyChar);
        }
        if self.eat("$0") {
            return Some(Ast::Never);
        }
        if self.eat("$e") {
            return Some(Ast::Empty);
        }
        if let Some(ast) = self.parse_set() {
            return Some(ast);
        }
        if let Some(name) = self.parse_named() {
            return Some(Ast::NamedCharClass(name));
        }
        self.parse_char().map(Ast::Char)
    }

    fn parse_group(&mut self, open: &'static str) -> Option<Box<Ast>> {
        let start = self.pos;
        if !self.eat(open) {
            return None;
        }
        if self.depth == MAX_NESTING {
            self.fail(&format!("at most {} nested groups", MAX_NESTING));
            self.pos = start;
            return None;
        }

        self.depth += 1;
        let ast = self.parse_root();
        self.depth -= 1;
        if !self.eat(")") {
            self.pos = start;
            return None;
        }
        Some(Box::new(ast))
    }

    fn parse_set(&mut self) -> Option<Ast> {
        let start = self.pos;
        if !self.eat("[") {
            return None;
        }

        let negated = self.eat("^");
        let mut elements = Vec::new();
        while let Some(element) = self.parse_set_item() {
            elements.push(element);
        }

        if !self.eat("]") {
            self.pos = start;
            return None;
        }
        Some(Ast::CharClass { negated, elements })
    }

    fn parse_set_item(&mut self) -> Option<ClassElement> {
        if let Some(name) = self.parse_named() {
            return Some(ClassElement::Named(name));
        }

        let start = self.parse_char()?;
        let after_start = self.pos;
        if self.eat("-") {
            if let Some(end) = self.parse_char() {
                return Some(ClassElement::Range(start, end));
            }
        }

        // not a range after all, the '-' is read as the next item
        self.pos = after_start;
        Some(ClassElement::Char(start))
    }

    fn parse_named(&mut self) -> Option<char> {
        let start = self.pos;
        if !self.eat("\\") {
            return None;
        }

        let name = self.eat_if(is_special_class_name, "named class");
        if name.is_none() {
            self.pos = start;
        }
        name
    }

    fn parse_char(&mut self) -> Option<Char> {
        if let Some(c) = self.eat_if(|c| !RESERVED_CHARS.contains(&c), "literal") {
            return Some(Char::Simple(c));
        }

        let start = self.pos;
        if !self.eat("\\") {
            return None;
        }

        if let Some(c) = self.eat_if(is_escapable, "escapable char") {
            return Some(Char::Escaped(c));
        }
        if let Some(c) = self.eat_if(is_special_char, "special char") {
            return Some(Char::Special(c));
        }

        let escape = self.pos;
        if self.eat("u") {
            if let Some(hex) = self.parse_hex(4, 4) {
                return Some(Char::QuadHex(hex));
            }
        }

        self.pos = escape;
        if self.eat("x") {
            if let Some(hex) = self.parse_hex(2, 2) {
                return Some(Char::DoubleHex(hex));
            }
        }

        self.pos = escape;
        if self.eat("u{") {
            if let Some(hex) = self.parse_hex(1, 6) {
                if self.eat("}") {
                    return Some(Char::DynamicHex(hex));
                }
            }
        }

        self.pos = start;
        None
    }

    // reads between `min` and `max` hex digits
    fn parse_hex(&mut self, min: usize, max: usize) -> Option<String> {
        let mut hex = String::new();
        while hex.len() < max {
            match self.eat_if(|c| c.is_ascii_hexdigit(), "hex digit") {
                Some(c) => hex.push(c),
                None => break,
            }
        }

        if hex.len() < min {
            return None;
        }
        Some(hex)
    }

    fn parse_number(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut num = String::new();
        while let Some(c) = self.eat_if(|c| c.is_ascii_digit(), "digit") {
            num.push(c);
        }
        if num.is_empty() {
            return None;
        }

        match num.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.pos = start;
                self.fail("number");
                None
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.pattern[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            self.fail(&format!("'{}'", token));
            false
        }
    }

    fn eat_if<F>(&mut self, pred: F, what: &str) -> Option<char>
    where
        F: Fn(char) -> bool,
    {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                Some(c)
            }
            _ => {
                self.fail(what);
                None
            }
        }
    }

    // remembers what was wanted at the furthest position reached so far
    fn fail(&mut self, what: &str) {
        if self.pos > self.furthest {
            self.furthest = self.pos;
            self.expected.clear();
        }
        if self.pos == self.furthest {
            self.expected.insert(what.to_owned());
        }
    }
}

fn is_special_char(c: char) -> bool {
    SPECIAL_CHARS.iter().any(|&(letter, _)| letter == c)
}

fn is_escapable(c: char) -> bool {
    c != 'x' && c != 'u' && !is_special_char(c) && !is_special_class_name(c)
}
