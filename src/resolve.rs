// Conversions between class-like syntax nodes and code point sets.

use thiserror::Error;

use crate::char_class::special::{reduce_special_classes, special_class, Reduced};
use crate::char_class::{CharClass, Range, MAX_CODE_POINT};
use crate::parser::ast::{Ast, Char, ClassElement, RESERVED_CHARS, SPECIAL_CHARS};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    #[error("'{0}' is not a valid code point")]
    InvalidCodePoint(String),
    #[error("range {start:#x}-{end:#x} is out of order")]
    ReversedRange { start: u32, end: u32 },
    #[error("unknown named class '\\{0}'")]
    UnknownClass(char),
    #[error("node does not describe a character class")]
    NotAClass,
}

impl Char {
    pub fn code_point(&self) -> Result<u32, ResolveError> {
        match self {
            Char::Simple(c) | Char::Escaped(c) => Ok(*c as u32),
            Char::Special(letter) => SPECIAL_CHARS
                .iter()
                .find(|(l, _)| l == letter)
                .map(|&(_, c)| c as u32)
                .ok_or_else(|| ResolveError::InvalidCodePoint(format!("\\{}", letter))),
            Char::DoubleHex(hex) | Char::QuadHex(hex) | Char::DynamicHex(hex) => {
                match u32::from_str_radix(hex, 16) {
                    Ok(c) if c <= MAX_CODE_POINT => Ok(c),
                    _ => Err(ResolveError::InvalidCodePoint(hex.clone())),
                }
            }
        }
    }
}

/// The set of code points matched by a single-character node: `.`, a
/// literal, a named class or a `[...]` set.
pub fn char_class(ast: &Ast) -> Result<CharClass, ResolveError> {
    match ast {
        Ast::AnyChar => Ok(CharClass::any()),
        Ast::Char(c) => Ok(CharClass::from(Range::single(c.code_point()?))),
        Ast::NamedCharClass(name) => named_class(*name),
        Ast::CharClass { negated, elements } => {
            let mut class = CharClass::empty();
            for element in elements {
                class = class.union(&element_class(element)?);
            }

            if *negated {
                Ok(class.complement())
            } else {
                Ok(class)
            }
        }
        _ => Err(ResolveError::NotAClass),
    }
}

fn element_class(element: &ClassElement) -> Result<CharClass, ResolveError> {
    match element {
        ClassElement::Named(name) => named_class(*name),
        ClassElement::Range(start, end) => {
            let (start, end) = (start.code_point()?, end.code_point()?);
            if start > end {
                return Err(ResolveError::ReversedRange { start, end });
            }
            Ok(CharClass::from(Range::new(start, end)))
        }
        ClassElement::Char(c) => Ok(CharClass::from(Range::single(c.code_point()?))),
    }
}

fn named_class(name: char) -> Result<CharClass, ResolveError> {
    special_class(name)
        .cloned()
        .ok_or(ResolveError::UnknownClass(name))
}

/// Builds a `[...]` node matching exactly the given set, using named classes
/// where they fit.
pub fn class_to_ast(class: &CharClass) -> Ast {
    let elements = reduce_special_classes(class)
        .into_iter()
        .map(|item| match item {
            Reduced::Named(name) => ClassElement::Named(name),
            Reduced::Range(range) if range.start == range.end => {
                ClassElement::Char(char_syntax(range.start))
            }
            Reduced::Range(range) => {
                ClassElement::Range(char_syntax(range.start), char_syntax(range.end))
            }
        })
        .collect();

    Ast::CharClass {
        negated: false,
        elements,
    }
}

fn char_syntax(code_point: u32) -> Char {
    if let Some(&(letter, _)) = SPECIAL_CHARS
        .iter()
        .find(|&&(_, control)| control as u32 == code_point)
    {
        return Char::Special(letter);
    }

    match char::from_u32(code_point) {
        Some(c) if c == '-' || RESERVED_CHARS.contains(&c) => Char::Escaped(c),
        Some(c) if c == ' ' || c.is_ascii_graphic() => Char::Simple(c),
        _ if code_point <= 0xFF => Char::DoubleHex(format!("{:02X}", code_point)),
        _ if code_point <= 0xFFFF => Char::QuadHex(format!("{:04X}", code_point)),
        _ => Char::DynamicHex(format!("{:X}", code_point)),
    }
}
