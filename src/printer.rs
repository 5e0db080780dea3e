use std::fmt;

use crate::parser::ast::{Ast, Char, ClassElement};

/// Writes a syntax tree back as pattern text.
///
/// Groups are only printed where the tree has a `Group` or `Capture` node, so
/// the output parses back to the same tree only if the tree already carries
/// the groups its shape needs.
pub struct Printer {
    out: String,
}

impl Printer {
    pub fn print(ast: &Ast) -> String {
        let mut printer = Printer { out: String::new() };
        printer.print_root(ast);
        printer.out
    }

    fn print_root(&mut self, ast: &Ast) {
        match ast {
            Ast::AnyChar => self.out.push('.'),
            Ast::Empty => self.out.push_str("$e"),
            Ast::ImplicitEmpty => {}
            Ast::Never => self.out.push_str("$0"),
            Ast::CharClass { negated, elements } => self.print_set(*negated, elements),
            Ast::NamedCharClass(name) => self.print_named(*name),
            Ast::Char(c) => self.print_char(c),
            Ast::Alternation(..) | Ast::Concatenation(..) => self.print_spine(ast),
            Ast::Iteration(expr) => self.print_suffixed(expr, "+"),
            Ast::OptIteration(expr) => self.print_suffixed(expr, "*"),
            Ast::Optional(expr) => self.print_suffixed(expr, "?"),
            Ast::ExactIteration(expr, amount) => {
                self.print_suffixed(expr, &format!("{{{}}}", amount))
            }
            Ast::MinIteration(expr, min) => self.print_suffixed(expr, &format!("{{{},}}", min)),
            Ast::MinMaxIteration(expr, min, max) => {
                self.print_suffixed(expr, &format!("{{{},{}}}", min, max))
            }
            Ast::Group(expr) => self.print_enclosed("(?:", expr),
            Ast::Capture(expr) => self.print_enclosed("(", expr),
        }
    }

    // Both folds lean left, so the left spine is as long as the pattern.
    // It is walked with a loop, only right children recurse.
    fn print_spine(&mut self, ast: &Ast) {
        let mut rest = Vec::new();
        let mut node = ast;
        loop {
            match node {
                Ast::Alternation(opt1, opt2) => {
                    rest.push(("|", opt2.as_ref()));
                    node = opt1;
                }
                Ast::Concatenation(head, tail) => {
                    rest.push(("", tail.as_ref()));
                    node = head;
                }
                _ => break,
            }
        }

        self.print_root(node);
        for (sep, expr) in rest.into_iter().rev() {
            self.out.push_str(sep);
            self.print_root(expr);
        }
    }

    fn print_suffixed(&mut self, expr: &Ast, suffix: &str) {
        self.print_root(expr);
        self.out.push_str(suffix);
    }

    fn print_enclosed(&mut self, open: &str, expr: &Ast) {
        self.out.push_str(open);
        self.print_root(expr);
        self.out.push(')');
    }

    fn print_set(&mut self, negated: bool, elements: &[ClassElement]) {
        self.out.push('[');
        if negated {
            self.out.push('^');
        }
        for element in elements {
            match element {
                ClassElement::Named(name) => self.print_named(*name),
                ClassElement::Range(start, end) => {
                    self.print_char(start);
                    self.out.push('-');
                    self.print_char(end);
                }
                ClassElement::Char(c) => self.print_char(c),
            }
        }
        self.out.push(']');
    }

    fn print_named(&mut self, name: char) {
        self.out.push('\\');
        self.out.push(name);
    }

    fn print_char(&mut self, c: &Char) {
        match c {
            Char::Simple(c) => self.out.push(*c),
            Char::Escaped(c) | Char::Special(c) => {
                self.out.push('\\');
                self.out.push(*c);
            }
            Char::DoubleHex(hex) => {
                self.out.push_str("\\x");
                self.out.push_str(hex);
            }
            Char::QuadHex(hex) => {
                self.out.push_str("\\u");
                self.out.push_str(hex);
            }
            Char::DynamicHex(hex) => {
                self.out.push_str("\\u{");
                self.out.push_str(hex);
                self.out.push('}');
            }
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::print(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(c: char) -> Ast {
        Ast::simple(c)
    }

    fn boxed(c: char) -> Box<Ast> {
        Box::new(simple(c))
    }

    #[test]
    fn print_constants() {
        assert_eq!(Printer::print(&Ast::AnyChar), ".");
        assert_eq!(Printer::print(&Ast::Empty), "$e");
        assert_eq!(Printer::print(&Ast::ImplicitEmpty), "");
        assert_eq!(Printer::print(&Ast::Never), "$0");
        assert_eq!(Printer::print(&Ast::NamedCharClass('w')), r"\w");
    }

    #[test]
    fn print_chars() {
        let cases = [
            (Char::Simple('#'), "#"),
            (Char::Escaped('('), r"\("),
            (Char::Escaped('\\'), r"\\"),
            (Char::Special('n'), r"\n"),
            (Char::DoubleHex("A4".to_owned()), r"\xA4"),
            (Char::QuadHex("14A2".to_owned()), r"\u14A2"),
            (Char::DynamicHex("A4D".to_owned()), r"\u{A4D}"),
        ];

        for (c, expect) in cases {
            assert_eq!(Printer::print(&Ast::Char(c)), expect);
        }
    }

    #[test]
    fn print_sets() {
        let set = Ast::CharClass {
            negated: false,
            elements: vec![
                ClassElement::Range(Char::Simple('a'), Char::Simple('z')),
                ClassElement::Named('w'),
                ClassElement::Char(Char::Escaped('[')),
                ClassElement::Range(Char::DoubleHex("30".to_owned()), Char::Special('t')),
            ],
        };
        assert_eq!(Printer::print(&set), r"[a-z\w\[\x30-\t]");

        let negated = Ast::CharClass {
            negated: true,
            elements: vec![],
        };
        assert_eq!(Printer::print(&negated), "[^]");
    }

    #[test]
    fn print_iterations() {
        let cases = [
            (Ast::Iteration(boxed('a')), "a+"),
            (Ast::OptIteration(boxed('a')), "a*"),
            (Ast::Optional(boxed('a')), "a?"),
            (Ast::ExactIteration(boxed('a'), 2), "a{2}"),
            (Ast::MinIteration(boxed('a'), 2), "a{2,}"),
            (Ast::MinMaxIteration(boxed('a'), 2, 5), "a{2,5}"),
        ];

        for (ast, expect) in cases {
            assert_eq!(Printer::print(&ast), expect);
        }
    }

    #[test]
    fn print_composites() {
        let ast = Ast::concatenation(
            Ast::Group(Box::new(Ast::alternation(simple('a'), Ast::ImplicitEmpty))),
            Ast::Capture(Box::new(Ast::concatenation(simple('b'), simple('c')))),
        );
        assert_eq!(Printer::print(&ast), "(?:a|)(bc)");
    }

    #[test]
    fn does_not_add_groups() {
        // (a|b)c without the group node
        let ast = Ast::concatenation(Ast::alternation(simple('a'), simple('b')), simple('c'));
        assert_eq!(Printer::print(&ast), "a|bc");
    }

    #[test]
    fn mixed_spine() {
        // ((a|b)c)|d
        let ast = Ast::alternation(
            Ast::concatenation(Ast::alternation(simple('a'), simple('b')), simple('c')),
            simple('d'),
        );
        assert_eq!(Printer::print(&ast), "a|bc|d");
    }

    #[test]
    fn long_flat_pattern() {
        let pattern = "a".repeat(100_000);
        let ast = crate::parse(&pattern).unwrap();
        assert_eq!(Printer::print(&ast), pattern);
        drop(ast);

        let pattern = "a|".repeat(50_000);
        let ast = crate::parse(&pattern).unwrap();
        assert_eq!(Printer::print(&ast), pattern);
    }

    #[test]
    fn display() {
        let ast = Ast::OptIteration(Box::new(Ast::NamedCharClass('d')));
        assert_eq!(ast.to_string(), r"\d*");
        assert_eq!(format!("<{}>", ast), r"<\d*>");
    }
}
