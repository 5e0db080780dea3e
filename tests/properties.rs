//! Property-based tests for the character class algebra
//!
//! Classes are generated from arbitrary (unsorted, overlapping) range lists
//! over a small code point window so that ranges regularly touch, overlap
//! and nest.

use proptest::prelude::*;
use regex_toy_syntax::resolve::{char_class, class_to_ast};
use regex_toy_syntax::{parse, CharClass, Range, MAX_CODE_POINT};

const WINDOW: u32 = 300;

fn range_strategy() -> impl Strategy<Value = Range> {
    prop_oneof![
        // short ranges, mostly disjoint
        (0..WINDOW, 0..4u32).prop_map(|(start, len)| Range::new(start, start + len)),
        // longer ranges that overlap each other
        (0..WINDOW, 0..60u32).prop_map(|(start, len)| Range::new(start, start + len)),
        // ranges touching the end of the code point space
        (0..8u32).prop_map(|len| Range::new(MAX_CODE_POINT - len, MAX_CODE_POINT)),
    ]
}

fn ranges_strategy() -> impl Strategy<Value = Vec<Range>> {
    prop::collection::vec(range_strategy(), 0..8)
}

fn class_strategy() -> impl Strategy<Value = CharClass> {
    ranges_strategy().prop_map(|ranges| CharClass::structure(&ranges))
}

fn points() -> impl Iterator<Item = u32> {
    (0..WINDOW + 64).chain(MAX_CODE_POINT - 10..=MAX_CODE_POINT)
}

fn is_normalized(class: &CharClass) -> bool {
    class.ranges().iter().all(|r| r.start <= r.end)
        && class
            .ranges()
            .windows(2)
            .all(|pair| pair[0].end + 1 < pair[1].start)
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn structure_normalizes(ranges in ranges_strategy()) {
            let class = CharClass::structure(&ranges);
            prop_assert!(is_normalized(&class), "not normalized: {:?}", class);

            for c in points() {
                let expect = ranges.iter().any(|r| r.contains(c));
                prop_assert_eq!(class.contains(c), expect, "code point {}", c);
            }
        }

        #[test]
        fn structure_is_idempotent(class in class_strategy()) {
            prop_assert_eq!(CharClass::structure(class.ranges()), class);
        }

        #[test]
        fn union_is_commutative(a in class_strategy(), b in class_strategy()) {
            let union = a.union(&b);
            prop_assert!(is_normalized(&union));
            prop_assert_eq!(&union, &b.union(&a));

            for c in points() {
                prop_assert_eq!(union.contains(c), a.contains(c) || b.contains(c));
            }
        }

        #[test]
        fn intersection_is_commutative(a in class_strategy(), b in class_strategy()) {
            let intersection = a.intersection(&b);
            prop_assert!(is_normalized(&intersection));
            prop_assert_eq!(&intersection, &b.intersection(&a));

            for c in points() {
                prop_assert_eq!(intersection.contains(c), a.contains(c) && b.contains(c));
            }
        }

        #[test]
        fn difference_removes_points(a in class_strategy(), b in class_strategy()) {
            let difference = a.difference(&b);
            prop_assert!(is_normalized(&difference));

            for c in points() {
                prop_assert_eq!(difference.contains(c), a.contains(c) && !b.contains(c));
            }
        }

        #[test]
        fn includes_matches_difference(a in class_strategy(), b in class_strategy()) {
            prop_assert_eq!(a.includes(&b), b.difference(&a).is_empty());
            prop_assert!(a.union(&b).includes(&a));
            prop_assert!(a.includes(&a.intersection(&b)));
        }

        #[test]
        fn de_morgan(a in class_strategy(), b in class_strategy()) {
            let expect = a.complement().union(&b.complement()).complement();
            prop_assert_eq!(a.intersection(&b), expect);
        }

        #[test]
        fn complement_is_involutive(a in class_strategy()) {
            let complement = a.complement();
            prop_assert!(is_normalized(&complement));
            prop_assert!(complement.intersection(&a).is_empty());
            prop_assert_eq!(complement.union(&a), CharClass::any());
            prop_assert_eq!(complement.complement(), a);
        }

        #[test]
        fn class_syntax_resolves_back(a in class_strategy()) {
            let ast = class_to_ast(&a);
            prop_assert_eq!(char_class(&ast), Ok(a.clone()));

            let text = ast.to_string();
            let reparsed = parse(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&reparsed, &ast);
            prop_assert_eq!(char_class(&reparsed), Ok(a));
        }
    }
}
