// Named classes usable as `\w`, `\s`, ... in patterns.

use once_cell::sync::Lazy;

use super::{CharClass, Range};

#[derive(Debug, PartialEq, Eq)]
pub struct SpecialClass {
    pub name: char,
    pub class: CharClass,
}

/// Output item of `reduce_special_classes`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Reduced {
    Named(char),
    Range(Range),
}

static SPECIAL_CLASSES: Lazy<Vec<SpecialClass>> = Lazy::new(|| {
    let space = CharClass::structure(&[
        Range::from(' '),
        Range::from('\n'),
        Range::from('\t'),
        Range::from('\r'),
    ]);
    let word = CharClass::structure(&[
        Range::new('a' as u32, 'z' as u32),
        Range::new('A' as u32, 'Z' as u32),
        Range::new('0' as u32, '9' as u32),
        Range::from('_'),
    ]);
    let digit = CharClass::structure(&[Range::new('0' as u32, '9' as u32)]);

    vec![
        SpecialClass {
            name: 's',
            class: space.clone(),
        },
        SpecialClass {
            name: 'S',
            class: space.complement(),
        },
        SpecialClass {
            name: 'w',
            class: word.clone(),
        },
        SpecialClass {
            name: 'W',
            class: word.complement(),
        },
        SpecialClass {
            name: 'd',
            class: digit.clone(),
        },
        SpecialClass {
            name: 'D',
            class: digit.complement(),
        },
    ]
});

// Indices into SPECIAL_CLASSES such that a class comes before every class it
// includes. Inclusion is only a partial order, so unrelated classes keep
// their declaration order.
static REDUCTION_ORDER: Lazy<Vec<usize>> = Lazy::new(|| {
    let classes = &*SPECIAL_CLASSES;
    let mut remaining: Vec<usize> = (0..classes.len()).collect();
    let mut order = Vec::with_capacity(classes.len());

    while !remaining.is_empty() {
        let pos = remaining
            .iter()
            .position(|&i| {
                !remaining.iter().any(|&j| {
                    j != i
                        && classes[j].class != classes[i].class
                        && classes[j].class.includes(&classes[i].class)
                })
            })
            .unwrap_or(0);
        order.push(remaining.remove(pos));
    }

    order
});

/// All named classes, in declaration order.
pub fn special_classes() -> &'static [SpecialClass] {
    &SPECIAL_CLASSES
}

pub fn special_class(name: char) -> Option<&'static CharClass> {
    SPECIAL_CLASSES
        .iter()
        .find(|special| special.name == name)
        .map(|special| &special.class)
}

pub fn is_special_class_name(name: char) -> bool {
    special_class(name).is_some()
}

/// The named classes in the order `reduce_special_classes` tries them.
pub fn reduction_order() -> impl Iterator<Item = &'static SpecialClass> {
    REDUCTION_ORDER.iter().map(|&i| &SPECIAL_CLASSES[i])
}

/// Expresses a class with as many named classes as fit into it, followed by
/// the ranges none of them covered.
pub fn reduce_special_classes(class: &CharClass) -> Vec<Reduced> {
    let mut out = Vec::new();
    let mut remainder = class.clone();

    for special in reduction_order() {
        if class.includes(&special.class) && !remainder.intersection(&special.class).is_empty() {
            remainder = remainder.difference(&special.class);
            out.push(Reduced::Named(special.name));
            if remainder.is_empty() {
                break;
            }
        }
    }

    out.extend(remainder.iter().map(|&range| Reduced::Range(range)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[Reduced]) -> String {
        items
            .iter()
            .filter_map(|item| match item {
                Reduced::Named(name) => Some(*name),
                Reduced::Range(_) => None,
            })
            .collect()
    }

    #[test]
    fn registry_contents() {
        let names: String = special_classes().iter().map(|s| s.name).collect();
        assert_eq!(names, "sSwWdD");

        let space = special_class('s').unwrap();
        assert_eq!(
            space.ranges(),
            &[Range::new(9, 10), Range::single(13), Range::single(32)]
        );
        assert_eq!(
            special_class('d').unwrap().ranges(),
            &[Range::new(0x30, 0x39)]
        );
        assert_eq!(special_class('S').unwrap(), &space.complement());
        assert_eq!(special_class('x'), None);
        assert!(is_special_class_name('W'));
        assert!(!is_special_class_name('n'));
    }

    #[test]
    fn reduction_order_respects_inclusion() {
        let order: Vec<&SpecialClass> = reduction_order().collect();
        for (i, earlier) in order.iter().enumerate() {
            for later in order[i + 1..].iter() {
                assert!(
                    !later.class.includes(&earlier.class),
                    "{} includes {} but comes after it",
                    later.name,
                    earlier.name
                );
            }
        }

        let names: String = order.iter().map(|s| s.name).collect();
        assert_eq!(names, "SwdDWs");
    }

    #[test]
    fn reduce_single_named_class() {
        let word = special_class('w').unwrap();
        assert_eq!(reduce_special_classes(word), vec![Reduced::Named('w')]);

        let not_digit = special_class('D').unwrap();
        assert_eq!(reduce_special_classes(not_digit), vec![Reduced::Named('D')]);
    }

    #[test]
    fn reduce_with_leftover_ranges() {
        let class = special_class('w').unwrap().union(&CharClass::from('!'));
        assert_eq!(
            reduce_special_classes(&class),
            vec![Reduced::Named('w'), Reduced::Range(Range::from('!'))]
        );

        let class = CharClass::from(Range::new('a' as u32, 'c' as u32));
        assert_eq!(
            reduce_special_classes(&class),
            vec![Reduced::Range(Range::new('a' as u32, 'c' as u32))]
        );
    }

    #[test]
    fn reduce_combined_classes() {
        let class = special_class('d')
            .unwrap()
            .union(special_class('s').unwrap());
        assert_eq!(names(&reduce_special_classes(&class)), "ds");

        assert_eq!(names(&reduce_special_classes(&CharClass::any())), "SD");
    }

    #[test]
    fn reduce_empty() {
        assert_eq!(reduce_special_classes(&CharClass::empty()), vec![]);
    }
}
