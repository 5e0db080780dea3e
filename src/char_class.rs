// Character classes as sets of code points.
//
// A class is a list of inclusive ranges kept in normal form:
//
//   - ranges are sorted by their start
//   - two consecutive ranges a, b never touch: a.end + 1 < b.start
//
// The only way to build a `CharClass` is through `structure` (or the
// conversions built on it), so every operation below may rely on that form
// and walks its operands with plain index cursors.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not, Sub};

pub mod special;


/// The largest unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// An inclusive range of code points.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub const fn new(start: u32, end: u32) -> Range {
        Range { start, end }
    }

    pub const fn single(c: u32) -> Range {
        Range { start: c, end: c }
    }

    pub fn contains(&self, c: u32) -> bool {
        self.start <= c && c <= self.end
    }

    // ranges that overlap or sit right next to each other
    fn touches(&self, other: &Range) -> bool {
        self.end.saturating_add(1) >= other.start && other.end.saturating_add(1) >= self.start
    }
}

impl From<char> for Range {
    fn from(c: char) -> Self {
        Range::single(c as u32)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{:#x}", self.start)
        } else {
            write!(f, "{:#x}-{:#x}", self.start, self.end)
        }
    }
}

/// A normalized set of code point ranges.
#[derive(Debug, PartialEq, Eq, Clone, Default, Hash)]
pub struct CharClass {
    ranges: Vec<Range>,
}

impl CharClass {
    pub const fn empty() -> CharClass {
        CharClass { ranges: Vec::new() }
    }

    /// Every code point.
    pub fn any() -> CharClass {
        CharClass {
            ranges: vec![Range::new(0, MAX_CODE_POINT)],
        }
    }

    /// Sorts the given ranges and merges the overlapping or consecutive ones.
    /// Reversed ranges (`start > end`) hold no code point and are dropped.
    pub fn structure(ranges: &[Range]) -> CharClass {
        let mut sorted: Vec<Range> = ranges
            .iter()
            .filter(|r| r.start <= r.end)
            .copied()
            .collect();
        sorted.sort_by_key(|r| r.start);

        let mut iter = sorted.into_iter();
        let mut prev = match iter.next() {
            Some(r) => r,
            None => return CharClass::empty(),
        };

        let mut reduced = Vec::new();
        for next in iter {
            if prev.end.saturating_add(1) >= next.start {
                prev.end = prev.end.max(next.end);
            } else {
                reduced.push(prev);
                prev = next;
            }
        }
        reduced.push(prev);

        CharClass { ranges: reduced }
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of ranges (not code points).
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn contains(&self, c: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if r.end < c {
                    std::cmp::Ordering::Less
                } else if r.start > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn intersection(&self, other: &CharClass) -> CharClass {
        let (a, b) = (&self.ranges, &other.ranges);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();

        while i < a.len() && j < b.len() {
            let (head1, head2) = (a[i], b[j]);

            if head1.end < head2.start {
                i += 1;
                continue;
            }
            if head2.end < head1.start {
                j += 1;
                continue;
            }

            out.push(Range::new(
                head1.start.max(head2.start),
                head1.end.min(head2.end),
            ));

            if head1.end <= head2.end {
                i += 1;
            }
            if head2.end <= head1.end {
                j += 1;
            }
        }

        CharClass { ranges: out }
    }

    pub fn union(&self, other: &CharClass) -> CharClass {
        let (a, b) = (&self.ranges, &other.ranges);
        let (mut i, mut j) = (0, 0);
        let mut out: Vec<Range> = Vec::with_capacity(a.len() + b.len());

        // take the head with the lowest start, absorbing it into the coverage
        // range built so far when they touch
        loop {
            let next = match (a.get(i), b.get(j)) {
                (Some(head1), Some(head2)) if head1.start <= head2.start => {
                    i += 1;
                    *head1
                }
                (_, Some(head2)) => {
                    j += 1;
                    *head2
                }
                (Some(head1), None) => {
                    i += 1;
                    *head1
                }
                (None, None) => break,
            };

            match out.last_mut() {
                Some(coverage) if coverage.touches(&next) => {
                    coverage.end = coverage.end.max(next.end);
                }
                _ => out.push(next),
            }
        }

        CharClass { ranges: out }
    }

    /// The code points of `self` that are not in `other`.
    pub fn difference(&self, other: &CharClass) -> CharClass {
        let excluded = &other.ranges;
        let mut j = 0;
        let mut out = Vec::new();

        for &range in self.ranges.iter() {
            let mut rest = range;

            loop {
                let head = match excluded.get(j) {
                    Some(head) => *head,
                    None => {
                        out.push(rest);
                        break;
                    }
                };

                if head.end < rest.start {
                    j += 1;
                    continue;
                }
                if rest.end < head.start {
                    out.push(rest);
                    break;
                }

                if rest.start < head.start {
                    out.push(Range::new(rest.start, head.start - 1));
                }
                if rest.end > head.end {
                    rest.start = head.end + 1;
                    j += 1;
                } else {
                    break;
                }
            }
        }

        CharClass { ranges: out }
    }

    pub fn complement(&self) -> CharClass {
        CharClass::any().difference(self)
    }

    /// Whether every code point of `inclusion` is also in `self`.
    pub fn includes(&self, inclusion: &CharClass) -> bool {
        let chars = &self.ranges;
        let mut i = 0;

        for &range in inclusion.ranges.iter() {
            let mut rest = range;

            loop {
                while i < chars.len() && chars[i].end < rest.start {
                    i += 1;
                }
                let head = match chars.get(i) {
                    Some(head) => *head,
                    None => return false,
                };

                if rest.start < head.start {
                    return false;
                }
                if head.end >= rest.end {
                    break;
                }
                rest.start = head.end + 1;
                i += 1;
            }
        }

        true
    }
}

impl From<Range> for CharClass {
    fn from(range: Range) -> Self {
        CharClass::structure(&[range])
    }
}

impl From<char> for CharClass {
    fn from(c: char) -> Self {
        CharClass {
            ranges: vec![Range::from(c)],
        }
    }
}

impl FromIterator<Range> for CharClass {
    fn from_iter<T: IntoIterator<Item = Range>>(iter: T) -> Self {
        let ranges: Vec<Range> = iter.into_iter().collect();
        CharClass::structure(&ranges)
    }
}

impl<'a> IntoIterator for &'a CharClass {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl BitOr<&CharClass> for &CharClass {
    type Output = CharClass;

    fn bitor(self, rhs: &CharClass) -> CharClass {
        self.union(rhs)
    }
}

impl BitAnd<&CharClass> for &CharClass {
    type Output = CharClass;

    fn bitand(self, rhs: &CharClass) -> CharClass {
        self.intersection(rhs)
    }
}

impl Sub<&CharClass> for &CharClass {
    type Output = CharClass;

    fn sub(self, rhs: &CharClass) -> CharClass {
        self.difference(rhs)
    }
}

impl Not for &CharClass {
    type Output = CharClass;

    fn not(self) -> CharClass {
        self.complement()
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        write!(f, "]")
    }
}
