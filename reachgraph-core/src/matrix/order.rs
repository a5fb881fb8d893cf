//! Header ordering for matrix snapshots.

use std::cmp::Ordering;

/// Total order used to arrange node labels along the matrix axes.
///
/// Auto-placed nodes carry numeric labels, so the lexicographic default puts
/// `"10"` before `"2"`. [`LabelOrder::Natural`] compares digit runs by value
/// instead.
///
/// # Examples
/// ```
/// use reachgraph_core::LabelOrder;
///
/// let mut labels = vec!["10", "2", "1"];
/// labels.sort_by(|l, r| LabelOrder::Lexicographic.compare(l, r));
/// assert_eq!(labels, ["1", "10", "2"]);
/// labels.sort_by(|l, r| LabelOrder::Natural.compare(l, r));
/// assert_eq!(labels, ["1", "2", "10"]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelOrder {
    /// Plain string order.
    #[default]
    Lexicographic,
    /// Digit runs compared numerically, other text compared as strings.
    Natural,
}

impl LabelOrder {
    /// Compares two labels under this order.
    #[must_use]
    pub fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            Self::Lexicographic => left.cmp(right),
            Self::Natural => natural_cmp(left, right),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(index, _)| index);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut lhs = Chunks { rest: left };
    let mut rhs = Chunks { rest: right };
    loop {
        let ordering = match (lhs.next(), rhs.next()) {
            // Equal under the natural order ("02" vs "2"); fall back to the
            // string order so the result stays total.
            (None, None) => return left.cmp(right),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => compare_chunks(l, r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn compare_chunks(left: Chunk<'_>, right: Chunk<'_>) -> Ordering {
    match (left, right) {
        (Chunk::Digits(l), Chunk::Digits(r)) => {
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        }
        (Chunk::Text(l), Chunk::Text(r)) => l.cmp(r),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
    }
}
