//! Brace pattern parsing and lazy expansion.
//!
//! A pattern is parsed once into a tree of [`Segment`]s. Iterating an
//! [`Expansion`] walks the Cartesian product of that tree like an odometer:
//! the left-most group varies slowest, the right-most fastest, which is the
//! order bash produces.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::escape::Escape;
use crate::group::{self, Group};
use crate::range::{Sequence, SequenceIter};

/// One alternative of a comma group, itself a sequence of segments.
///
/// Shared so iterators can hold on to the run they walk without borrowing
/// from the [`Expansion`].
pub type Branch = Arc<[Segment]>;

/// A parsed unit of a brace pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text emitted as-is, escapes already resolved.
    Literal(String),
    /// `{a,b,c}`: each branch is expanded in turn.
    Alternation(Vec<Branch>),
    /// `{1..5}`, `{a..e..2}`.
    Range(Sequence),
}

/// Parse a (sub)pattern into segments.
///
/// Groups that are neither a sequence nor contain a top-level comma are not
/// consumed: their braces stay in the surrounding literal and scanning resumes
/// just after the opening brace, so groups nested inside still expand.
pub(crate) fn parse(chars: &[char], escape: Escape) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut scan = escape.scan(chars, 0);

    while let Some((open, c)) = scan.next() {
        if c != '{' {
            continue;
        }
        let Some(group) = group::locate(chars, open, escape) else {
            continue;
        };
        let Some(segment) = classify(chars, &group, escape) else {
            continue;
        };

        push_literal(&mut segments, &chars[literal_start..open], escape);
        segments.push(segment);
        literal_start = group.close + 1;
        scan.seek(literal_start);
    }

    push_literal(&mut segments, &chars[literal_start..], escape);
    segments
}

/// Decide what a located group expands to, if anything.
fn classify(chars: &[char], group: &Group, escape: Escape) -> Option<Segment> {
    let content: String = group.content(chars).iter().collect();
    if let Some(seq) = Sequence::parse(&content) {
        return Some(Segment::Range(seq));
    }
    if group.commas.is_empty() {
        return None;
    }
    let branches = group
        .branches(chars)
        .into_iter()
        .map(|branch| Branch::from(parse(branch, escape)))
        .collect();
    Some(Segment::Alternation(branches))
}

fn push_literal(segments: &mut Vec<Segment>, raw: &[char], escape: Escape) {
    if !raw.is_empty() {
        segments.push(Segment::Literal(escape.resolve(raw)));
    }
}

/// A parsed brace pattern.
///
/// Created by [`brace_expand`](crate::brace_expand). Each call to
/// [`iter`](Expansion::iter) starts a fresh lazy enumeration, so an
/// `Expansion` can be walked any number of times. Iterators share the parsed
/// tree and do not borrow the `Expansion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pattern: String,
    escape: Escape,
    segments: Branch,
}

impl Expansion {
    pub(crate) fn new(pattern: &str, escape: Escape, segments: Vec<Segment>) -> Self {
        Self {
            pattern: pattern.to_string(),
            escape,
            segments: segments.into(),
        }
    }

    /// The pattern this expansion was parsed from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The escape mode the pattern was parsed with.
    pub fn escape(&self) -> Escape {
        self.escape
    }

    /// Top-level segments of the parsed pattern.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Lazily enumerate the expanded strings.
    pub fn iter(&self) -> Expansions {
        Expansions {
            product: Product::new(Arc::clone(&self.segments)),
        }
    }
}

impl IntoIterator for Expansion {
    type Item = String;
    type IntoIter = Expansions;

    fn into_iter(self) -> Self::IntoIter {
        Expansions {
            product: Product::new(self.segments),
        }
    }
}

impl IntoIterator for &Expansion {
    type Item = String;
    type IntoIter = Expansions;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the strings of an [`Expansion`].
#[derive(Debug)]
pub struct Expansions {
    product: Product,
}

impl Iterator for Expansions {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.product.next()
    }
}

impl FusedIterator for Expansions {}

/// Values of the segment at `index` within `run`.
#[derive(Debug)]
enum SegmentIter {
    Literal(Option<String>),
    Range(SequenceIter),
    Alternation {
        run: Branch,
        index: usize,
        next_branch: usize,
        current: Option<Box<Product>>,
    },
}

impl SegmentIter {
    fn new(run: &Branch, index: usize) -> Self {
        match &run[index] {
            Segment::Literal(text) => SegmentIter::Literal(Some(text.clone())),
            Segment::Range(seq) => SegmentIter::Range(seq.iter()),
            Segment::Alternation(_) => SegmentIter::Alternation {
                run: Arc::clone(run),
                index,
                next_branch: 0,
                current: None,
            },
        }
    }
}

impl Iterator for SegmentIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            SegmentIter::Literal(text) => text.take(),
            SegmentIter::Range(values) => values.next(),
            SegmentIter::Alternation {
                run,
                index,
                next_branch,
                current,
            } => loop {
                if let Some(product) = current {
                    if let Some(item) = product.next() {
                        return Some(item);
                    }
                }
                let Segment::Alternation(branches) = &run[*index] else {
                    return None;
                };
                let branch = Arc::clone(branches.get(*next_branch)?);
                *next_branch += 1;
                *current = Some(Box::new(Product::new(branch)));
            },
        }
    }
}

/// Cartesian product over a run of segments.
#[derive(Debug)]
struct Product {
    segments: Branch,
    state: ProductState,
}

#[derive(Debug)]
enum ProductState {
    Fresh,
    Running {
        iters: Vec<SegmentIter>,
        parts: Vec<String>,
    },
    Done,
}

impl Product {
    fn new(segments: Branch) -> Self {
        Self {
            segments,
            state: ProductState::Fresh,
        }
    }

    /// Restart every wheel from `from` onwards; false if one of them is empty.
    fn reset_from(
        &self,
        from: usize,
        iters: &mut Vec<SegmentIter>,
        parts: &mut Vec<String>,
    ) -> bool {
        iters.truncate(from);
        parts.truncate(from);
        for index in from..self.segments.len() {
            let mut iter = SegmentIter::new(&self.segments, index);
            match iter.next() {
                Some(part) => {
                    iters.push(iter);
                    parts.push(part);
                }
                None => return false,
            }
        }
        true
    }
}

impl Iterator for Product {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (mut iters, mut parts) = match std::mem::replace(&mut self.state, ProductState::Done) {
            ProductState::Done => return None,
            ProductState::Fresh => {
                let mut iters = Vec::with_capacity(self.segments.len());
                let mut parts = Vec::with_capacity(self.segments.len());
                if !self.reset_from(0, &mut iters, &mut parts) {
                    return None;
                }
                let item = parts.concat();
                self.state = ProductState::Running { iters, parts };
                return Some(item);
            }
            ProductState::Running { iters, parts } => (iters, parts),
        };

        // Advance the right-most wheel that still has values, then rewind
        // everything to its right.
        for i in (0..iters.len()).rev() {
            if let Some(part) = iters[i].next() {
                parts[i] = part;
                if !self.reset_from(i + 1, &mut iters, &mut parts) {
                    return None;
                }
                let item = parts.concat();
                self.state = ProductState::Running { iters, parts };
                return Some(item);
            }
        }

        None
    }
}
