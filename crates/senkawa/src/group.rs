//! Brace bookkeeping: the balance pre-pass and matching-brace search.

use crate::escape::Escape;

/// Structural brace counts of a whole pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BraceCount {
    pub opening: usize,
    pub closing: usize,
}

impl BraceCount {
    pub(crate) fn is_balanced(&self) -> bool {
        self.opening == self.closing
    }
}

/// Count structural `{` and `}` in `chars`.
///
/// Only the totals matter: `}{` is balanced here and falls through to
/// literal text later.
pub(crate) fn count_braces(chars: &[char], escape: Escape) -> BraceCount {
    escape
        .scan(chars, 0)
        .fold(BraceCount::default(), |mut count, (_, c)| {
            match c {
                '{' => count.opening += 1,
                '}' => count.closing += 1,
                _ => {}
            }
            count
        })
}

/// A located `{...}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    /// Index of the opening brace.
    pub open: usize,
    /// Index of the matching closing brace.
    pub close: usize,
    /// Indices of the commas at depth zero inside the group.
    pub commas: Vec<usize>,
}

impl Group {
    /// Raw content between the braces.
    pub(crate) fn content<'a>(&self, chars: &'a [char]) -> &'a [char] {
        &chars[self.open + 1..self.close]
    }

    /// Raw text of each comma-separated alternative, in source order.
    pub(crate) fn branches<'a>(&self, chars: &'a [char]) -> Vec<&'a [char]> {
        let mut bounds = Vec::with_capacity(self.commas.len() + 2);
        bounds.push(self.open);
        bounds.extend_from_slice(&self.commas);
        bounds.push(self.close);
        bounds
            .windows(2)
            .map(|w| &chars[w[0] + 1..w[1]])
            .collect()
    }
}

/// Find the brace matching the structural `{` at `open`.
///
/// Returns `None` when the group never closes; the caller treats the opening
/// brace as plain text in that case.
pub(crate) fn locate(chars: &[char], open: usize, escape: Escape) -> Option<Group> {
    let mut depth = 0usize;
    let mut commas = Vec::new();

    for (i, c) in escape.scan(chars, open + 1) {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => {
                return Some(Group {
                    open,
                    close: i,
                    commas,
                })
            }
            '}' => depth -= 1,
            ',' if depth == 0 => commas.push(i),
            _ => {}
        }
    }

    None
}
