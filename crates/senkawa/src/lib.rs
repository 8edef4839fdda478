//! senkawa: bash-style brace expansion and globbing.
//!
//! Provides:
//! - **brace_expand**: `a{b,c}d`, `{1..10..3}`, `{a..e}`, nested groups, zero padding
//! - **Expansion**: the parsed pattern, lazily re-iterable
//! - **glob**: brace expansion followed by filesystem wildcard matching
//! - **glob_match**: brace-aware wildcard matching of a single string
//!
//! Groups that are neither a comma list nor a valid sequence are left as
//! literal text, braces included. The only error is a pattern whose opening and
//! closing brace counts differ.
//!
//! ```
//! use senkawa::brace_expand;
//!
//! let exp = brace_expand("a{b,c}d{e,f}")?;
//! let words: Vec<String> = exp.iter().collect();
//! assert_eq!(words, ["abde", "abdf", "acde", "acdf"]);
//!
//! assert_eq!(brace_expand("{1}")?.iter().collect::<Vec<_>>(), ["{1}"]);
//! # Ok::<(), senkawa::BraceError>(())
//! ```

mod escape;
mod expand;
mod glob_paths;
mod group;
mod range;

pub use escape::Escape;
pub use expand::{Branch, Expansion, Expansions, Segment};
pub use glob_paths::{glob, glob_match, glob_with, FsError, FsMatcher, Glob, MatchError, PathMatcher};
pub use range::{Sequence, SequenceIter};

use thiserror::Error;

/// Errors from brace expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BraceError {
    #[error("unbalanced braces in pattern {pattern:?}: {opening} opening, {closing} closing")]
    UnbalancedBraces {
        pattern: String,
        opening: usize,
        closing: usize,
    },
}

/// Expand `pattern` with backslash escaping enabled.
///
/// Nothing is generated yet; iterate the returned [`Expansion`] to produce
/// the strings.
pub fn brace_expand(pattern: &str) -> Result<Expansion, BraceError> {
    brace_expand_with(pattern, Escape::Enabled)
}

/// Expand `pattern` with the given escape mode.
///
/// ```
/// use senkawa::{brace_expand_with, Escape};
///
/// let on: Vec<_> = brace_expand_with(r"\{1,2\}", Escape::Enabled)?.iter().collect();
/// assert_eq!(on, ["{1,2}"]);
///
/// let off: Vec<_> = brace_expand_with(r"\{1,2}", Escape::Disabled)?.iter().collect();
/// assert_eq!(off, [r"\1", r"\2"]);
/// # Ok::<(), senkawa::BraceError>(())
/// ```
pub fn brace_expand_with(pattern: &str, escape: Escape) -> Result<Expansion, BraceError> {
    let chars: Vec<char> = pattern.chars().collect();

    let count = group::count_braces(&chars, escape);
    if !count.is_balanced() {
        tracing::debug!(
            pattern,
            opening = count.opening,
            closing = count.closing,
            "rejecting unbalanced brace pattern"
        );
        return Err(BraceError::UnbalancedBraces {
            pattern: pattern.to_string(),
            opening: count.opening,
            closing: count.closing,
        });
    }

    let segments = expand::parse(&chars, escape);
    tracing::debug!(pattern, ?escape, segments = segments.len(), "parsed brace pattern");
    Ok(Expansion::new(pattern, escape, segments))
}
