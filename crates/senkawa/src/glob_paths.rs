//! Filesystem globbing on top of brace expansion.
//!
//! The pattern is brace-expanded first; every resulting pattern, which may
//! still hold `*`, `?` or `[...]`, is handed to a [`PathMatcher`]. The
//! default matcher is [`FsMatcher`], backed by the `glob` crate.
//!
//! ```no_run
//! for path in senkawa::glob("src/*.{rs,toml}")? {
//!     println!("{}", path?.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::path::PathBuf;

use glob::{MatchOptions, Paths, Pattern};
use thiserror::Error;

use crate::{brace_expand, BraceError, Expansions};

/// Turns one wildcard pattern (no braces) into the paths it matches.
///
/// Implement this to glob against something other than the local filesystem.
pub trait PathMatcher {
    type Error: std::error::Error + 'static;
    type Matches: Iterator<Item = Result<PathBuf, Self::Error>>;

    /// Start matching `pattern`.
    fn matches(&self, pattern: &str) -> Result<Self::Matches, Self::Error>;
}

/// Errors from the `glob` crate, passed through untouched.
#[derive(Debug, Error)]
pub enum FsError {
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Io(#[from] glob::GlobError),
}

/// [`PathMatcher`] over the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FsMatcher {
    options: MatchOptions,
}

impl FsMatcher {
    /// Match with `glob`'s default options (case-sensitive).
    pub fn new() -> Self {
        Self::with_options(MatchOptions::new())
    }

    /// Match with custom case sensitivity / separator / dot-file rules.
    pub fn with_options(options: MatchOptions) -> Self {
        Self { options }
    }

    /// The options passed to `glob::glob_with`.
    pub fn options(&self) -> MatchOptions {
        self.options
    }
}

impl Default for FsMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PathMatcher for FsMatcher {
    type Error = FsError;
    type Matches = FsMatches;

    fn matches(&self, pattern: &str) -> Result<FsMatches, FsError> {
        Ok(FsMatches(glob::glob_with(pattern, self.options)?))
    }
}

/// Paths found by [`FsMatcher`] for a single pattern.
pub struct FsMatches(Paths);

impl fmt::Debug for FsMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsMatches").finish_non_exhaustive()
    }
}

impl Iterator for FsMatches {
    type Item = Result<PathBuf, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|entry| entry.map_err(FsError::from))
    }
}

/// Iterator over the union of matches of every expanded pattern.
///
/// Patterns are expanded and matched in expansion order, one at a time. A
/// path matched by two expanded patterns is yielded twice.
pub struct Glob<M: PathMatcher = FsMatcher> {
    matcher: M,
    patterns: Expansions,
    current: Option<M::Matches>,
}

impl<M> fmt::Debug for Glob<M>
where
    M: PathMatcher + fmt::Debug,
    M::Matches: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glob")
            .field("matcher", &self.matcher)
            .field("patterns", &self.patterns)
            .field("current", &self.current)
            .finish()
    }
}

impl<M: PathMatcher> Iterator for Glob<M> {
    type Item = Result<PathBuf, M::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(matches) = &mut self.current {
                if let Some(entry) = matches.next() {
                    return Some(entry);
                }
                self.current = None;
            }

            let pattern = self.patterns.next()?;
            tracing::trace!(%pattern, "matching expanded pattern");
            match self.matcher.matches(&pattern) {
                Ok(matches) => self.current = Some(matches),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Brace-expand `pattern` and glob each result against the filesystem.
///
/// Unbalanced braces are reported before any filesystem access. Filesystem
/// and wildcard-syntax errors come out of the iterator as they occur.
pub fn glob(pattern: &str) -> Result<Glob<FsMatcher>, BraceError> {
    glob_with(pattern, FsMatcher::default())
}

/// Like [`glob`], with a caller-supplied matcher.
#[tracing::instrument(level = "debug", skip(matcher))]
pub fn glob_with<M: PathMatcher>(pattern: &str, matcher: M) -> Result<Glob<M>, BraceError> {
    let expansion = brace_expand(pattern)?;
    tracing::debug!(segments = expansion.segments().len(), "parsed glob pattern");
    Ok(Glob {
        matcher,
        patterns: expansion.into_iter(),
        current: None,
    })
}

/// Errors from [`glob_match`].
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Braces(#[from] BraceError),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

/// Match a string against a glob pattern with brace expansion.
///
/// True if any of the expanded patterns matches the whole of `candidate`.
///
/// ```
/// use senkawa::glob_match;
///
/// assert!(glob_match("*.{rs,go}", "main.rs")?);
/// assert!(glob_match("log.{1..3}", "log.2")?);
/// assert!(!glob_match("*.{rs,go}", "main.py")?);
/// # Ok::<(), senkawa::MatchError>(())
/// ```
pub fn glob_match(pattern: &str, candidate: &str) -> Result<bool, MatchError> {
    for expanded in &brace_expand(pattern)? {
        if Pattern::new(&expanded)?.matches(candidate) {
            return Ok(true);
        }
    }
    Ok(false)
}
