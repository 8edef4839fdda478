//! Sequence expressions: `{START..END}` and `{START..END..STEP}`.
//!
//! Endpoints are either both integers or both single alphabetic characters.
//! Anything else is not a sequence and the group stays literal.
//!
//! ```
//! use senkawa::Sequence;
//!
//! let seq = Sequence::parse("7..010").unwrap();
//! let values: Vec<String> = seq.iter().collect();
//! assert_eq!(values, ["007", "008", "009", "010"]);
//!
//! assert!(Sequence::parse("1..a").is_none());
//! ```

use std::iter::{FusedIterator, StepBy};

/// A parsed sequence expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sequence {
    /// Integer range. `width` is the zero-padding width, `0` when unpadded.
    Numeric {
        start: i64,
        end: i64,
        step: u64,
        width: usize,
    },
    /// Letter range, walked by code point. Only alphabetic characters are emitted.
    Alphabetic { start: char, end: char, step: usize },
}

impl Sequence {
    /// Parse the content of a brace group (without the braces).
    ///
    /// Returns `None` when the content is not a sequence expression.
    pub fn parse(content: &str) -> Option<Self> {
        let mut parts = content.split("..");
        let start = parts.next()?;
        let end = parts.next()?;
        let step = match parts.next() {
            Some(step) => parse_step(step)?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }

        if let (Ok(from), Ok(to)) = (start.parse::<i64>(), end.parse::<i64>()) {
            let width = if is_zero_padded(start) || is_zero_padded(end) {
                start.chars().count().max(end.chars().count())
            } else {
                0
            };
            return Some(Sequence::Numeric {
                start: from,
                end: to,
                step,
                width,
            });
        }

        match (single_letter(start), single_letter(end)) {
            (Some(from), Some(to)) => Some(Sequence::Alphabetic {
                start: from,
                end: to,
                step: usize::try_from(step).unwrap_or(usize::MAX),
            }),
            _ => None,
        }
    }

    /// Iterate the values of the sequence, both endpoints inclusive.
    pub fn iter(&self) -> SequenceIter {
        let inner = match *self {
            Sequence::Numeric {
                start,
                end,
                step,
                width,
            } => {
                let step = i128::from(step);
                Inner::Numeric {
                    next: Some(i128::from(start)),
                    end: i128::from(end),
                    step: if end >= start { step } else { -step },
                    width,
                }
            }
            Sequence::Alphabetic { start, end, step } => Inner::Alphabetic(
                Letters {
                    next: Some(u32::from(start)),
                    end: u32::from(end),
                    ascending: end >= start,
                }
                .step_by(step),
            ),
        };
        SequenceIter { inner }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = String;
    type IntoIter = SequenceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Step magnitude; `0` and `-0` mean `1`.
fn parse_step(s: &str) -> Option<u64> {
    let step = s.parse::<i64>().ok()?.unsigned_abs();
    Some(step.max(1))
}

/// `01`, `-007`: a leading zero followed by more digits.
fn is_zero_padded(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    digits.len() > 1 && digits.starts_with('0')
}

fn single_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c),
        _ => None,
    }
}

/// Lazy iterator over the rendered values of a [`Sequence`].
#[derive(Debug, Clone)]
pub struct SequenceIter {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Numeric {
        next: Option<i128>,
        end: i128,
        step: i128,
        width: usize,
    },
    Alphabetic(StepBy<Letters>),
}

impl Iterator for SequenceIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match &mut self.inner {
            Inner::Numeric {
                next,
                end,
                step,
                width,
            } => {
                let value = (*next)?;
                let following = value + *step;
                let in_range = if *step > 0 {
                    following <= *end
                } else {
                    following >= *end
                };
                *next = in_range.then_some(following);
                // `{:0w$}` puts the sign first and counts it toward the width.
                Some(format!("{value:0width$}", width = *width))
            }
            Inner::Alphabetic(letters) => letters.next().map(String::from),
        }
    }
}

impl FusedIterator for SequenceIter {}

/// Alphabetic characters between two code points, inclusive, in either direction.
#[derive(Debug, Clone)]
struct Letters {
    next: Option<u32>,
    end: u32,
    ascending: bool,
}

impl Iterator for Letters {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            let cp = self.next?;
            self.next = if cp == self.end {
                None
            } else if self.ascending {
                Some(cp + 1)
            } else {
                Some(cp - 1)
            };
            if let Some(c) = char::from_u32(cp).filter(|c| c.is_alphabetic()) {
                return Some(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(content: &str) -> Vec<String> {
        Sequence::parse(content)
            .unwrap_or_else(|| panic!("{content:?} should be a sequence"))
            .iter()
            .collect()
    }

    #[test]
    fn parses_numeric() {
        assert_eq!(
            Sequence::parse("1..5..2"),
            Some(Sequence::Numeric {
                start: 1,
                end: 5,
                step: 2,
                width: 0
            })
        );
    }

    #[test]
    fn parses_padding_width_with_sign() {
        assert_eq!(
            Sequence::parse("1..-02"),
            Some(Sequence::Numeric {
                start: 1,
                end: -2,
                step: 1,
                width: 3
            })
        );
    }

    #[test]
    fn negative_zero_is_not_padding() {
        assert!(!is_zero_padded("-0"));
        assert!(!is_zero_padded("0"));
        assert!(is_zero_padded("-01"));
        assert!(is_zero_padded("00"));
    }

    #[test]
    fn rejects_non_sequences() {
        for content in [
            "", "1", "1..", "..1", "1...3", "1..2..3..4", "1..a", "a..1", "ab..c", "a..b..c",
            "1..2..x", "1 ..2", "1.5..3", "1..{2,3}",
        ] {
            assert_eq!(Sequence::parse(content), None, "{content:?}");
        }
    }

    #[test]
    fn rejects_overflowing_integers() {
        assert_eq!(Sequence::parse("1..99999999999999999999"), None);
        assert_eq!(Sequence::parse("1..2..99999999999999999999"), None);
    }

    #[test]
    fn ascending_and_descending() {
        assert_eq!(values("7..10"), ["7", "8", "9", "10"]);
        assert_eq!(values("10..7"), ["10", "9", "8", "7"]);
        assert_eq!(values("1..-2"), ["1", "0", "-1", "-2"]);
    }

    #[test]
    fn step_never_overshoots() {
        assert_eq!(values("1..4..2"), ["1", "3"]);
        assert_eq!(values("4..1..2"), ["4", "2"]);
        assert_eq!(values("1..3..10"), ["1"]);
    }

    #[test]
    fn step_sign_is_ignored() {
        assert_eq!(values("1..5..-2"), values("1..5..2"));
        assert_eq!(values("5..1..-2"), ["5", "3", "1"]);
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let seq = Sequence::parse("9223372036854775806..9223372036854775807").unwrap();
        assert_eq!(seq.iter().count(), 2);
        let seq = Sequence::parse("-9223372036854775808..-9223372036854775807..9223372036854775807")
            .unwrap();
        assert_eq!(seq.iter().count(), 1);
    }

    #[test]
    fn padded_values() {
        assert_eq!(values("01..-2"), ["01", "00", "-1", "-2"]);
        assert_eq!(values("-01..3..2"), ["-01", "001", "003"]);
    }

    #[test]
    fn letters_skip_punctuation() {
        assert_eq!(values("Z..a"), ["Z", "a"]);
        assert_eq!(values("a..Z"), ["a", "Z"]);
        assert_eq!(values("A..z").len(), 52);
    }

    #[test]
    fn letter_step() {
        assert_eq!(values("a..e..2"), ["a", "c", "e"]);
        assert_eq!(values("e..a..2"), ["e", "c", "a"]);
        assert_eq!(values("a..b..0"), ["a", "b"]);
    }

    #[test]
    fn non_ascii_letters() {
        assert_eq!(values("α..γ"), ["α", "β", "γ"]);
    }

    #[test]
    fn iteration_restarts() {
        let seq = Sequence::parse("1..3").unwrap();
        let first: Vec<_> = seq.iter().collect();
        let second: Vec<_> = (&seq).into_iter().collect();
        assert_eq!(first, second);
    }
}
