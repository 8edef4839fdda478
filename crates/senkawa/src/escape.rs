//! Backslash escaping.
//!
//! Decides which `{`, `}` and `,` characters are structural and how a raw
//! slice of the pattern is rendered once expansion is done.

/// Whether a backslash suppresses the structural meaning of the next character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Escape {
    /// `\x` makes `x` literal data; the backslash itself is dropped from output.
    #[default]
    Enabled,
    /// Backslash is ordinary text and braces/commas are always structural.
    Disabled,
}

impl Escape {
    /// Render a raw slice as output text.
    ///
    /// With escaping enabled every backslash is dropped and the character after
    /// it is emitted verbatim, so `\\` becomes a single `\`. A trailing lone
    /// backslash disappears.
    pub fn resolve(self, raw: &[char]) -> String {
        match self {
            Escape::Disabled => raw.iter().collect(),
            Escape::Enabled => {
                let mut out = String::with_capacity(raw.len());
                let mut chars = raw.iter();
                while let Some(&c) = chars.next() {
                    if c == '\\' {
                        if let Some(&next) = chars.next() {
                            out.push(next);
                        }
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }

    /// Iterate the characters of `chars` that are not escaped, starting at `from`.
    ///
    /// `from` must not point at the character right after an escaping backslash.
    pub(crate) fn scan(self, chars: &[char], from: usize) -> Structural<'_> {
        Structural {
            chars,
            pos: from,
            escape: self,
        }
    }
}

impl From<bool> for Escape {
    fn from(enabled: bool) -> Self {
        if enabled {
            Escape::Enabled
        } else {
            Escape::Disabled
        }
    }
}

/// Iterator over `(index, char)` pairs whose meaning is not suppressed by a backslash.
///
/// Escaped pairs are skipped as a unit, as are the backslashes themselves.
#[derive(Debug, Clone)]
pub(crate) struct Structural<'a> {
    chars: &'a [char],
    pos: usize,
    escape: Escape,
}

impl Structural<'_> {
    /// Continue scanning from `pos`.
    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }
}

impl Iterator for Structural<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let idx = self.pos;
            let c = *self.chars.get(idx)?;
            if c == '\\' && self.escape == Escape::Enabled {
                self.pos += 2;
                continue;
            }
            self.pos += 1;
            return Some((idx, c));
        }
    }
}
