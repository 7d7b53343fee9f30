use serde::Serialize;
use std::fmt;

/// A 1-based line and column, as reported by the lexer while it scans.
///
/// Unlike a byte-offset-plus-lookup-table position (the teacher's
/// `Span`/`LineIndex` pair), `Loc` is produced directly during scanning: the
/// lexer already knows which line and column it is looking at, so there is
/// no later binary-search step to recover them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Loc {
    pub line: i64,
    pub pos: i64,
}

impl Loc {
    pub fn new(line: i64, pos: i64) -> Self {
        Loc { line, pos }
    }

    /// The position the host hands to the parser for the synthetic `EOF`
    /// event once the token stream is exhausted.
    pub const EOF: Loc = Loc { line: -1, pos: -1 };
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, position {}", self.line, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_is_minus_one_minus_one() {
        assert_eq!(Loc::EOF, Loc::new(-1, -1));
    }

    #[test]
    fn display_matches_diagnostic_wording() {
        assert_eq!(Loc::new(1, 2).to_string(), "line 1, position 2");
    }
}
