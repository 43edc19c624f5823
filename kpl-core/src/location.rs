use std::fmt;

use serde::Serialize;

/// A 1-based position in the source text.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, column): (usize, usize)) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_order_by_line_then_column() {
        let a = Location::new(1, 20);
        let b = Location::new(2, 1);
        let c: Location = (2, 3).into();

        assert!(a < b);
        assert!(b < c);
        assert_eq!(c.to_string(), "2:3");
        assert_eq!(Location::default(), Location::new(1, 1));
    }
}
