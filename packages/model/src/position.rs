use serde::{Deserialize, Serialize};

/// Location in a model document: a named root plus an offset path.
///
/// Every path entry except the last steps into the element starting at that
/// offset; the last entry is the offset inside the final parent. Positions
/// are plain values — operations store their own copy, never a reference to
/// the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub root: String,
    pub path: Vec<usize>,
}

impl Position {
    pub fn new(root: impl Into<String>, path: Vec<usize>) -> Self {
        Self {
            root: root.into(),
            path,
        }
    }

    /// Offset inside the final parent (the last path entry).
    pub fn offset(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }

    /// Same parent, final offset advanced by `delta`.
    pub fn shifted_by(&self, delta: usize) -> Position {
        let mut path = self.path.clone();
        if let Some(last) = path.last_mut() {
            *last += delta;
        }
        Position {
            root: self.root.clone(),
            path,
        }
    }
}

/// Contiguous span between two positions in the same root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range starting at `start` and spanning `width` offsets in the same
    /// parent.
    pub fn from_position_and_width(start: Position, width: usize) -> Self {
        let end = start.shifted_by(width);
        Self { start, end }
    }

    pub fn collapsed_at(position: Position) -> Self {
        Self {
            end: position.clone(),
            start: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_by_advances_last_entry() {
        let position = Position::new("main", vec![1, 2]);
        let shifted = position.shifted_by(3);
        assert_eq!(shifted.path, vec![1, 5]);
        assert_eq!(shifted.root, "main");
    }

    #[test]
    fn test_range_from_width() {
        let range = Range::from_position_and_width(Position::new("main", vec![0]), 3);
        assert_eq!(range.start.path, vec![0]);
        assert_eq!(range.end.path, vec![3]);
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_collapsed_range() {
        let range = Range::collapsed_at(Position::new("main", vec![2]));
        assert!(range.is_collapsed());
    }
}
