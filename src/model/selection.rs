//! Points and selections over the document tree.

use std::fmt;
use std::str::FromStr;

use super::path::Path;

/// A position inside a text leaf: leaf path plus character offset.
///
/// Points order by path first, then offset, which is document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.offset)
    }
}

impl FromStr for Point {
    type Err = String;

    /// Parse `0.0:12` (path, colon, offset)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, offset) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Missing ':' in point: {}", s))?;
        let path: Path = path
            .parse()
            .map_err(|e| format!("Invalid path in point {}: {}", s, e))?;
        let offset = offset
            .trim()
            .parse()
            .map_err(|e| format!("Invalid offset in point {}: {}", s, e))?;
        Ok(Point { path, offset })
    }
}

/// Which way a point moves when an edit lands exactly on it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affinity {
    Forward,
    Backward,
}

/// A selection with anchor (fixed end) and focus (moving end)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Create a collapsed selection (caret)
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Check if selection is collapsed (anchor == focus)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_expanded(&self) -> bool {
        !self.is_collapsed()
    }

    /// Check if selection is backward (focus before anchor)
    pub fn is_backward(&self) -> bool {
        self.focus < self.anchor
    }

    /// The earlier of anchor and focus
    pub fn start(&self) -> &Point {
        if self.is_backward() {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// The later of anchor and focus
    pub fn end(&self) -> &Point {
        if self.is_backward() {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Collapse to the start point
    pub fn collapse_to_start(&mut self) {
        let start = self.start().clone();
        self.anchor = start.clone();
        self.focus = start;
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.anchor, self.focus)
    }
}

impl FromStr for Selection {
    type Err = String;

    /// Parse `0.0:0..0.0:5`, or a single point for a caret
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("..") {
            Some((anchor, focus)) => Ok(Selection::new(anchor.parse()?, focus.parse()?)),
            None => Ok(Selection::collapsed(s.parse()?)),
        }
    }
}
