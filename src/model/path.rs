//! Index paths addressing nodes from the document root

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Child indices from the root down to a node.
///
/// Lexicographic order on paths is document order for leaves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Path(indices)
    }

    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the child at `index`
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.0.split_last()?;
        Some(Path(rest.to_vec()))
    }

    /// Index of this node within its parent
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the next sibling
    pub fn next(&self) -> Option<Path> {
        let mut indices = self.0.clone();
        *indices.last_mut()? += 1;
        Some(Path(indices))
    }

    /// Path of the previous sibling
    pub fn previous(&self) -> Option<Path> {
        let mut indices = self.0.clone();
        let last = indices.last_mut()?;
        *last = last.checked_sub(1)?;
        Some(Path(indices))
    }

    /// Whether `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Whether `self` equals `other` or is an ancestor of it
    pub fn contains(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Whether `self` is a sibling of `other` located before it, or an
    /// ancestor-level sibling of one of its ancestors located before it.
    ///
    /// Operations on such paths shift the index of `other` at `self`'s depth.
    pub fn ends_before(&self, other: &Path) -> bool {
        let Some((&last, prefix)) = self.0.split_last() else {
            return false;
        };
        other.0.len() > prefix.len()
            && other.0.starts_with(prefix)
            && last < other.0[prefix.len()]
    }

    pub(crate) fn indices_mut(&mut self) -> &mut Vec<usize> {
        &mut self.0
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Path(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Path(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for Path {
    type Err = std::num::ParseIntError;

    /// Parse a dot-separated path such as `0.1.2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Path::root());
        }
        s.split('.')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}
