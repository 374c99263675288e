//! Indentation levels.
//!
//! A level is the set of columns a line may start at. Most constructs accept
//! exactly one column; a few (array initializers, lambdas, labels, curlies
//! of multi-level parents) accept several.

use std::fmt;

use smallvec::SmallVec;

/// Non-empty, sorted, duplicate-free set of acceptable columns.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndentLevel {
    columns: SmallVec<[u32; 4]>,
}

impl IndentLevel {
    /// Level accepting exactly `column`.
    pub fn new(column: u32) -> Self {
        let mut columns = SmallVec::new();
        columns.push(column);
        IndentLevel { columns }
    }

    /// Every column of `self` shifted by `offset`. Columns that would go
    /// negative clamp to 0.
    #[must_use]
    pub fn offset(&self, offset: i64) -> Self {
        self.offsets(&[offset])
    }

    /// Union of `self` shifted by each of `offsets`.
    #[must_use]
    pub fn offsets(&self, offsets: &[i64]) -> Self {
        let mut columns: SmallVec<[u32; 4]> = self
            .columns
            .iter()
            .flat_map(|&c| offsets.iter().map(move |&o| shift(c, o)))
            .collect();
        if columns.is_empty() {
            return self.clone();
        }
        columns.sort_unstable();
        columns.dedup();
        IndentLevel { columns }
    }

    /// `self` with one more acceptable column.
    #[must_use]
    pub fn with_column(&self, column: u32) -> Self {
        let mut level = self.clone();
        if let Err(at) = level.columns.binary_search(&column) {
            level.columns.insert(at, column);
        }
        level
    }

    /// Every column acceptable to either level.
    #[must_use]
    pub fn union(&self, other: &IndentLevel) -> Self {
        other
            .columns
            .iter()
            .fold(self.clone(), |level, &column| level.with_column(column))
    }

    pub fn is_acceptable(&self, column: u32) -> bool {
        self.columns.binary_search(&column).is_ok()
    }

    /// True when even the smallest acceptable column lies right of `column`.
    pub fn is_greater_than(&self, column: u32) -> bool {
        self.first_level() > column
    }

    pub fn is_multi_level(&self) -> bool {
        self.columns.len() > 1
    }

    pub fn first_level(&self) -> u32 {
        self.columns[0]
    }

    pub fn last_level(&self) -> u32 {
        self.columns[self.columns.len() - 1]
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }
}

fn shift(column: u32, offset: i64) -> u32 {
    (i64::from(column) + offset).clamp(0, i64::from(u32::MAX)) as u32
}

/// `4` for a single level, `4, 8` for several.
impl fmt::Display for IndentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for IndentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndentLevel({self})")
    }
}

/// A single column serializes as an integer, several as a sequence.
#[cfg(feature = "serde")]
impl serde::Serialize for IndentLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_multi_level() {
            serializer.collect_seq(&self.columns)
        } else {
            serializer.serialize_u32(self.first_level())
        }
    }
}
