//! Caller-owned outputs: the bounded text buffer and the optional side
//! channels filled during expansion

use crate::error::{ExpandError, ExpandResult};
use serde::Serialize;

/// Text buffer with a fixed maximum length in bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    capacity: usize,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn into_string(self) -> String {
        self.text
    }

    fn ensure_room(&self, additional: usize) -> ExpandResult<()> {
        let required = self.text.len().saturating_add(additional);
        if required > self.capacity {
            return Err(ExpandError::BufferTooSmall {
                capacity: self.capacity,
                required,
            });
        }
        Ok(())
    }

    pub(crate) fn push_str(&mut self, text: &str) -> ExpandResult<()> {
        self.ensure_room(text.len())?;
        self.text.push_str(text);
        Ok(())
    }

    /// Append `count` spaces
    pub(crate) fn push_padding(&mut self, count: usize) -> ExpandResult<()> {
        self.ensure_room(count)?;
        self.text.extend(std::iter::repeat(' ').take(count));
        Ok(())
    }
}

/// Byte range of one substituted value in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub position: usize,
    pub length: usize,
}

/// Bounded list of placements; entries past the capacity are dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placements {
    capacity: usize,
    entries: Vec<Placement>,
}

impl Placements {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn push(&mut self, placement: Placement) {
        if self.entries.len() < self.capacity {
            self.entries.push(placement);
        }
    }
}

/// Widest value seen so far per column of a generated file list.
///
/// The number of columns is fixed at construction; widths only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnWidths {
    widths: Vec<usize>,
}

impl ColumnWidths {
    pub fn new(columns: usize) -> Self {
        Self {
            widths: vec![0; columns],
        }
    }

    pub fn get(&self, column: usize) -> Option<usize> {
        self.widths.get(column).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Raise the width of `column` to at least `width` and return the
    /// aggregate, or `None` for a column past the end
    pub fn record(&mut self, column: usize, width: usize) -> Option<usize> {
        let slot = self.widths.get_mut(column)?;
        *slot = (*slot).max(width);
        Some(*slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_up_to_capacity() {
        let mut buf = OutputBuffer::new(5);
        buf.push_str("abc").unwrap();
        buf.push_str("de").unwrap();
        assert_eq!(buf.as_str(), "abcde");
        assert_eq!(
            buf.push_str("f"),
            Err(ExpandError::BufferTooSmall {
                capacity: 5,
                required: 6,
            })
        );
        assert_eq!(buf.as_str(), "abcde");
    }

    #[test]
    fn test_padding_is_capacity_checked() {
        let mut buf = OutputBuffer::new(3);
        assert!(buf.push_padding(usize::MAX).is_err());
        buf.push_padding(3).unwrap();
        assert_eq!(buf.as_str(), "   ");
    }

    #[test]
    fn test_placements_drop_overflow() {
        let mut placements = Placements::new(1);
        placements.push(Placement {
            position: 0,
            length: 3,
        });
        placements.push(Placement {
            position: 4,
            length: 1,
        });
        assert_eq!(placements.len(), 1);
        assert_eq!(placements.as_slice()[0].length, 3);
    }

    #[test]
    fn test_column_widths_are_monotonic() {
        let mut widths = ColumnWidths::new(2);
        assert_eq!(widths.record(0, 5), Some(5));
        assert_eq!(widths.record(0, 3), Some(5));
        assert_eq!(widths.record(1, 7), Some(7));
        assert_eq!(widths.record(2, 9), None);
        assert_eq!(widths.as_slice(), &[5, 7]);
    }
}
