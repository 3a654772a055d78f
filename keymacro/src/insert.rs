//! Insertion planner for the keyword picker menu
//!
//! When the user picks an entry from a keyword menu, the edit control gets
//! the entry's text at the current selection. [`plan_insertion`] computes the
//! resulting text and cursor without touching any UI.

use crate::keywords::{InsertFlag, KeywordDefinition};
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;

/// New edit-control state after inserting a menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub text: String,
    /// Byte offset of the caret in `text`
    pub cursor: usize,
    /// Whether focus goes back to the edit control
    pub refocus: bool,
}

/// Clamp a selection to `text`; a range off character boundaries collapses
/// to the end of the text
fn clamp_selection(text: &str, selection: Range<usize>) -> (usize, usize) {
    let end = selection.end.min(text.len());
    let start = selection.start.min(end);
    if text.is_char_boundary(start) && text.is_char_boundary(end) {
        (start, end)
    } else {
        (text.len(), text.len())
    }
}

/// Insert `entry` into `text`, replacing `selection` (byte range)
pub fn plan_insertion(entry: &KeywordDefinition, text: &str, selection: Range<usize>) -> Insertion {
    let flags = entry.flags;
    let (start, end) = if flags.contains(InsertFlag::ReplaceAll) {
        (0, text.len())
    } else {
        clamp_selection(text, selection)
    };

    let inserted: Cow<'_, str> = if flags.contains(InsertFlag::WrapAsVariable) {
        Cow::Owned(format!("$({})", entry.keyword))
    } else {
        Cow::Borrowed(entry.keyword)
    };

    let back = if flags.contains(InsertFlag::CursorBeforeEnd2) {
        2
    } else if flags.contains(InsertFlag::CursorBeforeEnd1) {
        1
    } else {
        0
    };
    let tail: usize = inserted
        .chars()
        .rev()
        .take(back)
        .map(char::len_utf8)
        .sum();

    let mut new_text = String::with_capacity(text.len() - (end - start) + inserted.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(&inserted);
    new_text.push_str(&text[end..]);

    Insertion {
        text: new_text,
        cursor: start + inserted.len() - tail,
        refocus: !flags.contains(InsertFlag::SuppressRefocus),
    }
}
