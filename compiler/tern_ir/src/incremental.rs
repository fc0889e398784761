//! Edit descriptions for incremental re-parsing.
//!
//! A [`TextChange`] is what an editor reports. After re-scanning, the lexer
//! turns it into an [`EditDescriptor`]: the unchanged tokens bordering the
//! edit in the new stream, plus the affected byte range of the old source.

use crate::{Span, TokenId};

/// A single text edit: `[start, old_end)` of the old text is replaced by
/// `new_len` bytes.
///
/// ```
/// use tern_ir::incremental::TextChange;
///
/// let insert = TextChange::insert(10, 5);
/// assert_eq!(insert.delta(), 5);
///
/// let replace = TextChange::replace(0, 3, 5);
/// assert_eq!(replace.delta(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TextChange {
    /// Start byte offset in old text.
    pub start: u32,
    /// End byte offset in old text (exclusive).
    pub old_end: u32,
    /// Length of replacement text in bytes.
    pub new_len: u32,
}

impl TextChange {
    #[inline]
    pub const fn new(start: u32, old_end: u32, new_len: u32) -> Self {
        TextChange {
            start,
            old_end,
            new_len,
        }
    }

    /// An insertion (nothing removed).
    #[inline]
    pub const fn insert(at: u32, len: u32) -> Self {
        TextChange {
            start: at,
            old_end: at,
            new_len: len,
        }
    }

    /// A deletion (nothing inserted).
    #[inline]
    pub const fn delete(start: u32, len: u32) -> Self {
        TextChange {
            start,
            old_end: start + len,
            new_len: 0,
        }
    }

    #[inline]
    pub const fn replace(start: u32, old_len: u32, new_len: u32) -> Self {
        TextChange {
            start,
            old_end: start + old_len,
            new_len,
        }
    }

    /// Net change in document length.
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.old_end - self.start)
    }

    #[inline]
    pub const fn old_len(&self) -> u32 {
        self.old_end - self.start
    }

    /// New end position after the change is applied.
    #[inline]
    pub const fn new_end(&self) -> u32 {
        self.start + self.new_len
    }

    /// Check if a span of the old text lies entirely before this change.
    #[inline]
    pub fn is_before(&self, span: Span) -> bool {
        span.end <= self.start
    }

    /// Check if a span of the old text lies entirely after this change.
    #[inline]
    pub fn is_after(&self, span: Span) -> bool {
        span.start >= self.old_end
    }
}

/// The modified region of the old source.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OriginalRange {
    /// Nothing was removed; text was inserted at this offset.
    Insertion { at: u32 },
    /// Bytes `start..=end` were replaced (`end` is inclusive).
    Replaced { start: u32, end: u32 },
}

impl OriginalRange {
    /// Decode the `(start, end)` convention where `end < start` marks an insertion.
    pub fn from_offsets(start: u32, end: i64) -> Self {
        if end < i64::from(start) {
            OriginalRange::Insertion { at: start }
        } else {
            let end = u32::try_from(end).unwrap_or(u32::MAX);
            OriginalRange::Replaced { start, end }
        }
    }

    /// Inclusive bounds for node location.
    #[inline]
    pub fn bounds(self) -> (u32, u32) {
        match self {
            OriginalRange::Insertion { at } => (at, at),
            OriginalRange::Replaced { start, end } => (start, end),
        }
    }

    #[inline]
    pub fn start(self) -> u32 {
        self.bounds().0
    }
}

/// What the driver needs to know about an edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EditDescriptor {
    /// Last unaffected token before the edit, in the new stream.
    pub left_token: TokenId,
    /// First unaffected token after the edit, in the new stream.
    pub right_token: TokenId,
    /// Affected bytes of the old source.
    pub original: OriginalRange,
}

impl EditDescriptor {
    pub fn new(left_token: TokenId, right_token: TokenId, original: OriginalRange) -> Self {
        EditDescriptor {
            left_token,
            right_token,
            original,
        }
    }

    /// Build from raw offsets, `original_end < original_start` meaning insertion.
    pub fn from_offsets(
        left_token: TokenId,
        right_token: TokenId,
        original_start: u32,
        original_end: i64,
    ) -> Self {
        Self::new(
            left_token,
            right_token,
            OriginalRange::from_offsets(original_start, original_end),
        )
    }
}
