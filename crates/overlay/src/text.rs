use crate::config::{OffsetUnit, TextOptions};
use crate::types::Span;
use std::borrow::Cow;
use std::ops::Range;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Rewrite CRLF line endings to LF.
///
/// Offsets from the backend are computed on LF-only text, so this must run
/// before the text is indexed.
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Compose `text` to Unicode NFC.
///
/// Decomposed input (e.g. Hangul jamo or combining accents from macOS) would
/// otherwise shift every offset after it.
#[must_use]
pub fn normalize_unicode(text: &str) -> Cow<'_, str> {
    if matches!(is_nfc_quick(text.chars()), IsNormalized::Yes) {
        return Cow::Borrowed(text);
    }
    let composed: String = text.nfc().collect();
    if composed == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(composed)
    }
}

/// Apply the enabled preprocessing steps; borrows when nothing changed
#[must_use]
pub fn prepare<'t>(text: &'t str, options: &TextOptions) -> Cow<'t, str> {
    let text = if options.normalize_newlines {
        normalize_newlines(text)
    } else {
        Cow::Borrowed(text)
    };
    if !options.normalize_unicode {
        return text;
    }

    let composed = match normalize_unicode(&text) {
        Cow::Owned(composed) => Some(composed),
        Cow::Borrowed(_) => None,
    };
    match composed {
        Some(composed) => Cow::Owned(composed),
        None => text,
    }
}

/// Maps offsets in an [`OffsetUnit`] to byte offsets of a document.
#[derive(Debug, Clone)]
pub struct TextIndex {
    unit: OffsetUnit,
    // Unit offset of each character start, followed by the total length
    offsets: Vec<usize>,
    // Byte offset for each entry of `offsets`
    bytes: Vec<usize>,
}

impl TextIndex {
    #[must_use]
    pub fn new(text: &str, unit: OffsetUnit) -> Self {
        let capacity = text.len() + 1;
        let mut offsets = Vec::with_capacity(capacity);
        let mut bytes = Vec::with_capacity(capacity);
        let mut offset = 0;

        for (byte, ch) in text.char_indices() {
            offsets.push(offset);
            bytes.push(byte);
            offset += unit.width(ch);
        }
        offsets.push(offset);
        bytes.push(text.len());

        Self {
            unit,
            offsets,
            bytes,
        }
    }

    #[must_use]
    pub const fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Document length in units
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest character boundary not after `offset`, clamped to the length
    #[must_use]
    pub fn floor_boundary(&self, offset: usize) -> usize {
        let idx = self.offsets.partition_point(|&o| o <= offset);
        self.offsets[idx.saturating_sub(1)]
    }

    #[must_use]
    pub fn is_boundary(&self, offset: usize) -> bool {
        self.offsets.binary_search(&offset).is_ok()
    }

    /// Byte offset of a unit offset.
    ///
    /// # Panics
    ///
    /// Panics when `offset` is not a character boundary of the document.
    #[must_use]
    pub fn byte_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(idx) => self.bytes[idx],
            Err(_) => panic!(
                "offset {offset} is not a {} boundary of a {}-unit document",
                self.unit.as_str(),
                self.len()
            ),
        }
    }

    #[must_use]
    pub fn byte_range(&self, span: Span) -> Range<usize> {
        self.byte_offset(span.start)..self.byte_offset(span.end)
    }

    /// Slice `text` (the document this index was built from) by a unit span
    #[must_use]
    pub fn slice<'t>(&self, text: &'t str, span: Span) -> &'t str {
        &text[self.byte_range(span)]
    }
}
