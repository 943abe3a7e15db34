//! Sentinel-terminated source buffer backing [`SourceCursor`](crate::SourceCursor).
//!
//! The scanner treats a lookahead of `'\0'` as end of input, so the buffer
//! appends a `0x00` sentinel after the source and pads with zeros up to the
//! next 64-byte boundary. Lookahead never needs a bounds check, and decoding
//! a multi-byte character near the end always has four readable bytes.
//!
//! Because `'\0'` doubles as the end marker, an interior null byte would end
//! scanning early. Construction records every such byte as an
//! [`EncodingIssue`] so the host can report it.

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Longest UTF-8 sequence; the buffer keeps this many readable bytes past the source.
const MAX_CHAR_WIDTH: usize = 4;

/// Owned copy of the source with a zero sentinel and zero padding.
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding problem found while building the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte position of the problematic sequence.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`EF BB BF`) at the start. Hosts skip it before scanning.
    Utf8Bom,
    /// U+0000 inside the source. The scanner reads it as end of input.
    InteriorNull,
}

impl SourceBuffer {
    /// Copy `source` into a sentinel-terminated, zero-padded buffer.
    ///
    /// Sources longer than `u32::MAX` bytes saturate `len()` at `u32::MAX`.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to the next 64-byte boundary, keeping room for a full
        // character read starting at the sentinel.
        let padded_len = (source_len + MAX_CHAR_WIDTH + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let mut encoding_issues = Vec::new();
        detect_bom(source_bytes, &mut encoding_issues);
        detect_interior_nulls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// Source bytes without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Full buffer including the sentinel and padding.
    pub(crate) fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Source text between two offsets produced by the scanner.
    ///
    /// Returns `None` if the range is out of bounds or splits a character.
    pub fn slice(&self, start: u32, end: u32) -> Option<&str> {
        let bytes = self.as_bytes().get(start as usize..end as usize)?;
        std::str::from_utf8(bytes).ok()
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Offset where scanning should begin: past a leading UTF-8 BOM, if any.
    pub fn content_start(&self) -> u32 {
        match self.encoding_issues.first() {
            Some(EncodingIssue {
                kind: EncodingIssueKind::Utf8Bom,
                len,
                ..
            }) => *len,
            _ => 0,
        }
    }

    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: 3,
        });
    }
}

fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut offset = 0;
    while let Some(pos) = memchr::memchr(0, &source[offset..]) {
        let absolute = offset + pos;
        if let Ok(p) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos: p,
                len: 1,
            });
        }
        offset = absolute + 1;
    }
}
