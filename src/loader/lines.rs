//! Newline splitting over owned file content.
//!
//! Uses memchr for SIMD-optimized NUL and newline detection instead of a
//! byte-at-a-time scan with sentinel overwriting.

use crate::loader::buffer::OwnedBuffer;
use memchr::{memchr, memchr_iter};

/// Split `buffer` into its `'\n'`-terminated segments.
///
/// Scanning covers the buffer up to its first zero byte: the guaranteed
/// trailing sentinel, or an earlier interior NUL in the content, whichever
/// comes first. Each `'\n'` before that point emits the preceding segment
/// (exclusive of the `'\n'` itself) as an independent copy, converted
/// lossily to UTF-8.
///
/// A final unterminated segment after the last `'\n'` is **not** emitted;
/// callers that need the trailing bytes read the whole buffer instead.
pub fn split_lines(buffer: &OwnedBuffer) -> Vec<String> {
    let bytes = buffer.as_bytes_with_nul();

    // The trailing sentinel guarantees a zero byte exists.
    let stop = memchr(0, bytes).unwrap_or(bytes.len());
    let scan = &bytes[..stop];

    let mut result = Vec::new();
    let mut line_start = 0;
    for newline in memchr_iter(b'\n', scan) {
        result.push(String::from_utf8_lossy(&scan[line_start..newline]).into_owned());
        line_start = newline + 1;
    }
    result
}
