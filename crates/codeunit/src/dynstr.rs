//! Length-prefixed, NUL-terminated mutable byte string.
//!
//! A [`DynStr`] owns a single allocation laid out as
//!
//! ```text
//! [capacity: usize][length: usize][content bytes...][0]
//! ```
//!
//! with the handle pointing at the first content byte, so length and
//! capacity are O(1) header reads and the content doubles as a C string.
//! At least one terminator byte always follows the content; `capacity` is
//! the largest content length the allocation can hold without growing.
//!
//! Growing operations consume the handle and return a new one —
//! `None` means the allocator failed and the original has been released.
//! Operations that can never grow (`trim`, `remove_at`) mutate in place.
//! Two live handles never alias one buffer; `Drop` frees it.

use alloc::alloc::{alloc_zeroed, dealloc, realloc, Layout};
use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ops::Deref;
use core::ptr::{self, NonNull};

use crate::text;

const HEADER: usize = 2 * mem::size_of::<usize>();

/// Header + content + terminator. `None` when the size arithmetic
/// overflows, which surfaces as an allocation failure.
fn buffer_layout(capacity: usize) -> Option<Layout> {
    let size = HEADER.checked_add(capacity)?.checked_add(1)?;
    Layout::from_size_align(size, mem::align_of::<usize>()).ok()
}

/// Heap-allocated byte string with a length/capacity header in front of
/// the content and a NUL behind it.
pub struct DynStr {
    /// Points at the first content byte, `HEADER` bytes into the
    /// allocation.
    content: NonNull<u8>,
}

// A DynStr is an exclusively owned buffer, like a Vec<u8>.
unsafe impl Send for DynStr {}
unsafe impl Sync for DynStr {}

impl DynStr {
    #[inline]
    fn allocation(&self) -> *mut u8 {
        // SAFETY: `content` always sits HEADER bytes into a live allocation.
        unsafe { self.content.as_ptr().sub(HEADER) }
    }

    #[inline]
    fn header(&self) -> *mut usize {
        self.allocation().cast::<usize>()
    }

    /// Updates the length header and rewrites the terminator behind the
    /// content. Callers guarantee `len <= capacity`.
    unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        unsafe {
            self.header().add(1).write(len);
            self.content.as_ptr().add(len).write(0);
        }
    }

    /// Allocates an empty string able to hold `capacity` content bytes.
    /// The content region is zeroed. Returns `None` when the allocator
    /// fails.
    pub fn alloc(capacity: usize) -> Option<DynStr> {
        let layout = buffer_layout(capacity)?;
        // SAFETY: the layout always has a non-zero size (header + NUL).
        let allocation = NonNull::new(unsafe { alloc_zeroed(layout) })?;
        unsafe {
            let header = allocation.as_ptr().cast::<usize>();
            header.write(capacity);
            header.add(1).write(0);
            Some(DynStr {
                content: NonNull::new_unchecked(allocation.as_ptr().add(HEADER)),
            })
        }
    }

    /// New string holding a copy of `bytes`.
    pub fn new(bytes: &[u8]) -> Option<DynStr> {
        let mut s = Self::alloc(bytes.len())?;
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), s.content.as_ptr(), bytes.len());
            s.set_len(bytes.len());
        }
        Some(s)
    }

    /// New string copying `bytes` up to (excluding) its first NUL, for
    /// buffers carrying C-style terminated data.
    pub fn new_until_nul(bytes: &[u8]) -> Option<DynStr> {
        Self::new(&bytes[..crate::units::strlen(bytes)])
    }

    /// New string from a format invocation, sized by a measuring pass
    /// before a single exact-size render.
    ///
    /// ```
    /// # use codeunit::DynStr;
    /// let s = DynStr::new_fmt(format_args!("{}-{}", 4, "up")).unwrap();
    /// assert_eq!(&*s, b"4-up");
    /// ```
    pub fn new_fmt(args: fmt::Arguments<'_>) -> Option<DynStr> {
        let mut s = Self::alloc(measure_fmt(args)?)?;
        let len = render_fmt(&mut s, 0, args)?;
        unsafe { s.set_len(len) };
        Some(s)
    }

    /// Content length in bytes. The terminator is not counted.
    #[inline]
    pub fn len(&self) -> usize {
        unsafe { self.header().add(1).read() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest content length the current allocation can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        unsafe { self.header().read() }
    }

    /// The content bytes, terminator excluded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.content.as_ptr(), self.len()) }
    }

    /// The content bytes including the trailing NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.content.as_ptr(), self.len() + 1) }
    }

    /// Moves the content into an allocation with at least `capacity`
    /// content bytes. Consumes the handle; on failure the buffer is
    /// released.
    fn grow(self, capacity: usize) -> Option<DynStr> {
        let old_layout = buffer_layout(self.capacity())?;
        let Some(new_layout) = buffer_layout(capacity) else {
            return None; // drop frees the original
        };
        let this = ManuallyDrop::new(self);
        // SAFETY: the allocation was made with `old_layout`.
        let allocation = unsafe { realloc(this.allocation(), old_layout, new_layout.size()) };
        match NonNull::new(allocation) {
            Some(p) => unsafe {
                p.as_ptr().cast::<usize>().write(capacity);
                Some(DynStr {
                    content: NonNull::new_unchecked(p.as_ptr().add(HEADER)),
                })
            },
            None => {
                // Realloc failure leaves the old block alive; release it to
                // honor the consumed-handle contract without leaking.
                unsafe { dealloc(this.allocation(), old_layout) };
                None
            }
        }
    }

    /// Replaces the content with a copy of `bytes`, growing if needed.
    pub fn set(mut self, bytes: &[u8]) -> Option<DynStr> {
        if self.capacity() < bytes.len() {
            self = self.grow(bytes.len())?;
        }
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.content.as_ptr(), bytes.len());
            self.set_len(bytes.len());
        }
        Some(self)
    }

    /// Appends a copy of `bytes`, growing if needed.
    pub fn cat(mut self, bytes: &[u8]) -> Option<DynStr> {
        let len = self.len();
        let total = len.checked_add(bytes.len())?;
        if self.capacity() < total {
            self = self.grow(total)?;
        }
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.content.as_ptr().add(len), bytes.len());
            self.set_len(total);
        }
        Some(self)
    }

    /// Appends a format invocation, measured first and rendered once.
    pub fn cat_fmt(mut self, args: fmt::Arguments<'_>) -> Option<DynStr> {
        let extra = measure_fmt(args)?;
        let len = self.len();
        let total = len.checked_add(extra)?;
        if self.capacity() < total {
            self = self.grow(total)?;
        }
        let end = render_fmt(&mut self, len, args)?;
        unsafe { self.set_len(end) };
        Some(self)
    }

    /// Byte offset of the first occurrence of `needle` in the content.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        find(self.as_bytes(), needle)
    }

    /// Byte offset of the last occurrence of `needle` in the content.
    pub fn find_last(&self, needle: &[u8]) -> Option<usize> {
        find_last(self.as_bytes(), needle)
    }

    /// New string holding the tag-bounded substring of `src`; see
    /// [`substr_tagged`]. `None` when a tag is set but absent, or on
    /// allocation failure.
    pub fn new_substr_tagged(src: &[u8], tag_beg: &[u8], tag_end: &[u8]) -> Option<DynStr> {
        DynStr::new(substr_tagged(src, tag_beg, tag_end)?)
    }

    /// New string with leading and trailing whitespace removed from
    /// `bytes`.
    pub fn new_trim(bytes: &[u8]) -> Option<DynStr> {
        let beg = text::ltrim_offset(bytes);
        let end = text::rtrim_offset(bytes).max(beg);
        DynStr::new(&bytes[beg..end])
    }

    /// Splices `other` over `len` bytes of content starting at `offset`.
    ///
    /// An out-of-range or zero-length range leaves the string unchanged.
    pub fn replace_range(self, offset: usize, len: usize, other: &[u8]) -> Option<DynStr> {
        self.replace_range_wrapped(offset, len, other, b"")
    }

    /// The three-way splice behind range replacement: content before the
    /// range, then `wrap other wrap`, then content after it.
    fn replace_range_wrapped(
        self,
        offset: usize,
        len: usize,
        other: &[u8],
        wrap: &[u8],
    ) -> Option<DynStr> {
        if len == 0 || offset.checked_add(len).map_or(true, |end| end > self.len()) {
            return Some(self);
        }
        let bytes = self.as_bytes();
        DynStr::new(&bytes[..offset])?
            .cat(wrap)?
            .cat(other)?
            .cat(wrap)?
            .cat(&bytes[offset + len..])
    }

    /// Replaces the region between `tag_beg` and `tag_end` (tags kept) with
    /// the tag-bounded substring of `other` (its tags included, per
    /// [`substr_tagged`]). With `on_separate_lines` the replacement is
    /// wrapped in a newline on each side.
    ///
    /// A tag that is set but absent in either string leaves the content
    /// unchanged.
    pub fn replace_range_tagged(
        self,
        tag_beg: &[u8],
        tag_end: &[u8],
        other: &[u8],
        other_tag_beg: &[u8],
        other_tag_end: &[u8],
        on_separate_lines: bool,
    ) -> Option<DynStr> {
        let beg = if tag_beg.is_empty() {
            0
        } else {
            match self.find(tag_beg) {
                // The tag itself stays.
                Some(offset) => offset + tag_beg.len(),
                None => return Some(self),
            }
        };
        let end = if tag_end.is_empty() {
            self.len()
        } else {
            match find(&self.as_bytes()[beg..], tag_end) {
                Some(offset) => offset + beg,
                None => return Some(self),
            }
        };
        let Some(replacement) = substr_tagged(other, other_tag_beg, other_tag_end) else {
            return Some(self);
        };
        let wrap: &[u8] = if on_separate_lines { b"\n" } else { b"" };
        self.replace_range_wrapped(beg, end - beg, replacement, wrap)
    }

    /// Replaces every occurrence of `query` with `replacement`, left to
    /// right, never rescanning replaced output.
    pub fn replace_all(mut self, query: &[u8], replacement: &[u8]) -> Option<DynStr> {
        if query.is_empty() {
            return Some(self);
        }
        let mut offset = 0;
        while let Some(location) = find(&self.as_bytes()[offset..], query) {
            self = self.replace_range(offset + location, query.len(), replacement)?;
            offset += location + replacement.len();
        }
        Some(self)
    }

    /// Removes leading and trailing whitespace in place. Never
    /// reallocates; the length only shrinks.
    pub fn trim(&mut self) {
        let (beg, end) = {
            let bytes = self.as_bytes();
            (text::ltrim_offset(bytes), text::rtrim_offset(bytes))
        };
        let keep = end.saturating_sub(beg);
        unsafe {
            ptr::copy(self.content.as_ptr().add(beg), self.content.as_ptr(), keep);
            self.set_len(keep);
        }
    }

    /// Removes the byte at `index`, shifting the tail (terminator
    /// included) down one. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) {
        let len = self.len();
        if index >= len {
            return;
        }
        unsafe {
            ptr::copy(
                self.content.as_ptr().add(index + 1),
                self.content.as_ptr().add(index),
                len - index,
            );
            self.set_len(len - 1);
        }
    }
}

impl Drop for DynStr {
    fn drop(&mut self) {
        // The layout computation succeeded when this buffer was made.
        if let Some(layout) = buffer_layout(self.capacity()) {
            unsafe { dealloc(self.allocation(), layout) };
        }
    }
}

impl Deref for DynStr {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for DynStr {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for DynStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynStr")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("content", &self.as_bytes())
            .finish()
    }
}

impl PartialEq<[u8]> for DynStr {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for DynStr {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

/// Measures how many bytes `args` renders to.
fn measure_fmt(args: fmt::Arguments<'_>) -> Option<usize> {
    use fmt::Write as _;

    struct Counter(usize);

    impl fmt::Write for Counter {
        fn write_str(&mut self, part: &str) -> fmt::Result {
            self.0 += part.len();
            Ok(())
        }
    }

    let mut counter = Counter(0);
    counter.write_fmt(args).ok()?;
    Some(counter.0)
}

/// Renders `args` into `dst` starting at `offset`; the measuring pass
/// already proved the capacity. Returns the end offset.
fn render_fmt(dst: &mut DynStr, offset: usize, args: fmt::Arguments<'_>) -> Option<usize> {
    use fmt::Write as _;

    struct Filler<'a> {
        dst: &'a mut DynStr,
        at: usize,
    }

    impl fmt::Write for Filler<'_> {
        fn write_str(&mut self, part: &str) -> fmt::Result {
            let bytes = part.as_bytes();
            if self.dst.capacity() - self.at < bytes.len() {
                return Err(fmt::Error);
            }
            unsafe {
                ptr::copy_nonoverlapping(
                    bytes.as_ptr(),
                    self.dst.content.as_ptr().add(self.at),
                    bytes.len(),
                );
            }
            self.at += bytes.len();
            Ok(())
        }
    }

    let mut filler = Filler { dst, at: offset };
    filler.write_fmt(args).ok()?;
    Some(filler.at)
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
/// An empty needle or haystack never matches.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.is_empty() || needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Byte offset of the last occurrence of `needle` in `haystack`.
pub fn find_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.is_empty() || needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|window| window == needle)
}

/// The sub-slice of `src` from the first occurrence of `tag_beg` through
/// (and including) the first following occurrence of `tag_end`.
///
/// An empty `tag_beg` means "start of `src`", an empty `tag_end` means
/// "end of `src`". Both tags are part of the returned slice. `None` when
/// a non-empty tag is absent.
pub fn substr_tagged<'a>(src: &'a [u8], tag_beg: &[u8], tag_end: &[u8]) -> Option<&'a [u8]> {
    let beg = if tag_beg.is_empty() {
        0
    } else {
        find(src, tag_beg)?
    };
    let end = if tag_end.is_empty() {
        src.len()
    } else {
        let search_from = beg + tag_beg.len();
        find(&src[search_from..], tag_end)? + search_from + tag_end.len()
    };
    Some(&src[beg..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_invariants_hold_through_growth() {
        let s = DynStr::alloc(4).unwrap();
        assert_eq!(s.len(), 0);
        assert_eq!(s.capacity(), 4);
        assert_eq!(s.as_bytes_with_nul(), b"\0");

        let s = s.set(b"hello").unwrap();
        assert_eq!(s.len(), 5);
        assert!(s.capacity() >= 5);
        assert_eq!(s.as_bytes_with_nul(), b"hello\0");

        let s = s.cat(b" world").unwrap();
        assert_eq!(s.len(), 11);
        assert_eq!(s.as_bytes_with_nul(), b"hello world\0");
        assert!(s.len() <= s.capacity());
    }

    #[test]
    fn new_until_nul_stops_at_terminator() {
        let s = DynStr::new_until_nul(b"abc\0def").unwrap();
        assert_eq!(s, *b"abc");
    }

    #[test]
    fn formatted_construction_measures_then_renders() {
        let s = DynStr::new_fmt(format_args!("{}+{}={}", 2, 2, 4)).unwrap();
        assert_eq!(s, *b"2+2=4");
        assert_eq!(s.len(), 5);
        assert_eq!(s.capacity(), 5);

        let s = s.cat_fmt(format_args!(" ({})", "ok")).unwrap();
        assert_eq!(s, *b"2+2=4 (ok)");
    }

    #[test]
    fn find_and_find_last() {
        let s = DynStr::new(b"abcabc").unwrap();
        assert_eq!(s.find(b"bc"), Some(1));
        assert_eq!(s.find_last(b"bc"), Some(4));
        assert_eq!(s.find(b"xy"), None);
        assert_eq!(s.find(b""), None);
        assert_eq!(find(b"", b"a"), None);
    }

    #[test]
    fn substr_tagged_includes_both_tags() {
        let src = b"pre <a>body</a> post";
        assert_eq!(substr_tagged(src, b"<a>", b"</a>"), Some(&b"<a>body</a>"[..]));
        assert_eq!(substr_tagged(src, b"", b"<a>"), Some(&b"pre <a>"[..]));
        assert_eq!(substr_tagged(src, b"<a>", b""), Some(&b"<a>body</a> post"[..]));
        assert_eq!(substr_tagged(src, b"<b>", b"</a>"), None);
        assert_eq!(substr_tagged(src, b"<a>", b"</b>"), None);
    }

    #[test]
    fn replace_range_splices() {
        let s = DynStr::new(b"hello world").unwrap();
        let s = s.replace_range(6, 5, b"there").unwrap();
        assert_eq!(s, *b"hello there");
        assert_eq!(s.len(), 11);
        assert_eq!(s.as_bytes_with_nul()[11], 0);
    }

    #[test]
    fn replace_range_ignores_bad_ranges() {
        let s = DynStr::new(b"abc").unwrap();
        let s = s.replace_range(1, 0, b"xx").unwrap();
        assert_eq!(s, *b"abc");
        let s = s.replace_range(2, 5, b"xx").unwrap();
        assert_eq!(s, *b"abc");
        let s = s.replace_range(usize::MAX, 2, b"xx").unwrap();
        assert_eq!(s, *b"abc");
    }

    #[test]
    fn replace_range_tagged_swaps_tag_bodies() {
        let s = DynStr::new(b"<cfg>old</cfg>").unwrap();
        let s = s
            .replace_range_tagged(b"<cfg>", b"</cfg>", b"junk [new] junk", b"[", b"]", false)
            .unwrap();
        assert_eq!(s, *b"<cfg>[new]</cfg>");
    }

    #[test]
    fn replace_range_tagged_separate_lines() {
        let s = DynStr::new(b"<cfg>old</cfg>").unwrap();
        let s = s
            .replace_range_tagged(b"<cfg>", b"</cfg>", b"[new]", b"[", b"]", true)
            .unwrap();
        assert_eq!(s, *b"<cfg>\n[new]\n</cfg>");
    }

    #[test]
    fn replace_range_tagged_missing_tag_is_a_no_op() {
        let s = DynStr::new(b"plain").unwrap();
        let s = s
            .replace_range_tagged(b"<cfg>", b"</cfg>", b"[new]", b"[", b"]", false)
            .unwrap();
        assert_eq!(s, *b"plain");
    }

    #[test]
    fn replace_all_walks_left_to_right() {
        let s = DynStr::new(b"a.b.c").unwrap();
        let s = s.replace_all(b".", b"::").unwrap();
        assert_eq!(s, *b"a::b::c");

        // Replacement containing the query must not loop.
        let s = DynStr::new(b"xx").unwrap();
        let s = s.replace_all(b"x", b"xx").unwrap();
        assert_eq!(s, *b"xxxx");
    }

    #[test]
    fn trim_in_place() {
        let mut s = DynStr::new(" \t keep me \u{3000}".as_bytes()).unwrap();
        let cap = s.capacity();
        s.trim();
        assert_eq!(s, *b"keep me");
        assert_eq!(s.capacity(), cap);
        assert_eq!(s.as_bytes_with_nul()[7], 0);

        let mut s = DynStr::new(b"   ").unwrap();
        s.trim();
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn new_trim() {
        let s = DynStr::new_trim(b"  x  ").unwrap();
        assert_eq!(s, *b"x");
        let s = DynStr::new_trim(b" \r\n ").unwrap();
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn remove_at_shifts_terminator() {
        let mut s = DynStr::new(b"abc").unwrap();
        s.remove_at(1);
        assert_eq!(s, *b"ac");
        assert_eq!(s.as_bytes_with_nul(), b"ac\0");

        s.remove_at(10); // out of range: unchanged
        assert_eq!(s, *b"ac");
    }
}
