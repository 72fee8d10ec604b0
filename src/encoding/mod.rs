//! Percent-encoding utilities.
//!
//! The encoder in this module never double-encodes: a `%` followed by two
//! hexadecimal digits is taken as an existing percent-encoded octet and left
//! untouched, so that encoding already encoded text is a no-op.
//!
//! ```
//! use plain_uri::encoding::{encode, table::BASE};
//!
//! let once = encode("some#user §", BASE);
//! assert_eq!(once, "some%23user%20%C2%A7");
//! assert_eq!(encode(&once, BASE), once);
//! ```

pub mod table;

pub use table::Table;

use core::{fmt, hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::{borrow::Cow, string::FromUtf8Error};
use table::{is_octet, RESERVED};

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0; 256];
    let shift = (hi as u8) * 4;

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

static OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
static OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet whose digits are known to be hexadecimal.
#[inline]
fn decode_octet(hi: u8, lo: u8) -> u8 {
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Returns the index of the first byte that the table would encode.
fn first_to_encode(s: &[u8], table: &Table) -> Option<usize> {
    let mut i = 0;
    while i < s.len() {
        let x = s[i];
        if x == b'%' && table.allows_enc() && is_octet(s, i) {
            i += 3;
        } else if table.allows(x) {
            i += 1;
        } else {
            return Some(i);
        }
    }
    None
}

fn encode_bytes(s: &[u8], table: &Table, buf: &mut String) {
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'%' && table.allows_enc() && is_octet(s, i) {
            buf.push('%');
            buf.push(s[i + 1] as char);
            buf.push(s[i + 2] as char);
            i += 3;
        } else {
            table.encode_byte(s[i], buf);
            i += 1;
        }
    }
}

/// Percent-encodes a string with the given table.
///
/// Each byte not allowed by the table is replaced with `%XX`, where `XX` are
/// two uppercase hexadecimal digits. A `%` is encoded as `%25` unless it
/// starts a valid percent-encoded octet and the table allows such octets.
///
/// Returns the input unchanged if nothing needs encoding.
///
/// # Examples
///
/// ```
/// use plain_uri::encoding::{encode, table::{BASE, EXTENDED}};
///
/// assert_eq!(encode("key%232", EXTENDED), "key%232");
/// assert_eq!(encode("100%", BASE), "100%25");
/// assert_eq!(encode("(a)", BASE), "%28a%29");
/// assert_eq!(encode("(a)", EXTENDED), "(a)");
/// ```
pub fn encode<'a>(s: &'a str, table: &Table) -> Cow<'a, str> {
    let bytes = s.as_bytes();
    match first_to_encode(bytes, table) {
        None => Cow::Borrowed(s),
        Some(i) => {
            let mut buf = String::with_capacity(s.len() + (s.len() - i) * 2);
            // Every byte before `i` is ASCII, so `i` is a char boundary.
            buf.push_str(&s[..i]);
            encode_bytes(&bytes[i..], table, &mut buf);
            Cow::Owned(buf)
        }
    }
}

/// Percent-encodes a string with the given table, appending it to a buffer.
///
/// See [`encode`] for details.
pub fn encode_to(s: &str, table: &Table, buf: &mut String) {
    let bytes = s.as_bytes();
    match first_to_encode(bytes, table) {
        None => buf.push_str(s),
        Some(i) => {
            buf.reserve(s.len() + (s.len() - i) * 2);
            buf.push_str(&s[..i]);
            encode_bytes(&bytes[i..], table, buf);
        }
    }
}

const fn validate_octets(s: &[u8]) -> bool {
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'%' {
            if !is_octet(s, i) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Percent-encoded string slices.
///
/// Every `%` in an `EStr` starts a valid percent-encoded octet,
/// which makes decoding infallible.
///
/// # Examples
///
/// Parse key-value pairs from a query string:
///
/// ```
/// use plain_uri::{encoding::EStr, Uri};
/// use std::collections::HashMap;
///
/// let uri = Uri::parse("?name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9!")?;
/// let map: HashMap<_, _> = uri
///     .query()
///     .split('&')
///     .map(|s| s.split_once('=').unwrap_or((s, EStr::EMPTY)))
///     .map(|(k, v)| (k.decode().into_string_lossy(), v.decode().into_string_lossy()))
///     .collect();
/// assert_eq!(map["name"], "张三");
/// assert_eq!(map["speech"], "¡Olé!");
/// # Ok::<_, plain_uri::Error>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &EStr;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static EStr = EStr::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None` if
    /// any `%` in the string does not start a valid percent-encoded octet.
    #[must_use]
    pub const fn new(s: &str) -> Option<&EStr> {
        if validate_octets(s.as_bytes()) {
            Some(EStr::new_validated(s))
        } else {
            None
        }
    }

    /// Yields the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the `EStr` slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use plain_uri::encoding::EStr;
    ///
    /// let dec = EStr::new("%C2%A7fragment").unwrap().decode();
    /// assert_eq!(dec.as_bytes(), b"\xc2\xa7fragment");
    /// assert_eq!(dec.into_string()?, "§fragment");
    /// # Ok::<_, std::string::FromUtf8Error>(())
    /// ```
    pub fn decode(&self) -> Decode<'_> {
        let bytes = self.inner.as_bytes();
        let Some(start) = bytes.iter().position(|&x| x == b'%') else {
            return Decode {
                src: &self.inner,
                buf: None,
            };
        };

        let mut buf = Vec::with_capacity(bytes.len());
        buf.extend_from_slice(&bytes[..start]);

        let mut i = start;
        while i < bytes.len() {
            let x = bytes[i];
            if x == b'%' {
                buf.push(decode_octet(bytes[i + 1], bytes[i + 2]));
                i += 3;
            } else {
                buf.push(x);
                i += 1;
            }
        }

        Decode {
            src: &self.inner,
            buf: Some(buf),
        }
    }

    /// Returns an iterator over subslices separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986/#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use plain_uri::Uri;
    ///
    /// let uri = Uri::parse("/path/to//dir/")?;
    /// assert!(uri.path().split('/').eq(["", "path", "to", "", "dir", ""]));
    /// # Ok::<_, plain_uri::Error>(())
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            delim.is_ascii() && RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );

        Split {
            s: &self.inner,
            delim: delim as u8,
            finished: false,
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter
    /// and returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986/#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use plain_uri::encoding::EStr;
    ///
    /// let (k, v) = EStr::new("key=value=more").unwrap().split_once('=').unwrap();
    /// assert_eq!(k, "key");
    /// assert_eq!(v, "value=more");
    ///
    /// assert!(EStr::new("abc").unwrap().split_once(';').is_none());
    /// ```
    pub fn split_once(&self, delim: char) -> Option<(&EStr, &EStr)> {
        assert!(
            delim.is_ascii() && RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );

        let i = self.inner.bytes().position(|x| x == delim as u8)?;
        let (head, tail) = (&self.inner[..i], &self.inner[i + 1..]);
        // Splitting at a reserved character leaves valid octets on both sides.
        Some((EStr::new_validated(head), EStr::new_validated(tail)))
    }
}

impl AsRef<str> for EStr {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for EStr {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<EStr> for str {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self == other.as_str()
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    #[inline]
    fn default() -> Self {
        EStr::EMPTY
    }
}

/// A wrapper of percent-decoded bytes.
///
/// This struct is created by calling [`decode`] on an `EStr` slice.
///
/// [`decode`]: EStr::decode
#[derive(Clone, Debug)]
pub struct Decode<'a> {
    src: &'a str,
    buf: Option<Vec<u8>>,
}

impl<'a> Decode<'a> {
    /// Returns a reference to the decoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.buf {
            Some(buf) => buf,
            None => self.src.as_bytes(),
        }
    }

    /// Yields the underlying decoded bytes.
    #[inline]
    pub fn into_bytes(self) -> Cow<'a, [u8]> {
        match self.buf {
            Some(buf) => Cow::Owned(buf),
            None => Cow::Borrowed(self.src.as_bytes()),
        }
    }

    /// Returns `true` if anything is decoded, i.e., the bytes are owned.
    #[inline]
    pub fn decoded_any(&self) -> bool {
        self.buf.is_some()
    }

    /// Converts the decoded bytes to a string.
    ///
    /// An error is returned if the decoded bytes are not valid UTF-8.
    pub fn into_string(self) -> Result<Cow<'a, str>, FromUtf8Error> {
        match self.buf {
            Some(buf) => String::from_utf8(buf).map(Cow::Owned),
            None => Ok(Cow::Borrowed(self.src)),
        }
    }

    /// Converts the decoded bytes to a string lossily.
    pub fn into_string_lossy(self) -> Cow<'a, str> {
        match self.buf {
            Some(buf) => match String::from_utf8(buf) {
                Ok(string) => Cow::Owned(string),
                Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
            None => Cow::Borrowed(self.src),
        }
    }
}

/// An iterator over subslices of an `EStr` slice separated by a delimiter.
///
/// This struct is created by calling [`split`] on an `EStr` slice.
///
/// [`split`]: EStr::split
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    s: &'a str,
    delim: u8,
    finished: bool,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        if self.finished {
            return None;
        }

        let head;
        match self.s.bytes().position(|x| x == self.delim) {
            Some(i) => {
                head = &self.s[..i];
                self.s = &self.s[i + 1..];
            }
            None => {
                self.finished = true;
                head = self.s;
            }
        }
        Some(EStr::new_validated(head))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (1, Some(self.s.len() + 1))
        }
    }
}

impl<'a> DoubleEndedIterator for Split<'a> {
    fn next_back(&mut self) -> Option<&'a EStr> {
        if self.finished {
            return None;
        }

        let tail;
        match self.s.bytes().rposition(|x| x == self.delim) {
            Some(i) => {
                tail = &self.s[i + 1..];
                self.s = &self.s[..i];
            }
            None => {
                self.finished = true;
                tail = self.s;
            }
        }
        Some(EStr::new_validated(tail))
    }
}

impl FusedIterator for Split<'_> {}
