//! Parsers turning a string into a [`Uri`].

use crate::{
    encoding::table::{ALPHA, SCHEME},
    log::{debug, trace},
    Component, Error, ErrorKind, Parts, Result, Uri,
};

/// A strategy for parsing a string into a [`Uri`].
///
/// Implemented by [`DefaultParser`] and every closure
/// `Fn(&str) -> Result<Uri, Error>`.
///
/// # Examples
///
/// ```
/// use plain_uri::{parser::Parser, Error, Uri};
///
/// let https = |s: &str| -> Result<Uri, Error> { Ok(Uri::parse(s)?.with_scheme("https")) };
/// assert_eq!(https.parse("http://example.com")?.as_str(), "https://example.com");
/// # Ok::<_, plain_uri::Error>(())
/// ```
pub trait Parser {
    /// Parses a string into a `Uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid URI reference.
    fn parse(&self, s: &str) -> Result<Uri>;
}

impl<F: Fn(&str) -> Result<Uri>> Parser for F {
    #[inline]
    fn parse(&self, s: &str) -> Result<Uri> {
        self(s)
    }
}

/// The parser following the generic URI syntax of [RFC 3986].
///
/// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3
///
/// The input is decomposed with [`split`] and the raw parts are passed
/// through [`Uri::from_parts`], which validates and encodes them.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultParser;

impl Parser for DefaultParser {
    fn parse(&self, s: &str) -> Result<Uri> {
        let res = split(s).and_then(|parts| {
            trace!("split {s:?} into {parts:?}");
            Uri::from_parts(parts)
        });
        if let Err(_e) = &res {
            debug!("rejected {s:?}: {_e}");
        }
        res
    }
}

/// Decomposes a URI reference into raw parts without filtering them.
///
/// # Errors
///
/// A prefix before the first `:` that does not match the scheme grammar
/// is taken as the start of a relative path.
///
/// Returns a [`Malformed`] error if the scheme is empty, if the port
/// contains a non-digit,
/// if an IP literal host is not closed by `]`, or if user information
/// or a port is present with an empty host.
///
/// Returns a [`PortOutOfRange`] error if the port does not fit in `u32`.
///
/// [`Malformed`]: ErrorKind::Malformed
/// [`PortOutOfRange`]: ErrorKind::PortOutOfRange
///
/// # Examples
///
/// ```
/// use plain_uri::{parser::split, Parts};
///
/// assert_eq!(
///     split("ftp://u:p@host.com/test")?,
///     Parts {
///         scheme: "ftp",
///         user: "u",
///         password: "p",
///         host: "host.com",
///         path: "/test",
///         ..Parts::EMPTY
///     }
/// );
/// # Ok::<_, plain_uri::Error>(())
/// ```
pub fn split(s: &str) -> Result<Parts<'_>> {
    let mut reader = Reader::new(s);
    let mut parts = Parts::EMPTY;

    parts.scheme = reader.read_scheme()?;
    if reader.read_str("//") {
        let start = reader.pos;
        let auth = reader.read_until(b"/?#");
        read_authority(auth, start, &mut parts)?;
    }
    parts.path = reader.read_until(b"?#");
    if reader.read_str("?") {
        parts.query = reader.read_until(b"#");
    }
    if reader.read_str("#") {
        parts.fragment = reader.read_until(b"");
    }
    Ok(parts)
}

/// A cursor over the input.
///
/// # Invariants
///
/// `pos <= s.len()`, `pos` is non-decreasing and on a char boundary.
struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Reader { s, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.s[self.pos..]
    }

    fn read_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            // INVARIANT: The remaining input starts with `prefix`.
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    // Reads up to, not including, the first of the given ASCII delimiters.
    fn read_until(&mut self, delims: &[u8]) -> &'a str {
        let rest = self.rest();
        let len = rest
            .bytes()
            .position(|x| delims.contains(&x))
            .unwrap_or(rest.len());
        // INVARIANT: An ASCII delimiter is always on a char boundary.
        self.pos += len;
        &rest[..len]
    }

    fn read_scheme(&mut self) -> Result<&'a str> {
        let bytes = self.s.as_bytes();
        let Some(i) = bytes.iter().position(|x| b":/?#".contains(x)) else {
            return Ok("");
        };
        if bytes[i] != b':' {
            return Ok("");
        }

        let scheme = &bytes[..i];
        let Some(&first) = scheme.first() else {
            return Err(Error::malformed(0));
        };
        // Not a scheme: the `:` belongs to a relative path.
        if !ALPHA.allows(first) || !scheme.iter().all(|&x| SCHEME.allows(x)) {
            return Ok("");
        }

        self.pos = i + 1;
        Ok(&self.s[..i])
    }
}

/// Splits an authority starting at index `start` of the input into parts.
fn read_authority<'a>(auth: &'a str, start: usize, parts: &mut Parts<'a>) -> Result<()> {
    let (userinfo, host_start) = match auth.rfind('@') {
        Some(i) => (Some(&auth[..i]), i + 1),
        None => (None, 0),
    };
    if let Some(userinfo) = userinfo {
        match userinfo.split_once(':') {
            Some((user, password)) => {
                parts.user = user;
                parts.password = password;
            }
            None => parts.user = userinfo,
        }
    }

    let hostport = &auth[host_start..];
    let (host, port) = if hostport.starts_with('[') {
        let Some(i) = hostport.find(']') else {
            return Err(Error::malformed(start + host_start));
        };
        let rem = &hostport[i + 1..];
        let port = if rem.is_empty() {
            None
        } else if let Some(port) = rem.strip_prefix(':') {
            Some(port)
        } else {
            return Err(Error::malformed(start + host_start + i + 1));
        };
        (&hostport[..=i], port)
    } else {
        match hostport.rfind(':') {
            Some(i) => (&hostport[..i], Some(&hostport[i + 1..])),
            None => (hostport, None),
        }
    };

    if host.is_empty() && (userinfo.is_some() || port.is_some()) {
        return Err(Error::malformed(start));
    }
    parts.host = host;

    if let Some(port) = port {
        let port_start = start + auth.len() - port.len();
        parts.port = parse_port(port, port_start)?;
    }
    Ok(())
}

fn parse_port(s: &str, start: usize) -> Result<Option<u32>> {
    if s.is_empty() {
        return Ok(None);
    }
    if let Some(i) = s.bytes().position(|x| !x.is_ascii_digit()) {
        return Err(Error::malformed(start + i));
    }
    match s.parse() {
        Ok(port) => Ok(Some(port)),
        Err(_) => Err(Error::new(Component::Port, ErrorKind::PortOutOfRange).at(start)),
    }
}
