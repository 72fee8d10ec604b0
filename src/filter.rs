//! Per-component validation and normalization.
//!
//! Each function takes a raw component value and returns the form that a
//! [`Uri`] stores. Textual components come out percent-encoded, and since
//! the encoder leaves existing percent-encoded octets alone, raw and
//! pre-encoded input produce the same result.
//!
//! [`Uri`]: crate::Uri

use crate::{
    encoding::{
        encode, encode_to,
        table::{BASE, EXTENDED},
    },
    Component, Error, ErrorKind, Result,
};

/// Lowercases a scheme and strips any trailing `:`.
///
/// ```
/// assert_eq!(plain_uri::filter::scheme("HTTP:"), "http");
/// ```
pub fn scheme(s: &str) -> String {
    s.trim_end_matches(':').to_ascii_lowercase()
}

/// Percent-encodes a user.
pub fn user(s: &str) -> String {
    encode(s, BASE).into_owned()
}

/// Percent-encodes a password.
pub fn password(s: &str) -> String {
    encode(s, BASE).into_owned()
}

/// Lowercases a host.
pub fn host(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Checks a port, normalizing `0` to `None`.
///
/// # Errors
///
/// Returns an error if the port is greater than 65535.
pub fn port(port: Option<u32>) -> Result<Option<u16>> {
    match port {
        None | Some(0) => Ok(None),
        Some(port) => match u16::try_from(port) {
            Ok(port) => Ok(Some(port)),
            Err(_) => Err(Error::new(Component::Port, ErrorKind::PortOutOfRange)),
        },
    }
}

/// Percent-encodes a path segment by segment.
///
/// # Errors
///
/// Returns an error if the path contains a `?` or `#`.
///
/// ```
/// use plain_uri::filter;
///
/// assert_eq!(filter::path("/some%23path/sub§path")?, "/some%23path/sub%C2%A7path");
/// assert!(filter::path("/a?b").is_err());
/// # Ok::<_, plain_uri::Error>(())
/// ```
pub fn path(s: &str) -> Result<String> {
    if let Some(i) = s.find(|c| c == '?' || c == '#') {
        return Err(Error::new(Component::Path, ErrorKind::PathDelimiter).at(i));
    }

    let mut buf = String::with_capacity(s.len());
    for (i, seg) in s.split('/').enumerate() {
        if i != 0 {
            buf.push('/');
        }
        encode_to(seg, BASE, &mut buf);
    }
    Ok(buf)
}

/// Strips a leading `?` and percent-encodes each key and value of a query.
///
/// Pairs are separated by `&` and split on their first `=`.
///
/// ```
/// assert_eq!(
///     plain_uri::filter::query("ke#y1=val1&key%232=val2"),
///     "ke%23y1=val1&key%232=val2"
/// );
/// ```
pub fn query(s: &str) -> String {
    let s = s.strip_prefix('?').unwrap_or(s);

    let mut buf = String::with_capacity(s.len());
    for (i, pair) in s.split('&').enumerate() {
        if i != 0 {
            buf.push('&');
        }
        match pair.split_once('=') {
            Some((key, value)) => {
                encode_to(key, EXTENDED, &mut buf);
                buf.push('=');
                encode_to(value, EXTENDED, &mut buf);
            }
            None => encode_to(pair, EXTENDED, &mut buf),
        }
    }
    buf
}

/// Strips a leading `#` and percent-encodes a fragment.
pub fn fragment(s: &str) -> String {
    let s = s.strip_prefix('#').unwrap_or(s);
    encode(s, BASE).into_owned()
}
