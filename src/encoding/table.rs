//! Byte pattern tables used for percent-encoding.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 2234].
//!
//! [RFC 2234]: https://datatracker.ietf.org/doc/html/rfc2234/

const fn gen_hex_table() -> [u8; 512] {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut i = 0;
    let mut out = [0; 512];
    while i < 256 {
        out[i * 2] = HEX_DIGITS[i >> 4];
        out[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    out
}

const HEX_TABLE: &[u8; 512] = &gen_hex_table();

/// A table determining the byte patterns allowed in a string.
///
/// Bytes allowed by a table are left as they are by the encoder.
/// Every other byte is percent-encoded, except for a `%` that starts
/// a valid percent-encoded octet in a table that [allows them].
///
/// [allows them]: Self::allows_enc
#[derive(Clone, Copy, Debug)]
pub struct Table {
    arr: [u8; 256],
    allows_enc: bool,
}

impl Table {
    /// Generates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes equals `b'%'`.
    pub const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [0; 256];
        while let [cur, rem @ ..] = bytes {
            assert!(*cur != b'%', "cannot allow unencoded %");
            arr[*cur as usize] = 1;
            bytes = rem;
        }
        Table {
            arr,
            allows_enc: false,
        }
    }

    /// Marks this table as allowing percent-encoded octets.
    pub const fn enc(mut self) -> Table {
        self.allows_enc = true;
        self
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// either by `self` or by `other`.
    pub const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.arr[i] |= other.arr[i];
            i += 1;
        }
        self.allows_enc |= other.allows_enc;
        self
    }

    /// Returns `true` if the given unencoded byte is allowed by the table.
    #[inline]
    pub const fn allows(&self, x: u8) -> bool {
        self.arr[x as usize] != 0
    }

    /// Returns `true` if percent-encoded octets are allowed by the table.
    #[inline]
    pub const fn allows_enc(&self) -> bool {
        self.allows_enc
    }

    /// Validates the given byte sequence with the table.
    ///
    /// Returns `true` if the encoder would leave the bytes unchanged.
    pub const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if x == b'%' && self.allows_enc {
                if !is_octet(s, i) {
                    return false;
                }
                i += 3;
            } else {
                if !self.allows(x) {
                    return false;
                }
                i += 1;
            }
        }
        true
    }

    /// Appends a byte to the buffer, encoding it if not allowed.
    #[inline]
    pub(crate) fn encode_byte(&self, x: u8, buf: &mut String) {
        if self.allows(x) {
            buf.push(x as char);
        } else {
            buf.push('%');
            buf.push(HEX_TABLE[x as usize * 2] as char);
            buf.push(HEX_TABLE[x as usize * 2 + 1] as char);
        }
    }
}

/// Returns `true` if a percent-encoded octet starts at index `i`.
#[inline]
pub(crate) const fn is_octet(s: &[u8], i: usize) -> bool {
    i + 2 < s.len() && s[i] == b'%' && HEXDIG.allows(s[i + 1]) && HEXDIG.allows(s[i + 2])
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// ALPHA = A-Z / a-z
pub const ALPHA: &Table = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// DIGIT = 0-9
pub const DIGIT: &Table = &gen(b"0123456789");

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///                / "a" / "b" / "c" / "d" / "e" / "f"
pub const HEXDIG: &Table = &DIGIT.or(&gen(b"ABCDEFabcdef"));

/// base = ALPHA / DIGIT / pct-encoded
///      / "_" / "-" / "." / "~" / "+" / ";" / "," / "="
///      / "$" / "&" / ":" / "@" / "/" / "?"
///
/// Used for user, password, path segments and fragment.
pub const BASE: &Table = &ALPHA.or(DIGIT).or(&gen(b"_-.~+;,=$&:@/?")).enc();

/// extended = base / "!" / "'" / "(" / ")" / "*"
///
/// Used for query keys and values.
pub const EXTENDED: &Table = &BASE.or(&gen(b"!'()*"));

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub(crate) const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// Delimiters an `EStr` may be split on.
///
/// reserved = ":" / "/" / "?" / "#" / "[" / "]" / "@"
///          / "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
pub(crate) const RESERVED: &Table = &gen(b":/?#[]@!$&'()*+,;=");
