#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! An immutable generic URI value type following [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! A [`Uri`] holds a scheme, user, password, host, port, path, query and
//! fragment. Each component is validated and normalized whenever it is set:
//! schemes and hosts are lowercased, and textual components are
//! [percent-encoded] in a way that never double-encodes, so raw and
//! pre-encoded input give the same value.
//!
//! [percent-encoded]: encoding
//!
//! ```
//! use plain_uri::Uri;
//!
//! let uri = Uri::parse("HTTP://Test.com")?
//!     .with_path("/sub§path")?
//!     .with_query("ke#y1=val1&key%232=val2")
//!     .with_fragment("f");
//!
//! assert_eq!(uri.scheme(), "http");
//! assert_eq!(uri.host(), "test.com");
//! assert_eq!(uri.as_str(), "http://test.com/sub%C2%A7path?ke%23y1=val1&key%232=val2#f");
//! # Ok::<_, plain_uri::Error>(())
//! ```
//!
//! Parsing and rendering go through the [`Parser`] and [`Renderer`] traits,
//! so other strategies, including plain closures, can be swapped in.
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: Enables serialization of [`Uri`] as its canonical string.
//!
//! - `log`: Enables diagnostics through the [`log`] facade.
//!
//! [`log`]: https://docs.rs/log

pub mod encoding;
pub mod filter;
pub mod parser;
pub mod render;

mod error;
mod log;
mod uri;

pub use error::{Component, Error, ErrorKind};
pub use parser::{DefaultParser, Parser};
pub use render::{DefaultRenderer, Renderer};
pub use uri::{Parts, Uri};

type Result<T, E = Error> = core::result::Result<T, E>;
