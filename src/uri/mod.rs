mod fmt;

#[cfg(test)]
mod tests;

use crate::{
    encoding::EStr,
    filter,
    parser::{DefaultParser, Parser},
    render::{DefaultRenderer, Renderer},
    Result,
};
use std::{borrow::Cow, hash, str::FromStr, sync::OnceLock};

/// Raw URI components, as supplied to [`Uri::from_parts`].
///
/// Every field is passed through its filter on construction, so the values
/// may be raw or already percent-encoded.
///
/// # Examples
///
/// ```
/// use plain_uri::{Parts, Uri};
///
/// let uri = Uri::from_parts(Parts {
///     scheme: "HTTP",
///     host: "Example.COM",
///     port: Some(8080),
///     path: "/a b",
///     ..Parts::EMPTY
/// })?;
/// assert_eq!(uri.as_str(), "http://example.com:8080/a%20b");
/// # Ok::<_, plain_uri::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Parts<'a> {
    /// The scheme, with or without a trailing `:`.
    pub scheme: &'a str,
    /// The user.
    pub user: &'a str,
    /// The password, dropped if the user is empty.
    pub password: &'a str,
    /// The host.
    pub host: &'a str,
    /// The port, where `0` means absent.
    pub port: Option<u32>,
    /// The path, which must not contain `?` or `#`.
    pub path: &'a str,
    /// The query, with or without a leading `?`.
    pub query: &'a str,
    /// The fragment, with or without a leading `#`.
    pub fragment: &'a str,
}

impl Parts<'_> {
    /// Parts with every string empty and no port.
    pub const EMPTY: Parts<'static> = Parts {
        scheme: "",
        user: "",
        password: "",
        host: "",
        port: None,
        path: "",
        query: "",
        fragment: "",
    };
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct Data {
    scheme: String,
    user: String,
    password: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: String,
    fragment: String,
}

/// An immutable [URI reference] with normalized, percent-encoded components.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// Every component is validated and normalized when it is set, and stored in
/// its percent-encoded form. Methods named `with_*` never modify a `Uri`:
/// they return a new one with a single component replaced.
///
/// The canonical string form is computed on first use and cached
/// per instance. Clones start with an empty cache.
///
/// # Examples
///
/// ```
/// use plain_uri::Uri;
///
/// let base = Uri::parse("http://test.com")?;
/// let uri = base
///     .with_path("/some path")?
///     .with_query("val1=key1")
///     .with_fragment("#some-fragment");
///
/// assert_eq!(uri.as_str(), "http://test.com/some%20path?val1=key1#some-fragment");
/// assert_eq!(base.as_str(), "http://test.com");
/// # Ok::<_, plain_uri::Error>(())
/// ```
pub struct Uri {
    data: Data,
    rendered: OnceLock<String>,
}

impl Uri {
    /// Creates a `Uri` from raw components.
    ///
    /// The password is dropped if the filtered user is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is out of range or
    /// if the path contains a `?` or `#`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scheme: &str,
        user: &str,
        password: &str,
        host: &str,
        port: Option<u32>,
        path: &str,
        query: &str,
        fragment: &str,
    ) -> Result<Uri> {
        Uri::from_parts(Parts {
            scheme,
            user,
            password,
            host,
            port,
            path,
            query,
            fragment,
        })
    }

    /// Creates a `Uri` from a set of raw components.
    ///
    /// See [`Uri::new`] for details.
    pub fn from_parts(parts: Parts<'_>) -> Result<Uri> {
        let user = filter::user(parts.user);
        let password = if user.is_empty() {
            String::new()
        } else {
            filter::password(parts.password)
        };

        Ok(Uri::from_data(Data {
            scheme: filter::scheme(parts.scheme),
            user,
            password,
            host: filter::host(parts.host),
            port: filter::port(parts.port)?,
            path: filter::path(parts.path)?,
            query: filter::query(parts.query),
            fragment: filter::fragment(parts.fragment),
        }))
    }

    /// Parses a URI reference with the [`DefaultParser`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be decomposed into components
    /// or if a component fails validation.
    pub fn parse(s: &str) -> Result<Uri> {
        DefaultParser.parse(s)
    }

    fn from_data(data: Data) -> Uri {
        Uri {
            data,
            rendered: OnceLock::new(),
        }
    }

    fn with(&self, f: impl FnOnce(&mut Data)) -> Uri {
        let mut data = self.data.clone();
        f(&mut data);
        Uri::from_data(data)
    }

    /// Returns the scheme, in lowercase and without a trailing `:`.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.data.scheme
    }

    /// Returns a copy of this `Uri` with the scheme replaced.
    ///
    /// ```
    /// use plain_uri::Uri;
    ///
    /// assert_eq!(Uri::default().with_scheme("HTTP:").scheme(), "http");
    /// ```
    #[must_use]
    pub fn with_scheme(&self, scheme: &str) -> Uri {
        let scheme = filter::scheme(scheme);
        self.with(|data| data.scheme = scheme)
    }

    /// Returns the user.
    #[inline]
    pub fn user(&self) -> &EStr {
        EStr::new_validated(&self.data.user)
    }

    /// Returns the password, which is always empty if the user is.
    #[inline]
    pub fn password(&self) -> &EStr {
        EStr::new_validated(&self.data.password)
    }

    /// Returns the [userinfo] subcomponent: the user, followed by
    /// a `:` and the password if the password is not empty.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2.1
    pub fn userinfo(&self) -> Cow<'_, str> {
        if self.data.password.is_empty() {
            Cow::Borrowed(&self.data.user)
        } else {
            Cow::Owned(format!("{}:{}", self.data.user, self.data.password))
        }
    }

    /// Returns a copy of this `Uri` with the user information replaced.
    ///
    /// Both the user and the password are cleared if the user is empty
    /// after filtering, even if a password is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use plain_uri::Uri;
    ///
    /// let uri = Uri::parse("//host")?.with_userinfo("some#user", Some("some#pass"));
    /// assert_eq!(uri.authority(), "some%23user:some%23pass@host");
    ///
    /// let uri = uri.with_userinfo("", Some("secret"));
    /// assert_eq!(uri.userinfo(), "");
    /// # Ok::<_, plain_uri::Error>(())
    /// ```
    #[must_use]
    pub fn with_userinfo(&self, user: &str, password: Option<&str>) -> Uri {
        let user = filter::user(user);
        let password = password.map(filter::password).unwrap_or_default();

        self.with(|data| {
            if user.is_empty() {
                data.user.clear();
                data.password.clear();
            } else {
                data.user = user;
                data.password = password;
            }
        })
    }

    /// Returns the host, in lowercase.
    #[inline]
    pub fn host(&self) -> &str {
        &self.data.host
    }

    /// Returns a copy of this `Uri` with the host replaced.
    #[must_use]
    pub fn with_host(&self, host: &str) -> Uri {
        let host = filter::host(host);
        self.with(|data| data.host = host)
    }

    /// Returns the port, if any.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.data.port
    }

    /// Returns a copy of this `Uri` with the port replaced.
    ///
    /// A port of `0` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is greater than 65535.
    pub fn with_port(&self, port: Option<u32>) -> Result<Uri> {
        let port = filter::port(port)?;
        Ok(self.with(|data| data.port = port))
    }

    /// Returns the [authority] component: the host, preceded by the user
    /// information and an `@` if present, and followed by a `:` and the
    /// port if present.
    ///
    /// Returns an empty string if the host is empty.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2
    pub fn authority(&self) -> Cow<'_, str> {
        let data = &self.data;
        if data.host.is_empty() {
            return Cow::Borrowed("");
        }
        if data.user.is_empty() && data.port.is_none() {
            return Cow::Borrowed(&data.host);
        }

        let mut buf = String::new();
        DefaultRenderer::push_authority(self, &data.password, &mut buf);
        Cow::Owned(buf)
    }

    /// Returns `true` if the `Uri` has a non-empty authority, i.e., a host.
    #[inline]
    pub fn has_authority(&self) -> bool {
        !self.data.host.is_empty()
    }

    /// Returns `true` if the `Uri` has no scheme.
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.data.scheme.is_empty()
    }

    /// Returns the path.
    #[inline]
    pub fn path(&self) -> &EStr {
        EStr::new_validated(&self.data.path)
    }

    /// Returns a copy of this `Uri` with the path replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the path contains a `?` or `#`.
    pub fn with_path(&self, path: &str) -> Result<Uri> {
        let path = filter::path(path)?;
        Ok(self.with(|data| data.path = path))
    }

    /// Returns the query, without the leading `?`.
    #[inline]
    pub fn query(&self) -> &EStr {
        EStr::new_validated(&self.data.query)
    }

    /// Returns a copy of this `Uri` with the query replaced.
    #[must_use]
    pub fn with_query(&self, query: &str) -> Uri {
        let query = filter::query(query);
        self.with(|data| data.query = query)
    }

    /// Returns the fragment, without the leading `#`.
    #[inline]
    pub fn fragment(&self) -> &EStr {
        EStr::new_validated(&self.data.fragment)
    }

    /// Returns a copy of this `Uri` with the fragment replaced.
    #[must_use]
    pub fn with_fragment(&self, fragment: &str) -> Uri {
        let fragment = filter::fragment(fragment);
        self.with(|data| data.fragment = fragment)
    }

    /// Returns the canonical string form of the `Uri`.
    pub fn as_str(&self) -> &str {
        self.rendered.get_or_init(|| DefaultRenderer.render(self))
    }

    /// Consumes this `Uri` and yields its canonical string form.
    pub fn into_string(self) -> String {
        match self.rendered.into_inner() {
            Some(s) => s,
            None => DefaultRenderer.render(&Uri::from_data(self.data)),
        }
    }

    /// Renders the `Uri` with the given renderer.
    ///
    /// ```
    /// use plain_uri::Uri;
    ///
    /// let uri = Uri::parse("https://google.com")?;
    /// let s = uri.render_with(&|uri: &Uri| format!("Let's go to {}!", uri.host()));
    /// assert_eq!(s, "Let's go to google.com!");
    /// # Ok::<_, plain_uri::Error>(())
    /// ```
    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &R) -> String {
        renderer.render(self)
    }
}

impl Clone for Uri {
    /// Clones the components, leaving the cached string behind.
    fn clone(&self) -> Self {
        Uri::from_data(self.data.clone())
    }
}

impl Default for Uri {
    /// Creates an empty `Uri`.
    fn default() -> Self {
        Uri::from_data(Data::default())
    }
}

impl PartialEq for Uri {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Uri {}

impl hash::Hash for Uri {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl FromStr for Uri {
    type Err = crate::Error;

    /// Equivalent to [`Uri::parse`].
    #[inline]
    fn from_str(s: &str) -> Result<Uri> {
        Uri::parse(s)
    }
}
