use core::fmt;

/// A URI component, named in errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// The scheme component.
    Scheme,
    /// The user subcomponent of user information.
    User,
    /// The password subcomponent of user information.
    Password,
    /// The host subcomponent of authority.
    Host,
    /// The port subcomponent of authority.
    Port,
    /// The path component.
    Path,
    /// The query component.
    Query,
    /// The fragment component.
    Fragment,
    /// The URI as a whole, when it cannot be decomposed.
    Uri,
}

impl Component {
    /// Returns the name of the component.
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::User => "user",
            Component::Password => "password",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
            Component::Uri => "URI",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed cause of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A port that is neither absent, zero, nor within `1..=65535`.
    PortOutOfRange,
    /// A `?` or `#` in a path, which belongs to the query or fragment instead.
    ///
    /// The error index points to the delimiter.
    PathDelimiter,
    /// Input that cannot be decomposed into URI components.
    ///
    /// The error index points to the offending character.
    Malformed,
}

/// An error occurred when constructing, modifying or parsing a [`Uri`].
///
/// Every error is a problem with the input that the caller can correct.
///
/// [`Uri`]: crate::Uri
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Error {
    component: Component,
    kind: ErrorKind,
    index: Option<usize>,
}

impl Error {
    pub(crate) fn new(component: Component, kind: ErrorKind) -> Error {
        Error {
            component,
            kind,
            index: None,
        }
    }

    pub(crate) fn malformed(index: usize) -> Error {
        Error::new(Component::Uri, ErrorKind::Malformed).at(index)
    }

    pub(crate) fn at(mut self, index: usize) -> Error {
        self.index = Some(index);
        self
    }

    /// Returns the component that failed validation.
    #[inline]
    pub fn component(&self) -> Component {
        self.component
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the index in the input where the error occurred, if any.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::PortOutOfRange => "must be a valid TCP/UDP port between 1 and 65535",
            ErrorKind::PathDelimiter => "must not contain a query or fragment",
            ErrorKind::Malformed => "is malformed",
        };
        write!(f, "{} {}", self.component, msg)?;
        if let Some(index) = self.index {
            write!(f, " at index {index}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
