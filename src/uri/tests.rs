use super::*;

#[test]
fn caches_rendering() {
    let uri = Uri::parse("http://test.com/some-path").unwrap();
    assert!(uri.rendered.get().is_none());

    let first = uri.as_str();
    assert_eq!(first, "http://test.com/some-path");
    assert!(core::ptr::eq(first, uri.as_str()));
}

#[test]
fn copies_start_with_empty_cache() {
    let uri = Uri::parse("http://test.com/some-path").unwrap();
    let _ = uri.as_str();

    let cloned = uri.clone();
    assert!(cloned.rendered.get().is_none());
    assert_eq!(cloned, uri);

    let changed = uri.with_host("other.host");
    assert!(changed.rendered.get().is_none());
    assert_eq!(changed.as_str(), "http://other.host/some-path");
    assert_eq!(uri.as_str(), "http://test.com/some-path");
}

#[test]
fn equality_ignores_cache() {
    let a = Uri::parse("//host/p").unwrap();
    let b = Uri::parse("//HOST/p").unwrap();
    let _ = a.as_str();
    assert_eq!(a, b);
    assert_ne!(a, b.with_fragment("f"));
}

#[test]
fn into_string_reuses_cache() {
    let uri = Uri::parse("ftp://u:p@host.com/test").unwrap();
    assert_eq!(uri.clone().into_string(), "ftp://u:p@host.com/test");

    let _ = uri.as_str();
    assert_eq!(uri.into_string(), "ftp://u:p@host.com/test");
}

#[test]
fn password_requires_user() {
    let uri = Uri::new("", "", "secret", "host", None, "", "", "").unwrap();
    assert_eq!(uri.data.password, "");
    assert_eq!(uri.authority(), "host");
}

#[test]
fn is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Uri>();
}
