#![cfg(feature = "serde")]

use plain_uri::Uri;

#[test]
fn serialize() {
    let uri = Uri::parse("HTTP://Example.com/a b?q=1#f").unwrap();
    assert_eq!(
        serde_json::to_string(&uri).unwrap(),
        r#""http://example.com/a%20b?q=1#f""#
    );
}

#[test]
fn deserialize() {
    let uri: Uri = serde_json::from_str(r#""ftp://u:p@host.com/test""#).unwrap();
    assert_eq!(uri.user(), "u");
    assert_eq!(uri.host(), "host.com");

    let uris: Vec<Uri> = serde_json::from_str(r#"["/a", "//b:1"]"#).unwrap();
    assert_eq!(uris[1].port(), Some(1));

    let e = serde_json::from_str::<Uri>(r#"":""#).unwrap_err();
    assert!(e.to_string().contains("URI is malformed at index 0"));

    assert!(serde_json::from_str::<Uri>(r#""//h:70000""#).is_err());
    assert!(serde_json::from_str::<Uri>("1").is_err());
}
