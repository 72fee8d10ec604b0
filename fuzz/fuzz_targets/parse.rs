#![no_main]
use libfuzzer_sys::fuzz_target;
use plain_uri::{Parts, Uri};

fuzz_target!(|data: &str| {
    let Ok(u) = Uri::parse(data) else {
        return;
    };

    let mut buf = String::with_capacity(data.len());
    if !u.scheme().is_empty() {
        buf.push_str(u.scheme());
        buf.push(':');
    }
    if u.has_authority() {
        buf.push_str("//");
        buf.push_str(&u.authority());
    } else if u.scheme() == "file" && !u.path().is_empty() {
        buf.push_str("//");
    }
    buf.push_str(u.path().as_str());
    if !u.query().is_empty() {
        buf.push('?');
        buf.push_str(u.query().as_str());
    }
    if !u.fragment().is_empty() {
        buf.push('#');
        buf.push_str(u.fragment().as_str());
    }
    assert_eq!(u.as_str(), buf);

    // Stored components are already filtered. A stored query may keep
    // a leading `?` that filtering would strip again.
    let parts = Parts {
        scheme: u.scheme(),
        user: u.user().as_str(),
        password: u.password().as_str(),
        host: u.host(),
        port: u.port().map(u32::from),
        path: u.path().as_str(),
        query: "",
        fragment: u.fragment().as_str(),
    };
    assert_eq!(Uri::from_parts(parts).unwrap(), u.with_query(""));
});
