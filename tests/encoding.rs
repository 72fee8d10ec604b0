use plain_uri::encoding::{encode, encode_to, table::*, EStr};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~%21@%E8%AF%95%23$%25st%5E&+=";

#[test]
fn enc_dec_validate() {
    let s = encode(RAW, BASE);
    assert_eq!(ENCODED, s);

    let mut buf = String::new();
    encode_to(RAW, BASE, &mut buf);
    assert_eq!(ENCODED, buf);

    assert!(BASE.validate(s.as_bytes()));
    assert!(!BASE.validate(RAW.as_bytes()));

    let dec = EStr::new(&s).unwrap().decode();
    assert!(dec.decoded_any());
    assert_eq!(dec.as_bytes(), RAW.as_bytes());
    assert_eq!(dec.into_string().unwrap(), RAW);

    let dec = EStr::new("%2D%E6%B5").unwrap().decode();
    assert_eq!(dec.as_bytes(), b"\x2d\xe6\xb5");
    assert!(dec.clone().into_string().is_err());
    assert_eq!(dec.into_string_lossy(), "-\u{FFFD}");

    assert!(EStr::new("%2d%").is_none());
    assert!(EStr::new("%2d%fg").is_none());
    assert!(EStr::new("%2d%ff").is_some());

    let dec = EStr::new("plain").unwrap().decode();
    assert!(!dec.decoded_any());
    assert_eq!(dec.into_bytes(), &b"plain"[..]);
}

#[test]
fn encode_is_idempotent() {
    for s in [RAW, "", "%", "%%", "%2", "%zz", "100%25", "a%2fb", "§ ü", "\0\x7f"] {
        for table in [BASE, EXTENDED] {
            let once = encode(s, table);
            let twice = encode(&once, table);
            assert_eq!(once, twice, "{s:?}");
            assert!(table.validate(once.as_bytes()), "{s:?}");
            assert!(EStr::new(&once).is_some(), "{s:?}");
        }
    }
}

#[test]
fn encode_keeps_existing_octets() {
    assert_eq!(encode("a%2fb", BASE), "a%2fb");
    assert_eq!(encode("%", BASE), "%25");
    assert_eq!(encode("%2", BASE), "%252");
    assert_eq!(encode("%%41", BASE), "%25%41");
    assert_eq!(encode("#", BASE), "%23");
    assert_eq!(encode("a b", BASE), "a%20b");
}

#[test]
fn tables() {
    for x in b"_-.~+;,=$&:@/?" {
        assert!(BASE.allows(*x));
    }
    for x in b"!'()*" {
        assert!(!BASE.allows(*x));
        assert!(EXTENDED.allows(*x));
    }
    for x in b"#[]% \"<>\\^`{|}" {
        assert!(!BASE.allows(*x));
        assert!(!EXTENDED.allows(*x));
    }
    assert!(BASE.allows_enc() && EXTENDED.allows_enc());
    assert!(!ALPHA.allows_enc());

    let custom = Table::gen(b"ab").enc();
    assert_eq!(encode("abc%41", &custom), "ab%63%41");
    assert_eq!(encode("abc%41", &Table::gen(b"ab").or(DIGIT)), "ab%63%2541");
    assert!(!Table::gen(b"ab").or(DIGIT).validate(b"%41"));
}

#[test]
fn split() {
    let s = EStr::new("id=3&name=%E5%BC%A0%E4%B8%89").unwrap();
    let mut split = s.split('&');

    let it = split.next().unwrap();
    assert_eq!(it, "id=3");
    assert_eq!(it.decode().as_bytes(), b"id=3");
    assert_eq!(it.decode().into_string().as_deref(), Ok("id=3"));

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k, "id");
    assert_eq!(v, "3");

    let it = split.next().unwrap();
    assert_eq!(it, "name=%E5%BC%A0%E4%B8%89");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k, "name");
    assert_eq!(v, "%E5%BC%A0%E4%B8%89");
    assert_eq!(v.decode().as_bytes(), "张三".as_bytes());
    assert_eq!(v.decode().into_string().unwrap(), "张三");

    assert!(split.next().is_none());
    assert!(split.next().is_none());

    let s = EStr::new("a/b//c").unwrap();
    assert!(s.split('/').eq(["a", "b", "", "c"]));
    assert!(s.split('/').rev().eq(["c", "", "b", "a"]));

    let mut split = s.split('/');
    assert_eq!(split.next().unwrap(), "a");
    assert_eq!(split.next_back().unwrap(), "c");
    assert!(split.eq(["b", ""]));

    assert!(EStr::EMPTY.split('&').eq([""]));
}

#[test]
#[should_panic]
fn split_with_unreserved_delimiter() {
    let _ = EStr::new("a-b").unwrap().split('-');
}
