#![no_main]
use libfuzzer_sys::fuzz_target;
use plain_uri::encoding::{encode, table::*, EStr};

fuzz_target!(|data: &str| {
    for table in [BASE, EXTENDED] {
        let once = encode(data, table);
        assert_eq!(encode(&once, table), once);
        assert!(table.validate(once.as_bytes()));

        let s = EStr::new(&once).expect("encoded output must be valid");
        // Text without `%` is restored exactly.
        if !data.contains('%') {
            assert_eq!(s.decode().into_string().unwrap(), data);
        }
    }
});
