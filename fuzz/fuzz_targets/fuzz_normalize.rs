#![no_main]
use libfuzzer_sys::fuzz_target;
use stockdbf::normalize::{format_price, parse_boolish, parse_number, slugify};
use stockdbf::record::Value;

fuzz_target!(|data: &str| {
    if data.len() > 4096 { return; }
    let v = Value::from(data);
    if let Some(n) = parse_number(&v) {
        assert!(n.is_finite());
        let _ = format_price(Some(n));
    }
    let _ = parse_boolish(Some(&v));
    let slug = slugify(data);
    assert_eq!(slugify(&slug), slug);
});
