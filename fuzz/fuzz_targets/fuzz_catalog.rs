#![no_main]

//! Catalog parser fuzzer.
//!
//! Arbitrary bytes must either be rejected with an error or produce a
//! catalog that is non-empty, has only named cities with in-range
//! positions, and survives a serialize/parse cycle.

use geoquiz::Catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = Catalog::from_json_str(json) else {
        return;
    };

    assert!(!catalog.is_empty());
    for city in catalog.cities() {
        assert!(!city.name.trim().is_empty());
        assert!(city.position.validate().is_ok());
    }

    let reparsed = catalog
        .to_json_string()
        .and_then(|s| Catalog::from_json_str(&s))
        .unwrap_or_else(|e| panic!("valid catalog failed to reparse: {e}"));
    assert_eq!(reparsed, catalog);
});
