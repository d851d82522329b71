#![no_main]
use libfuzzer_sys::fuzz_target;
use stockdbf::record::FieldIndex;

fuzz_target!(|input: (Vec<String>, String)| {
    let (names, probe) = input;
    if names.len() > 64 { return; }
    let index = FieldIndex::new(names.iter().cloned());
    for (i, name) in names.iter().enumerate() {
        let hit = index.resolve(name).expect("every field resolves by its own name");
        assert!(hit <= i);
    }
    if let Some(i) = index.resolve(&probe) {
        assert!(i < names.len());
    }
});
