#![no_main]

use argos_shield::scan_content;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

fuzz_target!(|data: &[u8]| {
    let whitelist: BTreeSet<String> = ["Metadata".to_string(), "Annots".to_string()].into();
    let _ = scan_content(data, &whitelist);
});
