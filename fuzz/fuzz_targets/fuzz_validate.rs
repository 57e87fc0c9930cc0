#![no_main]

use argos_shield::{FileType, ValidationOptions, validate_as};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = ValidationOptions::default();
    for file_type in FileType::ALL {
        let verdict = validate_as(data, file_type, &options);
        assert!(verdict.passed || verdict.stage.is_some());
    }
});
