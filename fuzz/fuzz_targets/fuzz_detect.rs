#![no_main]

use libfuzzer_sys::fuzz_target;
use mawarith::detector::detect;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // detect() must never panic on arbitrary Arabic (or non-Arabic) input.
        let (_, heirs) = detect(s);

        // Every emitted heir's sex must stay the pure function of its kind.
        for h in &heirs {
            assert_eq!(h.sex, h.kind.sex());
        }
    }
});
