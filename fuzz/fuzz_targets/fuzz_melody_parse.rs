#![no_main]

use libfuzzer_sys::fuzz_target;
use pcmsynth_core::{MelodyParser, NoteFrequencyTable};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let table = NoteFrequencyTable::new();

    for strict in [false, true] {
        if let Ok(events) = MelodyParser::new(&table).strict(strict).parse(text, 120.0) {
            for event in events {
                assert!(event.duration_ms.is_finite());
                assert!(event.duration_ms >= 0.0);
                assert!(event.frequency_hz >= 0.0);
            }
        }
    }
});
