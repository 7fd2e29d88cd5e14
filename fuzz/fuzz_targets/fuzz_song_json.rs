#![no_main]

use libfuzzer_sys::fuzz_target;
use pcmsynth_core::{NoteFrequencyTable, SongConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(song) = SongConfig::from_json(text) {
        let table = NoteFrequencyTable::new();
        let _ = song.melody(&table);
        let _ = song.to_json_pretty();
    }
});
