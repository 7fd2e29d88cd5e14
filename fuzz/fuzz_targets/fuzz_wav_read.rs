#![no_main]

use libfuzzer_sys::fuzz_target;
use pcmsynth_core::wav::read_wav;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = read_wav(data) {
        assert!(decoded.data.len() <= data.len());
        let mono = decoded.to_pcm8_mono();
        assert_eq!(mono.len(), decoded.num_frames());
    }
});
