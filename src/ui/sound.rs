/// Sound cues for round and game events, synthesized with rodio.
///
/// Cues are rendered to in-memory WAV buffers once, when the engine is
/// created, and played on detached sinks so the prompt never waits.
///
/// Without the "sound" feature `SoundEngine` is a stub whose methods do
/// nothing.

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::TAU;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        correct: Arc<Vec<u8>>,
        wrong: Arc<Vec<u8>>,
        level_up: Arc<Vec<u8>>,
        win: Arc<Vec<u8>>,
        game_over: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        /// `None` when no output device is available.
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            Some(SoundEngine {
                _stream: stream,
                handle,
                correct: Arc::new(make_wav(&gen_correct())),
                wrong: Arc::new(make_wav(&gen_wrong())),
                level_up: Arc::new(make_wav(&gen_level_up())),
                win: Arc::new(make_wav(&gen_win())),
                game_over: Arc::new(make_wav(&gen_game_over())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            let Ok(sink) = Sink::try_new(&self.handle) else { return };
            let cursor = Cursor::new(buf.as_ref().clone());
            if let Ok(src) = rodio::Decoder::new(cursor) {
                sink.append(src);
                sink.detach();
            }
        }

        pub fn play_correct(&self) { self.play(&self.correct); }
        pub fn play_wrong(&self) { self.play(&self.wrong); }
        pub fn play_level_up(&self) { self.play(&self.level_up); }
        pub fn play_win(&self) { self.play(&self.win); }
        pub fn play_game_over(&self) { self.play(&self.game_over); }
    }

    // ════════════════════════════════════════════════════════════
    //  Cues — mono f32 samples
    // ════════════════════════════════════════════════════════════

    /// Consecutive notes of `(freq, seconds)`, each fading out linearly.
    /// `overtone` mixes in the 2nd harmonic for a brighter timbre.
    fn notes(seq: &[(f32, f32)], overtone: f32, volume: f32) -> Vec<f32> {
        let mut out = Vec::new();
        for &(freq, secs) in seq {
            let n = (SAMPLE_RATE as f32 * secs) as usize;
            out.extend((0..n).map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - i as f32 / n as f32;
                let wave = (t * freq * TAU).sin() * (1.0 - overtone)
                    + (t * freq * 2.0 * TAU).sin() * overtone;
                wave * env * volume
            }));
        }
        out
    }

    /// Two quick rising notes: E6, A6.
    fn gen_correct() -> Vec<f32> {
        notes(&[(1319.0, 0.05), (1760.0, 0.09)], 0.3, 0.25)
    }

    /// Low square-ish buzz.
    fn gen_wrong() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.18) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = (1.0 - i as f32 / n as f32).powf(0.5);
                (t * 140.0 * TAU).sin().signum() * env * 0.12
            })
            .collect()
    }

    /// Arpeggio C5 E5 G5.
    fn gen_level_up() -> Vec<f32> {
        notes(&[(523.0, 0.07), (659.0, 0.07), (784.0, 0.12)], 0.3, 0.3)
    }

    /// Fanfare ending on a held C6.
    fn gen_win() -> Vec<f32> {
        notes(
            &[(523.0, 0.1), (659.0, 0.1), (784.0, 0.1), (1047.0, 0.35)],
            0.35,
            0.3,
        )
    }

    /// Falling A4 F4 D4.
    fn gen_game_over() -> Vec<f32> {
        notes(&[(440.0, 0.14), (349.0, 0.14), (294.0, 0.3)], 0.1, 0.3)
    }

    // ════════════════════════════════════════════════════════════
    //  WAV container — 16-bit PCM mono
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        const CHANNELS: u16 = 1;
        const BITS: u16 = 16;
        let block_align = CHANNELS * BITS / 8;
        let byte_rate = SAMPLE_RATE * block_align as u32;
        let data_size = samples.len() as u32 * block_align as u32;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVEfmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&CHANNELS.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&BITS.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API — no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_correct(&self) {}
    pub fn play_wrong(&self) {}
    pub fn play_level_up(&self) {}
    pub fn play_win(&self) {}
    pub fn play_game_over(&self) {}
}
