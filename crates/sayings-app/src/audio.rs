//! Sound cues for placing and erasing stamps.

use sayings_core::SoundHandle;

#[cfg(feature = "audio")]
mod backend {
    use rodio::Source;
    use sayings_core::SoundHandle;
    use std::io::Cursor;
    use std::sync::Arc;

    /// Default output device, opened once.
    pub struct Output {
        // Dropping the stream stops playback.
        _stream: rodio::OutputStream,
        handle: rodio::OutputStreamHandle,
    }

    impl Output {
        pub fn open() -> Option<Self> {
            match rodio::OutputStream::try_default() {
                Ok((stream, handle)) => {
                    log::info!("Audio output opened");
                    Some(Self {
                        _stream: stream,
                        handle,
                    })
                }
                Err(e) => {
                    log::warn!("No audio output, sounds disabled: {}", e);
                    None
                }
            }
        }

        pub fn play(&self, sound: &SoundHandle) -> bool {
            let bytes: Arc<[u8]> = Arc::from(sound.bytes());
            let decoder = match rodio::Decoder::new(Cursor::new(bytes)) {
                Ok(decoder) => decoder,
                Err(e) => {
                    log::warn!("Cannot decode {}: {}", sound.path(), e);
                    return false;
                }
            };
            match self.handle.play_raw(decoder.convert_samples::<f32>()) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Cannot play {}: {}", sound.path(), e);
                    false
                }
            }
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use sayings_core::SoundHandle;

    /// Without the audio feature there is no device to open.
    pub struct Output;

    impl Output {
        pub fn open() -> Option<Self> {
            log::info!("Built without the audio feature, sounds disabled");
            None
        }

        pub fn play(&self, _sound: &SoundHandle) -> bool {
            false
        }
    }
}

/// Plays sound clips on the default output device, or stays silent when
/// there is none.
pub struct SoundPlayer {
    output: Option<backend::Output>,
}

impl SoundPlayer {
    /// Open the default output device.
    pub fn open() -> Self {
        Self {
            output: backend::Output::open(),
        }
    }

    /// A player that never makes a sound.
    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Start playing `sound` without waiting for it to finish. Returns true
    /// when the clip was handed to the device.
    pub fn play(&self, sound: &SoundHandle) -> bool {
        match &self.output {
            Some(output) => {
                log::debug!("Playing {}", sound.path());
                output.play(sound)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_player() {
        let player = SoundPlayer::silent();
        assert!(!player.is_enabled());
        assert!(!player.play(&SoundHandle::new("sounds/clink.wav", b"RIFF".to_vec())));
    }

    #[test]
    fn test_undecodable_clip_is_not_played() {
        // Whether or not a device exists, garbage bytes never reach it.
        let player = SoundPlayer::open();
        assert!(!player.play(&SoundHandle::new("sounds/lase.wav", vec![0; 16])));
    }
}
