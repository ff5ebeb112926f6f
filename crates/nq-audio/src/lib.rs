// Raw audio output in the engine's DMA style: one device, one ring of 16-bit
// samples allocated from the hunk, and a position the mixer chases.

use nq_common::{HunkBlock, HunkError};
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Device buffer size in frames.
    pub buffer_samples: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            buffer_samples: 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoDevice,
    #[error(transparent)]
    Hunk(#[from] HunkError),
    #[cfg(feature = "cpal")]
    #[error("could not build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[cfg(feature = "cpal")]
    #[error("could not start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// The negotiated device state the engine mixer reads, one field per member
/// of the original `dma_t`.
#[derive(Debug, Clone, Copy)]
pub struct DmaBuffer {
    pub sample_bits: u32,
    pub speed: u32,
    pub channels: u16,
    /// Total mono samples in the ring: device frames times channels.
    pub samples: u32,
    pub submission_chunk: u32,
    /// Backing storage allocated from the hunk under the name "sndbuf".
    pub block: HunkBlock,
}

impl DmaBuffer {
    pub fn bytes(&self) -> usize {
        self.samples as usize * (self.sample_bits as usize / 8)
    }
}

#[cfg(feature = "cpal")]
mod cpal_backend;
#[cfg(feature = "cpal")]
pub use cpal_backend::AudioOutput;

#[cfg(not(feature = "cpal"))]
mod stub;
#[cfg(not(feature = "cpal"))]
pub use stub::AudioOutput;

#[cfg(all(test, not(feature = "cpal")))]
mod tests {
    use super::*;
    use nq_common::Hunk;

    #[test]
    fn sizes_ring_from_config() {
        let mut hunk = Hunk::new(1024 * 1024);
        let audio = AudioOutput::open(AudioConfig::default(), &mut hunk).unwrap();
        let dma = audio.dma();
        assert_eq!(dma.samples, 1024 * 2);
        assert_eq!(dma.sample_bits, 16);
        assert_eq!(dma.bytes(), 1024 * 2 * 2);
        assert_eq!(hunk.block(dma.block).len(), dma.bytes());
        assert_eq!(hunk.name_of(dma.block), Some("sndbuf"));
    }

    #[test]
    fn dma_position_wraps() {
        let mut hunk = Hunk::new(1024 * 1024);
        let mut audio = AudioOutput::open(AudioConfig::default(), &mut hunk).unwrap();
        let total = audio.dma().samples;
        audio.advance_frames(total / 2 + 10);
        assert_eq!(audio.dma_pos(), (total + 20) % total);
    }

    #[test]
    fn shutdown_stops_the_device() {
        let mut hunk = Hunk::new(1024 * 1024);
        let mut audio = AudioOutput::open(AudioConfig::default(), &mut hunk).unwrap();
        assert!(audio.is_running());
        audio.shutdown();
        assert!(!audio.is_running());
    }

    #[test]
    fn open_fails_when_hunk_is_exhausted() {
        let mut hunk = Hunk::new(16);
        assert!(matches!(
            AudioOutput::open(AudioConfig::default(), &mut hunk),
            Err(AudioError::Hunk(_))
        ));
    }
}
