// Headless audio backend: no device, but the DMA ring is sized and placed
// exactly like the real one so callers and tests see the same shape.

use nq_common::Hunk;

use crate::{AudioConfig, AudioError, DmaBuffer};

#[derive(Debug)]
pub struct AudioOutput {
    dma: DmaBuffer,
    pos: u32,
    running: bool,
}

impl AudioOutput {
    pub fn open(config: AudioConfig, hunk: &mut Hunk) -> Result<Self, AudioError> {
        let samples = config.buffer_samples * u32::from(config.channels);
        let block = hunk.alloc_named(samples as usize * 2, "sndbuf")?;
        Ok(Self {
            dma: DmaBuffer {
                sample_bits: 16,
                speed: config.sample_rate,
                channels: config.channels,
                samples,
                submission_chunk: 1,
                block,
            },
            pos: 0,
            running: true,
        })
    }

    pub fn dma(&self) -> &DmaBuffer {
        &self.dma
    }

    pub fn dma_pos(&self) -> u32 {
        self.pos
    }

    /// Test hook: pretend the device consumed `frames` frames.
    pub fn advance_frames(&mut self, frames: u32) {
        let advanced = frames * u32::from(self.dma.channels);
        self.pos = (self.pos + advanced) % self.dma.samples;
    }

    pub fn submit(&mut self) {}

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shutdown(&mut self) {
        self.running = false;
    }
}
