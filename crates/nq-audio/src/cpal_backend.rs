use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use nq_common::Hunk;

use crate::{AudioConfig, AudioError, DmaBuffer};

pub struct AudioOutput {
    dma: DmaBuffer,
    pos: Arc<AtomicU32>,
    stream: Option<cpal::Stream>,
}

impl AudioOutput {
    pub fn open(config: AudioConfig, hunk: &mut Hunk) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        if let Ok(name) = device.name() {
            tracing::info!(device = %name, rate = config.sample_rate, "opening audio output");
        }

        let samples = config.buffer_samples * u32::from(config.channels);
        let block = hunk.alloc_named(samples as usize * 2, "sndbuf")?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(config.buffer_samples),
        };

        let pos = Arc::new(AtomicU32::new(0));
        let callback_pos = Arc::clone(&pos);
        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                // The mixer writes into the hunk ring; the device side only
                // advances the DMA clock. Output silence until submission
                // is wired through.
                data.fill(0);
                let advanced = data.len() as u32 % samples;
                let _ = callback_pos.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |p| {
                    Some((p + advanced) % samples)
                });
            },
            |err| tracing::warn!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            dma: DmaBuffer {
                sample_bits: 16,
                speed: config.sample_rate,
                channels: config.channels,
                samples,
                submission_chunk: 1,
                block,
            },
            pos,
            stream: Some(stream),
        })
    }

    pub fn dma(&self) -> &DmaBuffer {
        &self.dma
    }

    pub fn dma_pos(&self) -> u32 {
        self.pos.load(Ordering::Relaxed)
    }

    pub fn submit(&mut self) {}

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    pub fn shutdown(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.pause();
        }
    }
}
