// Headless presenter with the same surface as the GL one.

use std::ffi::c_void;

use crate::{GlInfo, ViewRect};

#[derive(Debug)]
pub struct GlPresenter {
    info: GlInfo,
    clear_color: [f32; 4],
    frames: u64,
    last_viewport: Option<ViewRect>,
}

impl GlPresenter {
    /// Signature matches the GL backend; the loader is ignored.
    pub unsafe fn from_loader<F>(_loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        Self {
            info: GlInfo {
                vendor: "stub".to_string(),
                renderer: "stub".to_string(),
                version: "0.0".to_string(),
            },
            clear_color: [1.0, 0.0, 0.0, 0.0],
            frames: 0,
            last_viewport: None,
        }
    }

    pub fn info(&self) -> &GlInfo {
        &self.info
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.last_viewport = Some(ViewRect {
            x: 0,
            y: 0,
            width: width.max(1),
            height: height.max(1),
        });
    }

    pub fn begin_frame(&mut self, width: u32, height: u32) -> ViewRect {
        let rect = ViewRect {
            x: 0,
            y: 0,
            width: width.max(1),
            height: height.max(1),
        };
        self.last_viewport = Some(rect);
        rect
    }

    pub fn end_frame(&mut self) {
        self.frames += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn last_viewport(&self) -> Option<ViewRect> {
        self.last_viewport
    }
}
