use std::ffi::c_void;

use glow::HasContext;

use crate::{GlInfo, ViewRect};

pub struct GlPresenter {
    gl: glow::Context,
    info: GlInfo,
    clear_color: [f32; 4],
}

impl GlPresenter {
    /// Build the presenter over a live context. The loader must come from a
    /// window whose GL context is current on this thread.
    pub unsafe fn from_loader<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = unsafe { glow::Context::from_loader_function(|name| loader(name)) };
        let info = unsafe {
            GlInfo {
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
                version: gl.get_parameter_string(glow::VERSION),
            }
        };
        tracing::info!(
            vendor = %info.vendor,
            renderer = %info.renderer,
            version = %info.version,
            "GL context ready"
        );

        // Fixed state from the original GL setup, in core-profile terms.
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LEQUAL);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::FRONT);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        Self {
            gl,
            info,
            clear_color: [1.0, 0.0, 0.0, 0.0],
        }
    }

    pub fn info(&self) -> &GlInfo {
        &self.info
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    /// Track a window resize between frames. The viewport follows on the
    /// next `begin_frame`, but updating it now keeps late draws clipped
    /// correctly.
    pub fn resize(&mut self, width: u32, height: u32) {
        unsafe {
            self.gl
                .viewport(0, 0, width.max(1) as i32, height.max(1) as i32);
        }
    }

    /// Start a frame: set the viewport over the full window and clear.
    pub fn begin_frame(&mut self, width: u32, height: u32) -> ViewRect {
        let rect = ViewRect {
            x: 0,
            y: 0,
            width: width.max(1),
            height: height.max(1),
        };
        unsafe {
            self.gl
                .viewport(0, 0, rect.width as i32, rect.height as i32);
            let [r, g, b, a] = self.clear_color;
            self.gl.clear_color(r, g, b, a);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        rect
    }

    /// Finish a frame. The caller swaps buffers on the window afterwards.
    pub fn end_frame(&mut self) {
        unsafe {
            self.gl.flush();
        }
    }
}
