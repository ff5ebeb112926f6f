use std::ffi::c_void;

use crate::{WindowConfig, WindowError, WindowEvent};

#[derive(Debug)]
pub struct GlfwWindow {
    config: WindowConfig,
    open: bool,
    pending_events: Vec<WindowEvent>,
    relative: bool,
    cursor_visible: bool,
    swaps: u64,
}

impl GlfwWindow {
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        Ok(Self {
            config,
            open: true,
            pending_events: Vec::new(),
            relative: false,
            cursor_visible: true,
            swaps: 0,
        })
    }

    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        for event in &self.pending_events {
            if let WindowEvent::Resized(width, height) = *event {
                self.config.width = width;
                self.config.height = height;
            }
        }
        std::mem::take(&mut self.pending_events)
    }

    pub fn push_event(&mut self, event: WindowEvent) {
        self.pending_events.push(event);
    }

    pub fn should_close(&self) -> bool {
        !self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn set_relative_mouse(&mut self, relative: bool) {
        self.relative = relative;
        self.cursor_visible = !relative;
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    pub fn relative_mouse(&self) -> bool {
        self.relative && !self.cursor_visible
    }

    pub fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    pub fn swap_count(&self) -> u64 {
        self.swaps
    }

    pub fn get_proc_address(&mut self, _symbol: &str) -> *const c_void {
        std::ptr::null()
    }
}
