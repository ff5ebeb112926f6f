use std::ffi::c_void;
use std::sync::mpsc::Receiver;

use glfw::Context as _;
use nq_common::Key;

use crate::{Action, WindowConfig, WindowError, WindowEvent};

pub struct GlfwWindow {
    config: WindowConfig,
    glfw: glfw::Glfw,
    window: glfw::Window,
    events: Receiver<(f64, glfw::WindowEvent)>,
    pending_events: Vec<WindowEvent>,
    last_cursor: Option<(f64, f64)>,
    relative: bool,
    cursor_visible: bool,
}

impl GlfwWindow {
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS).map_err(|_| WindowError::Init)?;
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::DoubleBuffer(true));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreateWindow)?;
        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);
        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        tracing::info!(
            width = config.width,
            height = config.height,
            "created GL window"
        );

        Ok(Self {
            config,
            glfw,
            window,
            events,
            pending_events: Vec::new(),
            last_cursor: None,
            relative: false,
            cursor_visible: true,
        })
    }

    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            let mapped = match event {
                glfw::WindowEvent::CursorPos(x, y) => {
                    let delta = match self.last_cursor {
                        Some((lx, ly)) => (x - lx, y - ly),
                        None => (0.0, 0.0),
                    };
                    self.last_cursor = Some((x, y));
                    if delta == (0.0, 0.0) {
                        None
                    } else {
                        Some(WindowEvent::MouseMotion {
                            dx: delta.0 as f32,
                            dy: delta.1 as f32,
                        })
                    }
                }
                other => map_event(other),
            };
            if let Some(mapped) = mapped {
                if let WindowEvent::Resized(width, height) = mapped {
                    self.config.width = width;
                    self.config.height = height;
                }
                self.pending_events.push(mapped);
            }
        }
        std::mem::take(&mut self.pending_events)
    }

    pub fn push_event(&mut self, event: WindowEvent) {
        if let WindowEvent::Resized(width, height) = event {
            self.config.width = width;
            self.config.height = height;
        }
        self.pending_events.push(event);
    }

    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    pub fn close(&mut self) {
        self.window.set_should_close(true);
    }

    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(1) as u32, height.max(1) as u32)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.window.set_title(&title);
        self.config.title = title;
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Capture the mouse for relative motion, or release it.
    pub fn set_relative_mouse(&mut self, relative: bool) {
        self.relative = relative;
        self.cursor_visible = !relative;
        self.last_cursor = None;
        self.apply_cursor_mode();
    }

    /// Show the cursor without dropping the capture request; used while the
    /// game is paused.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.apply_cursor_mode();
    }

    pub fn relative_mouse(&self) -> bool {
        self.relative && !self.cursor_visible
    }

    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    pub fn get_proc_address(&mut self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }

    fn apply_cursor_mode(&mut self) {
        let mode = if !self.cursor_visible && self.relative {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        };
        self.window.set_cursor_mode(mode);
    }
}

fn map_event(event: glfw::WindowEvent) -> Option<WindowEvent> {
    match event {
        glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
        glfw::WindowEvent::FramebufferSize(width, height)
        | glfw::WindowEvent::Size(width, height) => Some(WindowEvent::Resized(
            width.max(1) as u32,
            height.max(1) as u32,
        )),
        glfw::WindowEvent::Key(key, scancode, action, _) => Some(WindowEvent::Key {
            key: map_key(key, scancode),
            action: map_action(action),
        }),
        glfw::WindowEvent::MouseButton(button, action, _) => {
            map_mouse_button(button).map(|key| WindowEvent::Key {
                key,
                action: map_action(action),
            })
        }
        _ => None,
    }
}

fn map_action(action: glfw::Action) -> Action {
    match action {
        glfw::Action::Press => Action::Press,
        glfw::Action::Release => Action::Release,
        glfw::Action::Repeat => Action::Repeat,
    }
}

fn map_key(key: glfw::Key, scancode: i32) -> Key {
    match key {
        glfw::Key::Escape => Key::Escape,
        glfw::Key::Enter | glfw::Key::KpEnter => Key::Enter,
        glfw::Key::Space => Key::Space,
        glfw::Key::Tab => Key::Tab,
        glfw::Key::Backspace => Key::Backspace,
        glfw::Key::LeftShift | glfw::Key::RightShift => Key::Shift,
        glfw::Key::LeftControl | glfw::Key::RightControl => Key::Ctrl,
        glfw::Key::LeftAlt | glfw::Key::RightAlt => Key::Alt,
        glfw::Key::Up => Key::Up,
        glfw::Key::Down => Key::Down,
        glfw::Key::Left => Key::Left,
        glfw::Key::Right => Key::Right,
        glfw::Key::F1 => Key::Function(1),
        glfw::Key::F2 => Key::Function(2),
        glfw::Key::F3 => Key::Function(3),
        glfw::Key::F4 => Key::Function(4),
        glfw::Key::F5 => Key::Function(5),
        glfw::Key::F6 => Key::Function(6),
        glfw::Key::F7 => Key::Function(7),
        glfw::Key::F8 => Key::Function(8),
        glfw::Key::F9 => Key::Function(9),
        glfw::Key::F10 => Key::Function(10),
        glfw::Key::F11 => Key::Function(11),
        glfw::Key::F12 => Key::Function(12),
        glfw::Key::Unknown => Key::Other(scancode.max(0) as u16),
        other => {
            // glfw names printable keys by their uppercase ASCII value; the
            // engine expects lowercase bytes.
            let code = other as i32;
            if (32..127).contains(&code) {
                Key::Char((code as u8).to_ascii_lowercase())
            } else {
                Key::Other(code.max(0) as u16)
            }
        }
    }
}

fn map_mouse_button(button: glfw::MouseButton) -> Option<Key> {
    match button {
        glfw::MouseButton::Button1 => Some(Key::Mouse1),
        glfw::MouseButton::Button2 => Some(Key::Mouse2),
        glfw::MouseButton::Button3 => Some(Key::Mouse3),
        _ => None,
    }
}

#[cfg(all(test, feature = "glfw"))]
mod tests {
    use super::*;

    #[test]
    fn maps_known_keys() {
        assert_eq!(map_key(glfw::Key::Escape, 0), Key::Escape);
        assert_eq!(map_key(glfw::Key::LeftShift, 0), Key::Shift);
        assert_eq!(map_key(glfw::Key::F10, 0), Key::Function(10));
    }

    #[test]
    fn printable_keys_become_lowercase_bytes() {
        assert_eq!(map_key(glfw::Key::A, 0), Key::Char(b'a'));
        assert_eq!(map_key(glfw::Key::Num7, 0), Key::Char(b'7'));
    }

    #[test]
    fn maps_mouse_buttons() {
        assert_eq!(
            map_mouse_button(glfw::MouseButton::Button1),
            Some(Key::Mouse1)
        );
        assert_eq!(
            map_mouse_button(glfw::MouseButton::Button3),
            Some(Key::Mouse3)
        );
    }
}
