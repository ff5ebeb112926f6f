use nq_common::Key;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "NetQuake".to_string(),
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    CloseRequested,
    Resized(u32, u32),
    Key { key: Key, action: Action },
    MouseMotion { dx: f32, dy: f32 },
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("could not initialize the window system")]
    Init,
    #[error("could not create window or GL context")]
    CreateWindow,
}

#[cfg(feature = "glfw")]
mod glfw_backend;
#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwWindow;

#[cfg(not(feature = "glfw"))]
mod stub;
#[cfg(not(feature = "glfw"))]
pub use stub::GlfwWindow;

#[cfg(all(test, not(feature = "glfw")))]
mod tests {
    use super::*;

    #[test]
    fn closes_window() {
        let mut window = GlfwWindow::new(WindowConfig::default()).unwrap();
        assert!(!window.should_close());
        window.close();
        assert!(window.should_close());
    }

    #[test]
    fn defaults_to_vga_size() {
        let window = GlfwWindow::new(WindowConfig::default()).unwrap();
        assert_eq!(window.size(), (640, 480));
    }

    #[test]
    fn collects_pending_events() {
        let mut window = GlfwWindow::new(WindowConfig::default()).unwrap();
        window.push_event(WindowEvent::CloseRequested);
        let events = window.poll_events();
        assert_eq!(events, vec![WindowEvent::CloseRequested]);
        assert!(window.poll_events().is_empty());
    }

    #[test]
    fn resize_event_updates_config() {
        let mut window = GlfwWindow::new(WindowConfig::default()).unwrap();
        window.push_event(WindowEvent::Resized(800, 600));
        window.poll_events();
        assert_eq!(window.size(), (800, 600));
    }

    #[test]
    fn tracks_cursor_state() {
        let mut window = GlfwWindow::new(WindowConfig::default()).unwrap();
        window.set_relative_mouse(true);
        assert!(window.relative_mouse());
        window.set_cursor_visible(true);
        assert!(!window.relative_mouse());
    }
}
