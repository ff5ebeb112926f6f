// The seam between the platform layer and the engine core. Everything the
// platform calls into the engine goes through `Host`; nothing else of the
// core is visible from this side.

use std::path::PathBuf;

use thiserror::Error;

use crate::hunk::Hunk;
use crate::keys::Key;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("host init failed: {0}")]
    Init(String),
}

/// Startup parameters handed to the engine core, the original `quakeparms_t`
/// plus the dedicated flag the launcher derives from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParms {
    pub memsize: usize,
    pub basedir: PathBuf,
    pub cachedir: PathBuf,
    pub args: Vec<String>,
    pub dedicated: bool,
}

impl HostParms {
    /// Command-line presence check in the engine's style.
    pub fn check_parm(&self, name: &str) -> bool {
        self.args.iter().any(|arg| arg == name)
    }
}

impl Default for HostParms {
    fn default() -> Self {
        Self {
            memsize: 16 * 1024 * 1024,
            basedir: PathBuf::from("."),
            cachedir: PathBuf::from("."),
            args: Vec::new(),
            dedicated: false,
        }
    }
}

/// Engine core entry points. The platform layer initializes the host once,
/// then feeds it key events, mouse deltas, console lines, and fixed frames.
pub trait Host {
    fn init(&mut self, parms: &HostParms, hunk: &mut Hunk) -> Result<(), HostError>;
    fn frame(&mut self, dt: f64);
    fn key_event(&mut self, key: Key, down: bool);
    fn mouse_move(&mut self, dx: f32, dy: f32);
    fn console_command(&mut self, line: &str);
    fn wants_quit(&self) -> bool;
    fn paused(&self) -> bool;
    fn shutdown(&mut self);
}
