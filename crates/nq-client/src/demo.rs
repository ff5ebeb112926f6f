// A minimal engine host behind the platform seam. It allocates its zone,
// counts frames and input, and answers the handful of console commands the
// launcher cares about.

use nq_common::{Host, HostError, HostParms, Hunk, HunkBlock, Key};

const ZONE_SIZE: usize = 0xc000;

#[derive(Debug, Default)]
pub struct DemoHost {
    frames: u64,
    key_events: u64,
    mouse: (f32, f32),
    zone: Option<HunkBlock>,
    quit: bool,
    paused: bool,
}

impl DemoHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn key_events(&self) -> u64 {
        self.key_events
    }

    pub fn mouse_total(&self) -> (f32, f32) {
        self.mouse
    }
}

impl Host for DemoHost {
    fn init(&mut self, parms: &HostParms, hunk: &mut Hunk) -> Result<(), HostError> {
        let zone = hunk
            .alloc_named(ZONE_SIZE, "zone")
            .map_err(|err| HostError::Init(err.to_string()))?;
        self.zone = Some(zone);
        tracing::info!(
            basedir = %parms.basedir.display(),
            hunk = hunk.size(),
            dedicated = parms.dedicated,
            "host initialized"
        );
        Ok(())
    }

    fn frame(&mut self, _dt: f64) {
        self.frames += 1;
    }

    fn key_event(&mut self, key: Key, down: bool) {
        self.key_events += 1;
        if key == Key::Escape && down {
            self.quit = true;
        }
    }

    fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.mouse.0 += dx;
        self.mouse.1 += dy;
    }

    fn console_command(&mut self, line: &str) {
        match line.trim() {
            "quit" | "exit" => self.quit = true,
            "pause" => self.paused = !self.paused,
            other => tracing::info!("unhandled command: {other}"),
        }
    }

    fn wants_quit(&self) -> bool {
        self.quit
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn shutdown(&mut self) {
        tracing::info!(frames = self.frames, "host shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_allocates_the_zone() {
        let mut hunk = Hunk::new(1024 * 1024);
        let mut host = DemoHost::new();
        host.init(&HostParms::default(), &mut hunk).unwrap();
        let zone = host.zone.expect("zone");
        assert_eq!(zone.len(), ZONE_SIZE);
        assert_eq!(hunk.name_of(zone), Some("zone"));
    }

    #[test]
    fn init_fails_on_tiny_hunk() {
        let mut hunk = Hunk::new(64);
        let mut host = DemoHost::new();
        assert!(matches!(
            host.init(&HostParms::default(), &mut hunk),
            Err(HostError::Init(_))
        ));
    }

    #[test]
    fn escape_requests_quit() {
        let mut host = DemoHost::new();
        host.key_event(Key::Char(b'w'), true);
        assert!(!host.wants_quit());
        host.key_event(Key::Escape, true);
        assert!(host.wants_quit());
        assert_eq!(host.key_events(), 2);
    }

    #[test]
    fn pause_command_toggles() {
        let mut host = DemoHost::new();
        host.console_command("pause");
        assert!(host.paused());
        host.console_command("pause");
        assert!(!host.paused());
    }

    #[test]
    fn quit_command_stops_the_host() {
        let mut host = DemoHost::new();
        host.console_command("quit");
        assert!(host.wants_quit());
    }

    #[test]
    fn accumulates_mouse_motion() {
        let mut host = DemoHost::new();
        host.mouse_move(3.0, -2.0);
        host.mouse_move(1.0, 1.0);
        assert_eq!(host.mouse_total(), (4.0, -1.0));
    }
}
