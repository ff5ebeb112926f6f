// The fixed per-frame loop: pump window events, drain the console, feed the
// host, present, sleep a millisecond.

use thiserror::Error;

use nq_audio::{AudioConfig, AudioOutput};
use nq_common::{Host, HostError, HostParms, Hunk};
use nq_sys::{ConsoleInput, FileTable, SysClock, sleep_frame};
use nq_video_gl::{GlPresenter, Video, VideoConfig};
use nq_window_glfw::{Action, GlfwWindow, WindowConfig, WindowError, WindowEvent};

use crate::assets;

/// Fixed timestep handed to the host each frame.
pub const FRAME_INTERVAL: f64 = 0.01;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Relative mouse deltas accumulated between frames and drained once per
/// frame into the host.
#[derive(Debug, Default)]
pub struct MouseState {
    dx: f32,
    dy: f32,
}

impl MouseState {
    pub fn accumulate(&mut self, dx: f32, dy: f32) {
        self.dx += dx;
        self.dy += dy;
    }

    pub fn take(&mut self) -> (f32, f32) {
        (std::mem::take(&mut self.dx), std::mem::take(&mut self.dy))
    }
}

pub struct Platform {
    pub window: GlfwWindow,
    pub presenter: GlPresenter,
    pub video: Video,
    pub audio: Option<AudioOutput>,
}

pub fn build_platform(
    parms: &HostParms,
    hunk: &mut Hunk,
    config: WindowConfig,
) -> Result<Platform, RunnerError> {
    let mut window = GlfwWindow::new(config)?;
    window.set_relative_mouse(true);
    let presenter = unsafe { GlPresenter::from_loader(|name| window.get_proc_address(name)) };

    let mut files = FileTable::new();
    let palette = assets::load_palette(&mut files, &parms.basedir);
    let colormap = assets::load_colormap(&mut files, &parms.basedir);

    let (width, height) = window.size();
    let video = Video::new(VideoConfig { width, height }, &palette, &colormap);

    // A missing audio device disables sound but never stops the game.
    let audio = match AudioOutput::open(AudioConfig::default(), hunk) {
        Ok(audio) => Some(audio),
        Err(err) => {
            tracing::warn!("sound disabled: {err}");
            None
        }
    };

    Ok(Platform {
        window,
        presenter,
        video,
        audio,
    })
}

/// Apply one window event. Returns true when the loop should exit.
pub fn handle_event<H: Host>(
    event: WindowEvent,
    window: &mut GlfwWindow,
    presenter: &mut GlPresenter,
    video: &mut Video,
    host: &mut H,
    mouse: &mut MouseState,
) -> bool {
    match event {
        WindowEvent::CloseRequested => {
            window.close();
            true
        }
        WindowEvent::Resized(width, height) => {
            video.resize(width, height);
            presenter.resize(width, height);
            false
        }
        WindowEvent::Key { key, action } => {
            // Key repeats never reach the engine; only edges do.
            if action != Action::Repeat {
                host.key_event(key, action == Action::Press);
            }
            false
        }
        WindowEvent::MouseMotion { dx, dy } => {
            mouse.accumulate(dx, dy);
            false
        }
    }
}

pub fn run_windowed<H: Host>(
    parms: &HostParms,
    hunk: &mut Hunk,
    host: &mut H,
    config: WindowConfig,
    console: ConsoleInput,
) -> Result<(), RunnerError> {
    let mut platform = build_platform(parms, hunk, config)?;
    host.init(parms, hunk)?;
    run_loop(&mut platform, host, &console);
    shutdown(&mut platform, host);
    Ok(())
}

pub fn run_loop<H: Host>(platform: &mut Platform, host: &mut H, console: &ConsoleInput) {
    let clock = SysClock::new();
    let mut mouse = MouseState::default();
    let mut frames: u64 = 0;
    let mut was_paused = host.paused();

    loop {
        let mut quit = false;
        for event in platform.window.poll_events() {
            if handle_event(
                event,
                &mut platform.window,
                &mut platform.presenter,
                &mut platform.video,
                host,
                &mut mouse,
            ) {
                quit = true;
            }
        }

        while let Some(line) = console.poll() {
            host.console_command(&line);
        }

        let (dx, dy) = mouse.take();
        if dx != 0.0 || dy != 0.0 {
            host.mouse_move(dx, dy);
        }

        host.frame(FRAME_INTERVAL);
        frames += 1;

        if host.paused() != was_paused {
            was_paused = host.paused();
            platform.window.set_cursor_visible(was_paused);
        }

        if quit || host.wants_quit() || platform.window.should_close() {
            break;
        }

        let (width, height) = platform.window.size();
        platform.presenter.begin_frame(width, height);
        platform.presenter.end_frame();
        platform.window.swap_buffers();
        if let Some(audio) = platform.audio.as_mut() {
            audio.submit();
        }

        sleep_frame();
    }

    tracing::info!(frames, seconds = clock.seconds(), "frame loop finished");
}

fn shutdown<H: Host>(platform: &mut Platform, host: &mut H) {
    if let Some(audio) = platform.audio.as_mut() {
        audio.shutdown();
    }
    platform.window.set_relative_mouse(false);
    host.shutdown();
}

/// Dedicated mode: console lines and fixed frames, no video or audio.
pub fn run_dedicated<H: Host>(
    parms: &HostParms,
    hunk: &mut Hunk,
    host: &mut H,
    console: ConsoleInput,
) -> Result<(), RunnerError> {
    host.init(parms, hunk)?;
    let clock = SysClock::new();
    let mut frames: u64 = 0;
    while !host.wants_quit() {
        while let Some(line) = console.poll() {
            host.console_command(&line);
        }
        host.frame(FRAME_INTERVAL);
        frames += 1;
        sleep_frame();
    }
    host.shutdown();
    tracing::info!(frames, seconds = clock.seconds(), "dedicated loop finished");
    Ok(())
}
