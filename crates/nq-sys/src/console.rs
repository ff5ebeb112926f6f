// Non-blocking console input. A reader thread forwards trimmed stdin lines
// over a channel; the frame loop drains whatever has arrived.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

#[derive(Debug)]
pub struct ConsoleInput {
    rx: Receiver<String>,
}

impl ConsoleInput {
    /// Spawn the stdin reader thread. The thread exits when stdin closes or
    /// the `ConsoleInput` is dropped.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<String>();
        tracing::debug!("console reader thread started");
        thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();
            loop {
                line.clear();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if tx.send(trimmed.to_string()).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Test constructor: a console fed from a channel instead of stdin.
    pub fn from_channel() -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Next pending line, if any. Never blocks.
    pub fn poll(&self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polls_queued_lines_in_order() {
        let (tx, console) = ConsoleInput::from_channel();
        tx.send("map e1m1".to_string()).unwrap();
        tx.send("quit".to_string()).unwrap();
        assert_eq!(console.poll().as_deref(), Some("map e1m1"));
        assert_eq!(console.poll().as_deref(), Some("quit"));
        assert!(console.poll().is_none());
    }

    #[test]
    fn spawned_reader_starts_with_no_pending_lines() {
        let console = ConsoleInput::spawn();
        assert!(console.poll().is_none());
    }

    #[test]
    fn empty_when_sender_dropped() {
        let (tx, console) = ConsoleInput::from_channel();
        drop(tx);
        assert!(console.poll().is_none());
    }
}
