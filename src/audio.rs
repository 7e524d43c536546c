//! Sound cues
//!
//! Playback is fire-and-forget: implementations swallow their own failures so a
//! broken output can never interrupt a tick.

use std::io::Write;

use tracing::warn;

pub trait AudioSink {
    fn play_eat(&mut self);
    fn play_game_over(&mut self);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play_eat(&mut self) {
        (**self).play_eat()
    }

    fn play_game_over(&mut self) {
        (**self).play_game_over()
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl AudioSink for Muted {
    fn play_eat(&mut self) {}

    fn play_game_over(&mut self) {}
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self, cue: &'static str, count: usize) {
        let bells = "\x07".repeat(count);
        let result = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|_| self.out.flush());

        if let Err(err) = result {
            warn!(%err, cue, "audio cue failed");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play_eat(&mut self) {
        self.ring("eat", 1);
    }

    fn play_game_over(&mut self) {
        self.ring("game_over", 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_bell_writes_cues() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play_eat();
        bell.play_game_over();
        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut bell = TerminalBell::new(BrokenPipe);
        bell.play_eat();
        bell.play_game_over();
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<dyn AudioSink> = Box::new(Muted);
        sink.play_eat();
        sink.play_game_over();
    }
}
