//! Text-to-speech through an external program.
//!
//! Speech is fire-and-forget: the child process is never waited on, and a new
//! utterance kills the previous one. Nothing in the quiz logic depends on it.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Programs tried, in order, when no override is configured.
const CANDIDATES: [&str; 3] = ["espeak-ng", "espeak", "say"];

/// Something that can read Japanese text aloud.
pub trait Speaker {
    /// Whether speech can be produced at all.
    fn is_available(&self) -> bool;

    /// Start speaking `text`, superseding any utterance in progress.
    fn speak(&mut self, text: &str, rate: f64);
}

/// Used when no TTS program exists or speech is disabled.
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str, _rate: f64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Voice {
    /// espeak / espeak-ng: `-v ja -s <wpm>`
    Espeak,
    /// macOS say: `-v Kyoko -r <wpm>`
    Say,
}

/// Speaks by spawning a TTS program.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: PathBuf,
    voice: Voice,
    current: Option<Child>,
}

impl CommandSpeaker {
    /// Use a specific program; the argument style is picked from its file name.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let voice = match program.file_stem().and_then(|s| s.to_str()) {
            Some("say") => Voice::Say,
            _ => Voice::Espeak,
        };
        Self {
            program,
            voice,
            current: None,
        }
    }

    /// Look for a known TTS program on `PATH`.
    pub fn detect() -> Option<Self> {
        CANDIDATES
            .iter()
            .find_map(|name| find_in_path(name))
            .map(Self::with_program)
    }

    fn args(&self, text: &str, rate: f64) -> Vec<String> {
        match self.voice {
            Voice::Espeak => vec![
                "-v".into(),
                "ja".into(),
                "-s".into(),
                format!("{}", (175.0 * rate).round() as u32),
                text.into(),
            ],
            Voice::Say => vec![
                "-v".into(),
                "Kyoko".into(),
                "-r".into(),
                format!("{}", (180.0 * rate).round() as u32),
                text.into(),
            ],
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

impl Speaker for CommandSpeaker {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&mut self, text: &str, rate: f64) {
        if text.trim().is_empty() {
            return;
        }
        self.cancel();

        let spawned = Command::new(&self.program)
            .args(self.args(text, rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.current = Some(child),
            Err(e) => {
                tracing::warn!(program = %self.program.display(), error = %e, "speech failed")
            }
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Pick a speaker from configuration: disabled, an explicit program, or
/// whatever is found on `PATH`.
pub fn speaker_from_config(program: Option<&Path>, disabled: bool) -> Box<dyn Speaker> {
    if disabled {
        return Box::new(SilentSpeaker);
    }
    let speaker = match program {
        Some(p) => Some(CommandSpeaker::with_program(p)),
        None => CommandSpeaker::detect(),
    };
    match speaker {
        Some(s) => {
            tracing::info!(program = %s.program.display(), "speech enabled");
            Box::new(s)
        }
        None => {
            tracing::info!("no speech program found, speech disabled");
            Box::new(SilentSpeaker)
        }
    }
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
