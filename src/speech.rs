//! Text-to-speech through the platform's command-line synthesizer
//!
//! Speech is fire-and-forget: the synthesizer is spawned and never awaited,
//! and a missing synthesizer is reported once as [`SpeechError::Unsupported`].

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::SpeechConfig;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Text-to-speech is not supported on this system")]
    Unsupported,

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Synthesizer {
    /// Program that takes the text as its last argument
    Program { program: String, args: Vec<String> },
    /// Windows PowerShell with `System.Speech`
    #[cfg(target_os = "windows")]
    PowerShell,
}

impl Synthesizer {
    fn program(program: &str, args: &[&str]) -> Self {
        Self::Program {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Parse a configured command line, split on whitespace
    fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::Program {
            program,
            args: parts.collect(),
        })
    }

    fn name(&self) -> &str {
        match self {
            Self::Program { program, .. } => program,
            #[cfg(target_os = "windows")]
            Self::PowerShell => "powershell",
        }
    }

    fn command(&self, text: &str) -> Command {
        match self {
            Self::Program { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(text);
                cmd
            }
            #[cfg(target_os = "windows")]
            Self::PowerShell => {
                let mut cmd = Command::new("powershell");
                cmd.args(["-NoProfile", "-NonInteractive", "-Command"])
                    .arg(powershell_script(text));
                cmd
            }
        }
    }
}

#[cfg(target_os = "windows")]
fn powershell_script(text: &str) -> String {
    format!(
        "Add-Type -AssemblyName System.Speech; \
         $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
         $s.Speak('{}')",
        text.replace('\'', "''")
    )
}

/// Synthesizers tried in order on this platform
fn platform_candidates() -> Vec<Synthesizer> {
    #[cfg(target_os = "macos")]
    {
        vec![Synthesizer::program("say", &[])]
    }
    #[cfg(target_os = "windows")]
    {
        vec![
            Synthesizer::PowerShell,
            Synthesizer::program("espeak-ng", &["-v", "en-us"]),
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![
            Synthesizer::program("spd-say", &["-l", "en"]),
            Synthesizer::program("espeak-ng", &["-v", "en-us"]),
            Synthesizer::program("espeak", &["-v", "en-us"]),
        ]
    }
}

/// Locate `program` in a PATH-style list of directories
fn find_in(paths: &OsStr, program: &str) -> Option<PathBuf> {
    std::env::split_paths(paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

fn on_path(program: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| find_in(&paths, program).is_some())
}

pub struct SystemSpeaker {
    synthesizer: Option<Synthesizer>,
}

impl SystemSpeaker {
    /// Pick the configured command, else the first synthesizer found on PATH
    pub fn detect(config: &SpeechConfig) -> Self {
        let configured = config.command.as_deref().and_then(Synthesizer::parse);

        let synthesizer = configured.or_else(|| {
            platform_candidates().into_iter().find(|candidate| match candidate {
                Synthesizer::Program { program, .. } => on_path(program),
                #[cfg(target_os = "windows")]
                Synthesizer::PowerShell => on_path("powershell"),
            })
        });

        match synthesizer {
            Some(ref s) => log::debug!("Using speech synthesizer: {}", s.name()),
            None => log::debug!("No speech synthesizer found"),
        }

        Self { synthesizer }
    }

    /// A speaker that never speaks
    pub fn disabled() -> Self {
        Self { synthesizer: None }
    }

    pub fn is_available(&self) -> bool {
        self.synthesizer.is_some()
    }

    pub fn program(&self) -> Option<&str> {
        self.synthesizer.as_ref().map(Synthesizer::name)
    }

    /// Start speaking `text` and return immediately
    pub fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let synthesizer = self.synthesizer.as_ref().ok_or(SpeechError::Unsupported)?;

        let mut child = synthesizer
            .command(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: synthesizer.name().to_string(),
                source,
            })?;

        // Reap the child off-thread so it does not linger as a zombie
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }

    /// Speak a headword, logging instead of failing
    pub fn speak_word(&self, word: &str) {
        match self.speak(word) {
            Ok(()) => log::debug!("Speaking '{}'", word),
            Err(SpeechError::Unsupported) => {
                log::warn!("Text-to-speech is not supported, cannot pronounce '{}'", word)
            }
            Err(e) => log::warn!("Failed to speak '{}': {}", word, e),
        }
    }
}
