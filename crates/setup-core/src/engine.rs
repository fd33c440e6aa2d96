use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result};

use crate::events::EngineEvent;

// Contract of the external installer engine. `start` runs the whole
// fetch/verify/extract/replace sequence against `target` and reports through
// `emit`: exactly one terminal event (Error or Finished), or an Err return
// the caller treats as an error signal. The engine owns `target` while it
// runs, may block or retry internally, and never touches UI state.
pub trait InstallerEngine: Send {
    fn start(self: Box<Self>, target: &Path, emit: &mut dyn FnMut(EngineEvent)) -> Result<()>;
}

// Bridges to the engine executable shipped alongside the setup binary. The
// engine is spawned with `--target <dir>` and reports on stdout, one event
// per line: `progress <fraction>`, `label <text>`, `error <text>`. Exit
// status 0 signals completion; anything else becomes an Error event carrying
// the engine's stderr. Lines that do not parse are engine-internal chatter
// and are skipped.
pub struct CommandEngine {
    program: PathBuf,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl InstallerEngine for CommandEngine {
    fn start(self: Box<Self>, target: &Path, emit: &mut dyn FnMut(EngineEvent)) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("--target")
            .arg(target)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("start engine {}", self.program.display()))?;

        let stdout = child.stdout.take().context("engine stdout missing")?;
        let mut stderr = child.stderr.take().context("engine stderr missing")?;

        // Stderr must be drained while stdout is streamed: a chatty engine
        // fills the stderr pipe and stalls the whole run.
        let stderr_reader = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            buf
        });

        for line in BufReader::new(stdout).lines() {
            let line = line.context("read engine output")?;
            if let Some(evt) = parse_line(&line) {
                emit(evt);
            }
        }

        let status = child.wait().context("wait for engine")?;
        let stderr_bytes = stderr_reader.join().unwrap_or_default();
        if status.success() {
            emit(EngineEvent::Finished);
        } else {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            let message = stderr.trim();
            if message.is_empty() {
                emit(EngineEvent::Error(format!("engine exited with {}", status)));
            } else {
                emit(EngineEvent::Error(message.to_string()));
            }
        }
        Ok(())
    }
}

fn parse_line(line: &str) -> Option<EngineEvent> {
    let (kind, rest) = line.split_once(' ')?;
    let rest = rest.trim();
    match kind {
        "progress" => rest.parse::<f64>().ok().map(EngineEvent::Progress),
        "label" if !rest.is_empty() => Some(EngineEvent::ProgressLabel(rest.to_string())),
        "error" if !rest.is_empty() => Some(EngineEvent::Error(rest.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_progress_label_and_error_lines() {
        assert_eq!(
            parse_line("progress 0.25"),
            Some(EngineEvent::Progress(0.25))
        );
        assert_eq!(
            parse_line("label Extracting files"),
            Some(EngineEvent::ProgressLabel("Extracting files".to_string()))
        );
        assert_eq!(
            parse_line("error network unreachable"),
            Some(EngineEvent::Error("network unreachable".to_string()))
        );
    }

    #[test]
    fn skips_unparseable_lines() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("progress not-a-number"), None);
        assert_eq!(parse_line("debug cache hit"), None);
    }

    #[test]
    fn skips_label_and_error_lines_without_a_payload() {
        assert_eq!(parse_line("label"), None);
        assert_eq!(parse_line("error"), None);
        assert_eq!(parse_line("label "), None);
        assert_eq!(parse_line("error   "), None);
        assert_eq!(parse_line("progress"), None);
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("engine.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn command_engine_maps_clean_exit_to_finished() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(
            tmp.path(),
            "echo 'progress 0.5'\necho 'label Extracting'\nexit 0\n",
        );

        let mut events = Vec::new();
        Box::new(CommandEngine::new(&script))
            .start(tmp.path(), &mut |evt| events.push(evt))
            .unwrap();

        assert_eq!(
            events,
            vec![
                EngineEvent::Progress(0.5),
                EngineEvent::ProgressLabel("Extracting".to_string()),
                EngineEvent::Finished,
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_engine_maps_nonzero_exit_to_stderr_error() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "echo 'network unreachable' >&2\nexit 3\n");

        let mut events = Vec::new();
        Box::new(CommandEngine::new(&script))
            .start(tmp.path(), &mut |evt| events.push(evt))
            .unwrap();

        assert_eq!(
            events,
            vec![EngineEvent::Error("network unreachable".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn stderr_heavy_engine_still_reaches_a_terminal_event() {
        // 256 KiB of stderr chatter, well past the pipe buffer. The run must
        // still stream stdout and end with Finished instead of stalling on
        // the full stderr pipe.
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(
            tmp.path(),
            "head -c 262144 /dev/zero | tr '\\0' 'x' >&2\necho 'progress 1.0'\nexit 0\n",
        );

        let mut events = Vec::new();
        Box::new(CommandEngine::new(&script))
            .start(tmp.path(), &mut |evt| events.push(evt))
            .unwrap();

        assert_eq!(
            events,
            vec![EngineEvent::Progress(1.0), EngineEvent::Finished]
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_engine_passes_the_target_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "echo \"label $2\"\nexit 0\n");

        let target = tmp.path().join("dest");
        let mut events = Vec::new();
        Box::new(CommandEngine::new(&script))
            .start(&target, &mut |evt| events.push(evt))
            .unwrap();

        assert_eq!(
            events,
            vec![
                EngineEvent::ProgressLabel(target.display().to_string()),
                EngineEvent::Finished,
            ]
        );
    }

    #[test]
    fn missing_engine_binary_is_a_start_error() {
        let err = Box::new(CommandEngine::new("/nonexistent/harbor-engine"))
            .start(Path::new("/tmp"), &mut |_| {})
            .unwrap_err();
        assert!(err.to_string().contains("start engine"));
    }
}
