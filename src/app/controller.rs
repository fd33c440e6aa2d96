use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use setup_core::{EngineEvent, InstallTarget, InstallerEngine};

use super::launch;

// Breathing room for the launched app before shared resources (the staged
// asset directory among them) are torn down with the process.
const GRACE_PERIOD: Duration = Duration::from_secs(2);

// Notification sinks the controller reports through. All four may be called
// from the background install thread at any point after construction; the
// shell wires them to post through the UiChannel, tests plug in recording
// fakes.
pub struct SetupSinks {
    pub on_progress: Box<dyn Fn(f64) + Send>,
    pub on_progress_label: Box<dyn Fn(&str) + Send>,
    pub on_error: Box<dyn Fn(&str) + Send>,
    // Completion sink: asks the UI loop's owner to shut the process down
    pub on_shutdown: Box<dyn Fn() + Send>,
}

// Terminal states of one run. The idle phase before install() needs no
// variant: install(self) consumes the controller, so a second run on the
// same instance does not compile.
#[derive(Clone, Copy, PartialEq)]
enum RunState {
    Running,
    Succeeded,
    Failed,
}

// Drives one installation run against one target directory. The engine
// executes on a background thread; every notification it emits is relayed
// through the sinks in arrival order, untransformed. Exactly one of success
// or failure is reached per run, whichever the engine signals first. On
// success the controller performs the finish handshake: launch the installed
// binary detached, report a spawn failure through the error sink without
// stopping, sleep the grace period, then request shutdown.
pub struct SetupController {
    target: InstallTarget,
    sinks: SetupSinks,
    launch: Box<dyn Fn(&Path) -> Result<()> + Send>,
    grace: Duration,
}

impl SetupController {
    pub fn new(target: InstallTarget, sinks: SetupSinks) -> Self {
        Self {
            target,
            sinks,
            launch: Box::new(launch::spawn_detached),
            grace: GRACE_PERIOD,
        }
    }

    // Replaces the process launcher. Test seam; production keeps the
    // default detached spawn.
    pub fn launch_with(mut self, launch: impl Fn(&Path) -> Result<()> + Send + 'static) -> Self {
        self.launch = Box::new(launch);
        self
    }

    // Shortens the post-launch grace period. Test seam.
    pub fn grace_period(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    // Starts the engine and returns immediately; all further communication
    // happens through the sinks. The handle is joined by tests, the shell
    // lets the run detach.
    pub fn install(self, engine: Box<dyn InstallerEngine>) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run(engine))
    }

    fn run(self, engine: Box<dyn InstallerEngine>) {
        let dir = self.target.dir().to_path_buf();
        let mut state = RunState::Running;
        let result = engine.start(&dir, &mut |evt| self.handle(&mut state, evt));
        if let Err(err) = result {
            self.handle(&mut state, EngineEvent::Error(err.to_string()));
        }
    }

    fn handle(&self, state: &mut RunState, evt: EngineEvent) {
        match evt {
            // Progress and labels are forwarded even after a terminal signal;
            // a straggling engine update overwrites the label last-write-wins
            // rather than being suppressed.
            EngineEvent::Progress(fraction) => (self.sinks.on_progress)(fraction),
            EngineEvent::ProgressLabel(text) => (self.sinks.on_progress_label)(&text),
            EngineEvent::Error(message) => {
                if *state == RunState::Running {
                    *state = RunState::Failed;
                    (self.sinks.on_error)(&message);
                }
            }
            EngineEvent::Finished => {
                if *state == RunState::Running {
                    *state = RunState::Succeeded;
                    self.finish();
                }
            }
        }
    }

    // The finish handshake. A launch failure is reported but never stops the
    // grace-delay-then-shutdown sequence.
    fn finish(&self) {
        let exe = self.target.executable();
        if let Err(err) = (self.launch)(&exe) {
            (self.sinks.on_error)(&err.to_string());
        }
        thread::sleep(self.grace);
        (self.sinks.on_shutdown)();
    }
}
