// One notification from the installer engine. Exactly one of Error or
// Finished ends a run; whichever arrives first wins. Progress fractions are
// forwarded as emitted, in emission order, with no clamping or coalescing
// anywhere downstream.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    // Overall completion fraction in [0.0, 1.0]
    Progress(f64),
    // Short phase description shown to the user ("Downloading...")
    ProgressLabel(String),
    // Unrecoverable failure; the attached text is user-facing
    Error(String),
    Finished,
}
