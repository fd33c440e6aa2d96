use crossbeam_channel::{Receiver, Sender};

use super::controller::SetupSinks;

// One notification posted from the background install path to the UI loop
#[derive(Clone, Debug, PartialEq)]
pub enum ShellMessage {
    Progress(f64),
    StatusLabel(String),
    Error(String),
    // Asks the UI loop's owner to end the loop; posted, never invoked inline
    Shutdown,
}

// FIFO channel from the background install path onto the UI loop. `post`
// only enqueues: nothing ever executes on the caller's context, no message
// is dropped, and per-channel arrival order is preserved. The receiver side
// is drained exclusively by the UI loop's own turn taking.
#[derive(Clone)]
pub struct UiChannel {
    tx: Sender<ShellMessage>,
}

impl UiChannel {
    pub fn unbounded() -> (Self, Receiver<ShellMessage>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn post(&self, msg: ShellMessage) {
        // A closed receiver means the UI loop is already gone; late
        // notifications have nowhere to render and are dropped silently.
        let _ = self.tx.send(msg);
    }

    // Builds the controller's sink set: each sink posts the matching
    // message, so every notification reaches UI state through this channel.
    pub fn sinks(&self) -> SetupSinks {
        let progress = self.clone();
        let label = self.clone();
        let error = self.clone();
        let shutdown = self.clone();
        SetupSinks {
            on_progress: Box::new(move |fraction| {
                progress.post(ShellMessage::Progress(fraction))
            }),
            on_progress_label: Box::new(move |text| {
                label.post(ShellMessage::StatusLabel(text.to_string()))
            }),
            on_error: Box::new(move |message| {
                error.post(ShellMessage::Error(message.to_string()))
            }),
            on_shutdown: Box::new(move || shutdown.post(ShellMessage::Shutdown)),
        }
    }
}
