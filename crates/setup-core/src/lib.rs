pub mod engine;
pub mod events;
pub mod target;

pub use engine::{CommandEngine, InstallerEngine};
pub use events::EngineEvent;
pub use target::InstallTarget;
