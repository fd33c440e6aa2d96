// The client application this setup binary deploys and launches.
pub(crate) const APP_NAME: &str = "harbor";

// Engine executable resolution: env override first, sibling binary otherwise.
pub(crate) const ENGINE_ENV: &str = "HARBOR_SETUP_ENGINE";
pub(crate) const ENGINE_BIN: &str = "harbor-engine";

pub(crate) const WINDOW_TITLE: &str = "harbor setup";
