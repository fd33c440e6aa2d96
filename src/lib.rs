mod assets;
mod config;
mod model;
mod ui;

pub mod app;
