pub mod action;
pub mod app;
pub mod census;
pub mod config;
pub mod event;
pub mod format;
pub mod host;
pub mod inspector;
pub mod logging;
pub mod report;
pub mod ui;
