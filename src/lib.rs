// Library for tests to access modules

pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod poller;
pub mod ui;
pub mod version;
