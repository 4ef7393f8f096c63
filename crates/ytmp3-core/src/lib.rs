pub mod api;
pub mod config;
pub mod control;
pub mod coordinator;
pub mod filename;
pub mod logging;
pub mod messages;
pub mod poller;
pub mod progress;
pub mod queue;
pub mod store;
pub mod urls;
