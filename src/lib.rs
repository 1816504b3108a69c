//! Library exports for the desktop client, the CLI, and tests.
/// Base directories for config and logs.
pub mod app_dirs;
/// Classification service client.
pub mod backend;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// User-facing error kinds.
pub mod errors;
/// Shared HTTP agent setup.
pub mod http_client;
/// Tracing setup.
pub mod logging;
/// Decoding of the result preview image.
pub mod preview;
/// Training form, log lines, and simulated progress.
pub mod training;
/// File selection and upload validation.
pub mod upload;
