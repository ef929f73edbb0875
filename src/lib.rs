pub mod configuration;
pub mod content_loader;
pub mod dispatcher;
pub mod domain;
pub mod email_client;
pub mod error;
pub mod markdown;
pub mod startup;
pub mod telemetry;
