pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod newsletter;
pub mod routes;
pub mod startup;
pub mod telemetry;
