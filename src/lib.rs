pub mod configuration;
pub mod domain;
pub mod moosend_client;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use {
    configuration::get_configuration,
    moosend_client::MoosendClient,
    startup::run,
    telemetry::{get_subscriber, init_subscriber},
};
