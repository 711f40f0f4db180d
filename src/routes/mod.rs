mod export_subscribers;
mod health_check;

pub use {export_subscribers::*, health_check::*};
