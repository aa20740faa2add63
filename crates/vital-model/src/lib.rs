mod domain;
pub use domain::{Endpoint, Environment, HealthState};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::ProbeSpec;
