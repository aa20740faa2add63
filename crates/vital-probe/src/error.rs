use thiserror::Error;

use vital_model::ModelError;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe spec: {0}")]
    Spec(#[from] ModelError),

    #[error("failed to build probe client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
