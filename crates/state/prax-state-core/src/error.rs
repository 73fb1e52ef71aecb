use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StoreError {
    /// A single-writer role was claimed while another claim is alive.
    #[error("Writer role '{0}' is already claimed")]
    WriterClaimed(String),
}
