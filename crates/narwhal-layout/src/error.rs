#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout algorithm: {name} (expected radial, grid, flow or force)")]
    UnknownAlgorithm { name: String },

    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
