///! Error taxonomy for the catalog pipeline
use crate::module::orbit::OrbitBand;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or filesystem failure while refreshing a cached resource.
    /// There is no fallback to stale data; the request fails.
    #[error("failed to refresh {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Element-set text whose line count is not a multiple of three.
    #[error("malformed element-set catalog: {0} lines is not a multiple of 3")]
    MalformedCatalog(usize),

    /// An altitude band with no members in the current catalog snapshot.
    #[error("no tracked objects in {0} band")]
    EmptyBand(OrbitBand),

    /// Unparsable or absent observer coordinates. Surfaced as a client error.
    #[error("invalid observer location: {0}")]
    InvalidLocation(String),

    /// A single element-set record the propagator rejected.
    #[error("propagation failed for {name}: {reason}")]
    Propagation { name: String, reason: String },
}
