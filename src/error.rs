use std::path::PathBuf;

use thiserror::Error;

use crate::types::Vec3;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no content named \"{0}\"")]
    NotFound(String),

    #[error("{owner} has non-positive size {size:?}")]
    InvalidSize { owner: String, size: Vec3 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("failed to create map {map_id} after {attempts} attempts (last size {last_size:?})")]
    Exhausted {
        map_id: String,
        attempts: usize,
        last_size: Option<Vec3>,
    },

    #[error("map {0} has no sectors")]
    EmptyCatalog(String),

    #[error("map {map_id} has non-positive size {size:?}")]
    InvalidMapSize { map_id: String, size: Vec3 },
}
