//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! Only dataset loading can fail the pipeline outright; the analysis stages
//! themselves are total over loaded data. Degenerate inputs (constant
//! metrics, single-item menus, thin sales history) are logged and handled
//! in-stage, never surfaced as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {table} table at '{path}': {source}")]
    Io {
        table: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} parse error at line {line}: {source}")]
    Malformed {
        table: &'static str,
        line: usize,
        #[source]
        source: csv::Error,
    },
}

/// Result type alias for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;
