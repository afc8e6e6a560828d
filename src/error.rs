use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or interpreting a package snapshot.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid graph.json format: missing nodes object")]
    MissingNodes,

    #[error("invalid entry for package {name}: {reason}")]
    InvalidPackage { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_nodes_message_matches_banner_text() {
        assert_eq!(
            GraphError::MissingNodes.to_string(),
            "Invalid graph.json format: missing nodes object"
        );
    }

    #[test]
    fn invalid_package_names_the_package() {
        let error = GraphError::InvalidPackage {
            name: "glibc".into(),
            reason: "expected an object".into(),
        };
        assert_eq!(
            error.to_string(),
            "invalid entry for package glibc: expected an object"
        );
    }
}
