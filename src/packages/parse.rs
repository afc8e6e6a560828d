use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::GraphError;

use super::graph::PackageNode;

const UNKNOWN_VERSION: &str = "unknown";

/// Collector metadata stored next to the package map.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GraphInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shell: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct RawPackageInfo {
    #[serde(default)]
    explicit: Option<bool>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    depends_on: Option<Vec<String>>,
    #[serde(default)]
    required_by: Option<Vec<String>>,
}

impl RawPackageInfo {
    fn into_node(self, id: String) -> PackageNode {
        let version = self
            .version
            .filter(|version| !version.is_empty())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_owned());

        PackageNode {
            id,
            explicit: self.explicit.unwrap_or(false),
            version,
            depends_on: self.depends_on.unwrap_or_default(),
            required_by: self.required_by.unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub struct ParsedDocument {
    pub info: Option<GraphInfo>,
    pub nodes: Vec<PackageNode>,
}

pub fn parse_graph_document(raw: &str) -> Result<ParsedDocument, GraphError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let object = parsed.as_object().ok_or(GraphError::MissingNodes)?;

    let nodes_object = object
        .get("nodes")
        .and_then(Value::as_object)
        .ok_or(GraphError::MissingNodes)?;

    // a malformed header is dropped, the nodes still load
    let info = object
        .get("info")
        .filter(|value| value.is_object())
        .and_then(|value| match GraphInfo::deserialize(value) {
            Ok(info) => Some(info),
            Err(error) => {
                tracing::warn!(%error, "ignoring malformed info block");
                None
            }
        });

    Ok(ParsedDocument {
        info,
        nodes: parse_nodes(nodes_object)?,
    })
}

fn parse_nodes(nodes_object: &Map<String, Value>) -> Result<Vec<PackageNode>, GraphError> {
    let mut nodes = Vec::with_capacity(nodes_object.len());

    for (name, value) in nodes_object {
        if !value.is_object() {
            return Err(GraphError::InvalidPackage {
                name: name.clone(),
                reason: "expected an object".to_owned(),
            });
        }

        let raw = RawPackageInfo::deserialize(value).map_err(|error| {
            GraphError::InvalidPackage {
                name: name.clone(),
                reason: error.to_string(),
            }
        })?;
        nodes.push(raw.into_node(name.clone()));
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_info_and_nodes() {
        let raw = r#"{
            "info": {"os": "Arch Linux", "hostname": "box", "timestamp": "2025-01-02-030405", "shell": "zsh"},
            "nodes": {
                "bash": {"explicit": true, "version": "5.2", "depends_on": ["glibc"], "required_by": []},
                "glibc": {"explicit": false, "version": "2.40", "depends_on": [], "required_by": ["bash"]}
            }
        }"#;

        let doc = parse_graph_document(raw).unwrap();
        let info = doc.info.unwrap();
        assert_eq!(info.hostname, "box");
        assert_eq!(info.shell, "zsh");
        assert_eq!(doc.nodes.len(), 2);

        let bash = doc.nodes.iter().find(|node| node.id == "bash").unwrap();
        assert!(bash.explicit);
        assert_eq!(bash.depends_on, vec!["glibc".to_owned()]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let raw = r#"{"nodes": {"zlib": {}, "xz": {"explicit": null, "version": "", "depends_on": null}}}"#;
        let doc = parse_graph_document(raw).unwrap();
        assert!(doc.info.is_none());

        for node in &doc.nodes {
            assert!(!node.explicit);
            assert_eq!(node.version, "unknown");
            assert!(node.depends_on.is_empty());
            assert!(node.required_by.is_empty());
        }
    }

    #[test]
    fn rejects_documents_without_nodes_object() {
        for raw in [r#"{}"#, r#"{"nodes": []}"#, r#"{"nodes": 3}"#, r#"[1, 2]"#] {
            let error = parse_graph_document(raw).unwrap_err();
            assert!(matches!(error, GraphError::MissingNodes), "{raw}");
        }
    }

    #[test]
    fn rejects_invalid_json() {
        let error = parse_graph_document("{nodes:").unwrap_err();
        assert!(matches!(error, GraphError::Json(_)));
    }

    #[test]
    fn rejects_non_object_package_entries() {
        let error = parse_graph_document(r#"{"nodes": {"bad": 12}}"#).unwrap_err();
        match error {
            GraphError::InvalidPackage { name, .. } => assert_eq!(name, "bad"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrongly_typed_dependency_lists() {
        let error =
            parse_graph_document(r#"{"nodes": {"bad": {"depends_on": [1, 2]}}}"#).unwrap_err();
        assert!(matches!(error, GraphError::InvalidPackage { .. }));
    }

    #[test]
    fn null_info_fields_read_as_empty() {
        let raw = r#"{
            "info": {"os": "Arch", "hostname": null, "timestamp": "2025-01-02-030405", "shell": null},
            "nodes": {"bash": {"explicit": true, "version": "5.2"}}
        }"#;

        let doc = parse_graph_document(raw).unwrap();
        let info = doc.info.unwrap();
        assert_eq!(info.os, "Arch");
        assert_eq!(info.hostname, "");
        assert_eq!(info.shell, "");
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn wrongly_typed_info_is_dropped_but_nodes_load() {
        let raw = r#"{"info": {"os": 7, "hostname": ["x"]}, "nodes": {"bash": {}}}"#;
        let doc = parse_graph_document(raw).unwrap();
        assert!(doc.info.is_none());
        assert_eq!(doc.nodes[0].id, "bash");
    }

    #[test]
    fn ignores_non_object_info() {
        let doc = parse_graph_document(r#"{"info": "n/a", "nodes": {}}"#).unwrap();
        assert!(doc.info.is_none());
        assert!(doc.nodes.is_empty());
    }
}
