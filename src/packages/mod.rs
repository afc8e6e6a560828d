mod files;
mod graph;
mod maps;
mod parse;

pub use files::{list_data_files, load_graph_file, resolve_data_file};
pub use graph::{
    LinkKind, PackageCounts, PackageGraph, PackageLink, PackageNode, PackageStatus, SubGraph,
    compare_ids,
};
pub use maps::DependencyMaps;
pub use parse::{GraphInfo, ParsedDocument, parse_graph_document};
