mod investigate;
mod list;
mod orphans;

pub use investigate::{InvestigateFilter, InvestigateState, relation_summary};
pub use list::{Column, ListSelection, ListState};
pub use orphans::{OrphansState, dependency_summary};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    #[default]
    List,
    Graph,
    Orphaned,
    Investigate,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [Self::List, Self::Graph, Self::Orphaned, Self::Investigate];

    pub fn tab_label(self) -> &'static str {
        match self {
            Self::List => "List View",
            Self::Graph => "Graph View",
            Self::Orphaned => "Orphaned Packages",
            Self::Investigate => "Investigate",
        }
    }

    /// Message shown while no snapshot is loaded.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::List => {
                "Please select a data file from the dropdown above to view package lists."
            }
            Self::Graph => {
                "Please select a data file from the dropdown above to visualize the dependency graph."
            }
            Self::Orphaned => {
                "Please select a data file from the dropdown above to view orphaned packages."
            }
            Self::Investigate => {
                "Please select a data file from the dropdown above to investigate packages."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn view_modes_parse_from_cli_names() {
        assert_eq!(ViewMode::from_str("orphaned", true), Ok(ViewMode::Orphaned));
        assert_eq!(ViewMode::from_str("Graph", true), Ok(ViewMode::Graph));
        assert!(ViewMode::from_str("tree", true).is_err());
        assert_eq!(ViewMode::default(), ViewMode::List);
    }
}
