pub mod a_star;
pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;
pub mod jps;

use crate::error::SearchError;
use std::fmt;
use std::str::FromStr;

pub use common::{SearchAlgorithm, SearchContext, SearchResult};

/// The interchangeable search strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
    GreedyBestFirst,
    JumpPoint,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::GreedyBestFirst,
        Algorithm::JumpPoint,
        Algorithm::Bidirectional,
    ];

    /// Short name accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::DepthFirst => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a_star",
            Algorithm::GreedyBestFirst => "greedy",
            Algorithm::JumpPoint => "jps",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.key()).collect()
    }

    /// A fresh strategy instance; every run owns its own search state.
    pub fn instantiate(self) -> Box<dyn SearchAlgorithm> {
        match self {
            Algorithm::BreadthFirst => Box::new(bfs::BreadthFirst::new()),
            Algorithm::DepthFirst => Box::new(dfs::DepthFirst::new()),
            Algorithm::Dijkstra => Box::new(dijkstra::Dijkstra::new()),
            Algorithm::AStar => Box::new(a_star::AStar::new()),
            Algorithm::GreedyBestFirst => Box::new(greedy::GreedyBestFirst::new()),
            Algorithm::JumpPoint => Box::new(jps::JumpPoint::new()),
            Algorithm::Bidirectional => Box::new(bidirectional::Bidirectional::new()),
        }
    }

    /// Whether the strategy always returns a shortest route.
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            Algorithm::BreadthFirst | Algorithm::Dijkstra | Algorithm::AStar | Algorithm::JumpPoint
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        let alias = match wanted.as_str() {
            "astar" | "a*" => "a_star",
            "gbfs" | "greedy_best_first" => "greedy",
            "jump_point" => "jps",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|a| a.key() == alias)
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_aliases() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("A-Star".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("gbfs".parse::<Algorithm>().unwrap(), Algorithm::GreedyBestFirst);
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm("bogo".into()))
        );
    }

    #[test]
    fn instances_report_their_names() {
        let names: Vec<_> = Algorithm::ALL
            .iter()
            .map(|a| a.instantiate().name())
            .collect();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"Jump Point Search"));
    }
}
