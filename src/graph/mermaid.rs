//! Mermaid flowchart text for a commit history
//!
//! Two edge policies, picked by the history representation:
//! - ancestry: one `parent --> child` edge per recorded parent, left to right
//! - sequential: one edge per adjacent pair of hashes, top down

use std::fmt::{self, Write};

use crate::git::{CommitHistory, CommitRef};

/// Flowchart orientation, written as the header token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftRight,
    TopDown,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::TopDown => "TD",
        }
    }
}

/// A complete Mermaid document ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphText(String);

impl GraphText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of `-->` edge lines.
    pub fn edge_count(&self) -> usize {
        self.0.lines().skip(1).count()
    }
}

impl fmt::Display for GraphText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct GraphWriter {
    out: String,
}

impl GraphWriter {
    fn new(direction: Direction) -> Self {
        Self {
            out: format!("graph {}\n", direction.as_str()),
        }
    }

    fn edge(&mut self, from: &str, to: &str) {
        // Writing to a String cannot fail.
        let _ = writeln!(self.out, "    {} --> {}", from, to);
    }

    fn finish(self) -> GraphText {
        GraphText(self.out)
    }
}

/// Build the graph text for `history`, choosing the policy by representation.
pub fn build_graph_text(history: &CommitHistory) -> GraphText {
    match history {
        CommitHistory::Ancestry(commits) => ancestry_graph(commits),
        CommitHistory::Sequential(hashes) => sequential_graph(hashes),
    }
}

/// `parent --> commit` for every parent of every commit, in input order.
/// Duplicate edges are kept.
pub fn ancestry_graph(commits: &[CommitRef]) -> GraphText {
    let mut graph = GraphWriter::new(Direction::LeftRight);
    for commit in commits {
        for parent in &commit.parents {
            graph.edge(parent, &commit.hash);
        }
    }
    graph.finish()
}

/// `hashes[i] --> hashes[i + 1]` for each adjacent pair.
pub fn sequential_graph(hashes: &[String]) -> GraphText {
    let mut graph = GraphWriter::new(Direction::TopDown);
    for pair in hashes.windows(2) {
        graph.edge(&pair[0], &pair[1]);
    }
    graph.finish()
}
