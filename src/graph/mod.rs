//! Graph text builder
//!
//! Turns a [`CommitHistory`](crate::git::CommitHistory) into a Mermaid
//! flowchart. Pure string building; nothing here touches the filesystem.

mod mermaid;

pub use mermaid::{ancestry_graph, build_graph_text, sequential_graph, Direction, GraphText};
