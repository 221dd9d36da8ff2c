//! Database-free building blocks shared by the lectern backend: preview text,
//! date formatting, thesaurus term lists and graph shaping.

pub mod blog;
pub mod date;
pub mod graph;
pub mod terms;
pub mod text;

pub use blog::BlogResponse;
pub use date::pretty;
pub use graph::{Graph, GraphLink, GraphNode, LinkStrength};
pub use terms::Terms;
pub use text::{contains_link, truncate};
