//! Node-link graph for the visual thesaurus.
//!
//! A graph is centred on one entry: the entry itself is the `root` node, two
//! group nodes (`synonym`, `antonym`) hang off it with strong links, and each
//! related word hangs off its group with a weak link.

use crate::terms::Terms;
use serde::{Deserialize, Serialize};

pub const ROOT: &str = "root";
pub const SYNONYM: &str = "synonym";
pub const ANTONYM: &str = "antonym";

const ROOT_GROUP: u8 = 0;
const SYNONYM_GROUP: u8 = 1;
const ANTONYM_GROUP: u8 = 2;

const ROOT_LEVEL: u8 = 0;
const GROUP_LEVEL: u8 = 1;
const LEAF_LEVEL: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkStrength {
    /// root to group
    pub strong: f64,
    /// group to leaf
    pub weak: f64,
}

impl Default for LinkStrength {
    fn default() -> Self {
        LinkStrength {
            strong: 0.7,
            weak: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub group: u8,
    pub label: String,
    pub level: u8,
    /// Stored entry this node stands for, when one exists.
    pub node_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub target: String,
    pub source: String,
    pub strength: f64,
}

/// The parts of a thesaurus entry a graph is drawn from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i32,
    pub title: String,
    pub definition: String,
    pub example: String,
    pub order: i32,
    pub synonyms: Terms,
    pub antonyms: Terms,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub title: String,
    pub definition: String,
    pub example: String,
    pub order: i32,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    /// Builds the graph around `entry`. `resolve` maps a related word to the
    /// id of the entry with exactly that title.
    pub fn new(entry: &Entry, strength: LinkStrength, resolve: impl Fn(&str) -> Option<i32>) -> Self {
        let mut graph = Graph {
            title: entry.title.clone(),
            definition: entry.definition.clone(),
            example: entry.example.clone(),
            order: entry.order,
            nodes: vec![
                node(ROOT, ROOT_GROUP, &entry.title, ROOT_LEVEL, Some(entry.id)),
                node(SYNONYM, SYNONYM_GROUP, "", GROUP_LEVEL, None),
                node(ANTONYM, ANTONYM_GROUP, "", GROUP_LEVEL, None),
            ],
            links: vec![
                link(ROOT, SYNONYM, strength.strong),
                link(ROOT, ANTONYM, strength.strong),
            ],
        };

        graph.add_leaves(SYNONYM, SYNONYM_GROUP, &entry.synonyms, strength.weak, &resolve);
        graph.add_leaves(ANTONYM, ANTONYM_GROUP, &entry.antonyms, strength.weak, &resolve);
        graph
    }

    fn add_leaves(
        &mut self,
        group_id: &str,
        group: u8,
        terms: &Terms,
        strength: f64,
        resolve: &impl Fn(&str) -> Option<i32>,
    ) {
        for term in terms.iter() {
            self.links.push(link(group_id, term, strength));
            self.nodes
                .push(node(term, group, term, LEAF_LEVEL, resolve(term)));
        }
    }

    pub fn leaves(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.level == LEAF_LEVEL)
    }
}

fn node(id: &str, group: u8, label: &str, level: u8, node_id: Option<i32>) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        group,
        label: label.to_string(),
        level,
        node_id,
    }
}

fn link(target: &str, source: &str, strength: f64) -> GraphLink {
    GraphLink {
        target: target.to_string(),
        source: source.to_string(),
        strength,
    }
}
