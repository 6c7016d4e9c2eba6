use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{Result, SynthesisError};

/// Whether touches honour per-node resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryMode {
    #[default]
    Simple,
    AnchorAware,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub label: String,
    pub weight: u32,
    pub usage: u32,
    pub resistance: u32,
}

impl Node {
    fn new(label: &str, weight: u32, resistance: u32) -> Self {
        Self {
            label: label.to_string(),
            weight: weight.max(1),
            usage: 1,
            resistance,
        }
    }
}

/// Per-run node state keyed by label. Insertion order is kept so summaries
/// list nodes the way they were introduced.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    mode: RegistryMode,
    nodes: HashMap<String, Node>,
    order: Vec<String>,
}

impl NodeRegistry {
    pub fn new(mode: RegistryMode) -> Self {
        Self {
            mode,
            nodes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers `label` unless it already exists. An existing node is left
    /// untouched, so a colliding label never resets accumulated weight.
    pub fn create(&mut self, label: &str, initial_weight: u32, initial_resistance: u32) -> &Node {
        let resistance = match self.mode {
            RegistryMode::Simple => 0,
            RegistryMode::AnchorAware => initial_resistance,
        };
        match self.nodes.entry(label.to_string()) {
            Entry::Vacant(entry) => {
                self.order.push(label.to_string());
                entry.insert(Node::new(label, initial_weight, resistance))
            }
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    pub fn get(&self, label: &str) -> Result<&Node> {
        self.nodes
            .get(label)
            .ok_or_else(|| SynthesisError::not_found(label))
    }

    pub fn weight(&self, label: &str) -> Result<u32> {
        self.get(label).map(|node| node.weight)
    }

    /// Records that `label` was chosen as a merge endpoint.
    pub fn touch(&mut self, label: &str) -> Result<()> {
        let mode = self.mode;
        let node = self
            .nodes
            .get_mut(label)
            .ok_or_else(|| SynthesisError::not_found(label))?;

        if mode == RegistryMode::AnchorAware && node.resistance > 0 {
            node.resistance -= 1;
        } else {
            node.weight += 1;
        }
        node.usage += 1;
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.nodes.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|label| self.nodes.get(label))
    }
}
