use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::inject::ExplicitInput;
use crate::names::{LocationNames, NameSupplier};
use crate::registry::{Node, NodeRegistry};
use crate::render::render;
use crate::sizing::SizePlan;
use crate::synth::{Route, RouteSynthesizer};

/// Outcome of one run: the routes in output order, the final node state and
/// the rendered Mermaid text.
#[derive(Debug, Clone)]
pub struct Chart {
    pub plan: SizePlan,
    pub routes: Vec<Route>,
    pub registry: NodeRegistry,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChartSummary<'a> {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub nodes: Vec<&'a Node>,
    pub routes: &'a [Route],
    pub chart: &'a str,
}

impl Chart {
    pub fn summary(&self) -> ChartSummary<'_> {
        ChartSummary {
            num_nodes: self.plan.num_nodes,
            num_edges: self.plan.num_edges,
            nodes: self.registry.iter().collect(),
            routes: &self.routes,
            chart: &self.text,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.summary())
    }
}

pub struct ChartGenerator<S: NameSupplier = LocationNames> {
    config: GeneratorConfig,
    names: S,
    rng: StdRng,
}

impl ChartGenerator<LocationNames> {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_names(config, LocationNames)
    }
}

impl<S: NameSupplier> ChartGenerator<S> {
    pub fn with_names(config: GeneratorConfig, names: S) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, names, rng })
    }

    /// Parses `explicit` (if any) and runs one synthesis.
    pub fn generate(&mut self, explicit: Option<&str>) -> Result<Chart> {
        let explicit = match explicit {
            Some(raw) => ExplicitInput::parse(raw)?,
            None => ExplicitInput::default(),
        };
        self.generate_with(&explicit)
    }

    pub fn generate_with(&mut self, explicit: &ExplicitInput) -> Result<Chart> {
        let mut registry = NodeRegistry::new(self.config.registry_mode());
        explicit.seed(&mut registry, self.config.effective_resistance());

        let plan = self
            .config
            .sizing_policy()
            .plan(&mut self.rng, explicit.anchors.len())?;

        let (mut node_labels, edge_labels) = if self.config.unique_labels {
            let mut taken: HashSet<String> = registry.iter().map(|n| n.label.clone()).collect();
            let nodes = self
                .names
                .supply_distinct(&mut self.rng, plan.generated_nodes, &mut taken);
            let edges =
                self.names
                    .supply_distinct(&mut self.rng, plan.num_edges, &mut HashSet::new());
            (nodes, edges)
        } else {
            (
                self.names.supply(&mut self.rng, plan.generated_nodes),
                self.names.supply(&mut self.rng, plan.num_edges),
            )
        };
        node_labels.extend(explicit.anchors.iter().cloned());

        let synthesizer =
            RouteSynthesizer::new(self.config.dotted_probability, self.config.anchor_aware);
        let mut routes =
            synthesizer.synthesize(&mut self.rng, &node_labels, &edge_labels, &mut registry)?;
        routes.extend(explicit.routes.iter().cloned());

        let text = render(&routes, &registry)?;
        info!(
            nodes = registry.len(),
            routes = routes.len(),
            anchor_aware = self.config.anchor_aware,
            "generated chart"
        );

        Ok(Chart {
            plan,
            routes,
            registry,
            text,
        })
    }
}
