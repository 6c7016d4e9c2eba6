use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::DEFAULT_DOTTED_PROBABILITY;
use crate::error::{Result, SynthesisError};
use crate::registry::NodeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    Plain,
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub source: String,
    pub destination: String,
    pub via: String,
    pub style: RouteStyle,
}

impl Route {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        via: impl Into<String>,
        style: RouteStyle,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            via: via.into(),
            style,
        }
    }
}

/// Returns [`RouteStyle::Dotted`] with probability `dotted_probability`.
pub fn random_style<R: Rng + ?Sized>(rng: &mut R, dotted_probability: f64) -> RouteStyle {
    if rng.r#gen::<f64>() < dotted_probability {
        RouteStyle::Dotted
    } else {
        RouteStyle::Plain
    }
}

/// First-use markers for the node pool.
struct Coverage {
    used: HashMap<String, bool>,
    remaining: usize,
}

impl Coverage {
    fn new(labels: &[String]) -> Self {
        let used: HashMap<String, bool> = labels.iter().map(|l| (l.clone(), false)).collect();
        let remaining = used.len();
        Self { used, remaining }
    }

    fn all_used(&self) -> bool {
        self.remaining == 0
    }

    /// Marks `label` used; returns false when it already was.
    fn claim(&mut self, label: &str) -> bool {
        match self.used.get_mut(label) {
            Some(flag) if !*flag => {
                *flag = true;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteSynthesizer {
    pub dotted_probability: f64,
    /// Merge endpoints with weight 1 win over the coin flip.
    pub prefer_light_endpoints: bool,
}

impl Default for RouteSynthesizer {
    fn default() -> Self {
        Self {
            dotted_probability: DEFAULT_DOTTED_PROBABILITY,
            prefer_light_endpoints: false,
        }
    }
}

impl RouteSynthesizer {
    pub fn new(dotted_probability: f64, prefer_light_endpoints: bool) -> Self {
        Self {
            dotted_probability,
            prefer_light_endpoints,
        }
    }

    /// Produces exactly one route per edge label, in order. Every node label
    /// is registered first; labels already present (anchors) keep their state.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        node_labels: &[String],
        edge_labels: &[String],
        registry: &mut NodeRegistry,
    ) -> Result<Vec<Route>> {
        if node_labels.is_empty() && !edge_labels.is_empty() {
            return Err(SynthesisError::InvariantViolation(format!(
                "{} edge labels supplied without any node labels",
                edge_labels.len()
            )));
        }

        for label in node_labels {
            registry.create(label, 1, 0);
        }

        let mut coverage = Coverage::new(node_labels);
        let mut routes = Vec::with_capacity(edge_labels.len());

        for via in edge_labels {
            if coverage.all_used() {
                self.merge(rng, &mut routes, via, registry)?;
            } else {
                let source = pick_unused_preferred(rng, node_labels, &mut coverage)?;
                let destination = pick_unused_preferred(rng, node_labels, &mut coverage)?;
                let route = Route::new(
                    source,
                    destination,
                    via.as_str(),
                    random_style(rng, self.dotted_probability),
                );
                trace!(source = %route.source, destination = %route.destination, "coverage route");
                routes.push(route);
            }
        }

        Ok(routes)
    }

    fn merge<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        routes: &mut Vec<Route>,
        via: &str,
        registry: &mut NodeRegistry,
    ) -> Result<()> {
        if routes.len() < 2 {
            return Err(SynthesisError::InvariantViolation(format!(
                "merge needs at least two existing routes, found {}",
                routes.len()
            )));
        }

        let first = select_route(rng, routes, None, registry)?;
        let second = select_route(rng, routes, Some(first), registry)?;

        let source = self.pick_endpoint(rng, &routes[first], registry)?;
        let destination = self.pick_endpoint(rng, &routes[second], registry)?;

        registry.touch(&source)?;
        registry.touch(&destination)?;
        debug!(first, second, %source, %destination, "merged route");

        let style = random_style(rng, self.dotted_probability);
        routes.push(Route::new(source, destination, via, style));
        Ok(())
    }

    fn pick_endpoint<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        route: &Route,
        registry: &NodeRegistry,
    ) -> Result<String> {
        if self.prefer_light_endpoints {
            if registry.weight(&route.source)? == 1 {
                return Ok(route.source.clone());
            }
            if registry.weight(&route.destination)? == 1 {
                return Ok(route.destination.clone());
            }
        }

        let endpoint = if rng.gen_bool(0.5) {
            &route.source
        } else {
            &route.destination
        };
        Ok(endpoint.clone())
    }
}

/// Picks a label, steering toward ones not used yet. Once every label is
/// used any label may come back, including one picked a moment ago.
fn pick_unused_preferred<'a, R: Rng + ?Sized>(
    rng: &mut R,
    labels: &'a [String],
    coverage: &mut Coverage,
) -> Result<&'a str> {
    if coverage.all_used() {
        return labels
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| SynthesisError::InvariantViolation("empty node pool".to_string()));
    }

    let mut candidates: Vec<usize> = (0..labels.len()).collect();
    candidates.shuffle(rng);
    for idx in candidates {
        if coverage.claim(&labels[idx]) {
            return Ok(&labels[idx]);
        }
    }

    Err(SynthesisError::InvariantViolation(
        "coverage reported unused labels that are not in the pool".to_string(),
    ))
}

/// Prefers routes touching weight-1 nodes, then weight-2, then any route.
fn select_route<R: Rng + ?Sized>(
    rng: &mut R,
    routes: &[Route],
    exclude: Option<usize>,
    registry: &NodeRegistry,
) -> Result<usize> {
    for weight in [1, 2] {
        if let Some(idx) = find_route(routes, exclude, weight, registry)? {
            return Ok(idx);
        }
    }

    let candidates: Vec<usize> = (0..routes.len())
        .filter(|idx| Some(*idx) != exclude)
        .collect();
    candidates.choose(rng).copied().ok_or_else(|| {
        SynthesisError::InvariantViolation("no route left to merge with".to_string())
    })
}

fn find_route(
    routes: &[Route],
    exclude: Option<usize>,
    weight: u32,
    registry: &NodeRegistry,
) -> Result<Option<usize>> {
    for (idx, route) in routes.iter().enumerate() {
        if Some(idx) == exclude {
            continue;
        }
        if registry.weight(&route.source)? == weight || registry.weight(&route.destination)? == weight
        {
            return Ok(Some(idx));
        }
    }
    Ok(None)
}
