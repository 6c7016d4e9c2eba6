use rand::Rng;
use tracing::debug;

use crate::error::{Result, SynthesisError};
use crate::{DEFAULT_ANCHOR_RESISTANCE, DEFAULT_MAX_NODES, DEFAULT_MIN_NODES};

/// Extra edge budget granted for anchors, given the anchor count and the
/// resistance each anchor starts with.
pub type EdgeInflation = fn(anchors: usize, resistance: u32) -> usize;

/// Anchors soak up `resistance` touches before growing, so give each one
/// `resistance - 1` more edges.
pub fn resistance_inflation(anchors: usize, resistance: u32) -> usize {
    anchors * resistance.saturating_sub(1) as usize
}

pub fn no_inflation(_anchors: usize, _resistance: u32) -> usize {
    0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePlan {
    /// Size of the synthesis pool, anchors included.
    pub num_nodes: usize,
    /// Labels the name supplier must produce for the pool.
    pub generated_nodes: usize,
    pub min_edges: usize,
    pub max_edges: usize,
    pub num_edges: usize,
}

#[derive(Debug, Clone)]
pub struct SizingPolicy {
    pub min_nodes: usize,
    /// Exclusive upper bound before anchors are subtracted.
    pub max_nodes: usize,
    pub resistance: u32,
    pub inflation: EdgeInflation,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            min_nodes: DEFAULT_MIN_NODES,
            max_nodes: DEFAULT_MAX_NODES,
            resistance: DEFAULT_ANCHOR_RESISTANCE,
            inflation: no_inflation,
        }
    }
}

impl SizingPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.min_nodes < 3 {
            return Err(SynthesisError::InvalidConfig(format!(
                "min_nodes must be at least 3, got {}",
                self.min_nodes
            )));
        }
        if self.max_nodes <= self.min_nodes {
            return Err(SynthesisError::InvalidConfig(format!(
                "max_nodes ({}) must exceed min_nodes ({})",
                self.max_nodes, self.min_nodes
            )));
        }
        Ok(())
    }

    /// Draws node and edge counts for a run with `anchors` caller-seeded
    /// nodes. Anchors shrink the node range but the pool never holds fewer
    /// nodes than anchors; the edge ceiling may grow via the inflation
    /// function.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R, anchors: usize) -> Result<SizePlan> {
        self.validate()?;

        let upper = self
            .max_nodes
            .saturating_sub(anchors)
            .max(self.min_nodes + 1);
        // the pool always holds every anchor
        let num_nodes = rng.gen_range(self.min_nodes..upper).max(anchors);

        let min_edges = num_nodes - 1;
        let max_edges = (num_nodes * 2 - 5 + (self.inflation)(anchors, self.resistance))
            .max(min_edges);
        let num_edges = rng.gen_range(min_edges..=max_edges);

        let plan = SizePlan {
            num_nodes,
            generated_nodes: num_nodes.saturating_sub(anchors),
            min_edges,
            max_edges,
            num_edges,
        };
        debug!(?plan, anchors, "sized chart");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn plans_stay_within_bounds() {
        let policy = SizingPolicy::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = policy.plan(&mut rng, 0).unwrap();

            assert!((7..21).contains(&plan.num_nodes));
            assert_eq!(plan.min_edges, plan.num_nodes - 1);
            assert_eq!(plan.max_edges, plan.num_nodes * 2 - 5);
            assert!((plan.min_edges..=plan.max_edges).contains(&plan.num_edges));
            assert_eq!(plan.generated_nodes, plan.num_nodes);
        }
    }

    #[test]
    fn anchors_shrink_node_range_and_generated_count() {
        let policy = SizingPolicy::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = policy.plan(&mut rng, 4).unwrap();

            assert!((7..17).contains(&plan.num_nodes));
            assert_eq!(plan.generated_nodes, plan.num_nodes - 4);
        }
    }

    #[test]
    fn anchors_beyond_range_size_the_pool() {
        let policy = SizingPolicy::default();
        let mut rng = StdRng::seed_from_u64(8);
        let plan = policy.plan(&mut rng, 16).unwrap();

        assert_eq!(plan.num_nodes, 16);
        assert_eq!(plan.generated_nodes, 0);
    }

    #[test]
    fn pool_grows_to_hold_every_anchor() {
        let policy = SizingPolicy::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = policy.plan(&mut rng, 30).unwrap();

            assert_eq!(plan.num_nodes, 30);
            assert_eq!(plan.generated_nodes, 0);
            assert_eq!(plan.min_edges, 29);
            assert!((plan.min_edges..=plan.max_edges).contains(&plan.num_edges));
        }
    }

    #[test]
    fn resistance_inflation_raises_edge_ceiling() {
        let policy = SizingPolicy {
            inflation: resistance_inflation,
            ..SizingPolicy::default()
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = policy.plan(&mut rng, 2).unwrap();
            assert_eq!(plan.max_edges, plan.num_nodes * 2 - 5 + 2 * 2);
        }
    }

    #[test]
    fn custom_inflation_is_honoured() {
        fn flat_ten(_: usize, _: u32) -> usize {
            10
        }
        let policy = SizingPolicy {
            inflation: flat_ten,
            ..SizingPolicy::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let plan = policy.plan(&mut rng, 1).unwrap();
        assert_eq!(plan.max_edges, plan.num_nodes * 2 + 5);
    }

    #[test]
    fn rejects_degenerate_ranges() {
        let policy = SizingPolicy {
            min_nodes: 2,
            ..SizingPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(SynthesisError::InvalidConfig(_))
        ));

        let policy = SizingPolicy {
            min_nodes: 9,
            max_nodes: 9,
            ..SizingPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
