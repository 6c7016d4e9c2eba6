pub mod config;
pub mod error;
pub mod generator;
pub mod inject;
pub mod names;
pub mod registry;
pub mod render;
pub mod sizing;
pub mod synth;
pub mod utils;

pub use config::GeneratorConfig;
pub use error::{Result, SynthesisError};
pub use generator::{Chart, ChartGenerator};
pub use inject::ExplicitInput;
pub use names::{LocationNames, NameSupplier};
pub use registry::{Node, NodeRegistry, RegistryMode};
pub use render::{NodeShape, hash_label, render};
pub use sizing::{SizePlan, SizingPolicy};
pub use synth::{Route, RouteStyle, RouteSynthesizer};

pub const CHART_HEADER: &str = "flowchart TD;";
pub const DEFAULT_MIN_NODES: usize = 7;
pub const DEFAULT_MAX_NODES: usize = 21;
pub const DEFAULT_DOTTED_PROBABILITY: f64 = 0.2;
pub const DEFAULT_ANCHOR_RESISTANCE: u32 = 3;
pub const ROUTE_SEPARATOR: char = ';';
pub const PLAIN_START: &str = "--";
pub const PLAIN_END: &str = "-->";
pub const DOTTED_START: &str = "-.";
pub const DOTTED_END: &str = ".->";
pub const UNIQUE_LABEL_ATTEMPTS: usize = 32;
