use std::fmt::Write as FmtWrite;

use crate::CHART_HEADER;
use crate::error::{Result, SynthesisError};
use crate::registry::NodeRegistry;
use crate::synth::{Route, RouteStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Rounded,
    Stadium,
    Subroutine,
    Circle,
    DoubleCircle,
}

impl NodeShape {
    /// Saturating map from connectivity weight to shape.
    pub fn from_weight(weight: u32) -> Self {
        match weight {
            0 | 1 => NodeShape::Rounded,
            2 => NodeShape::Stadium,
            3 => NodeShape::Subroutine,
            4 => NodeShape::Circle,
            _ => NodeShape::DoubleCircle,
        }
    }

    fn format_spec(&self, label: &str) -> String {
        match self {
            NodeShape::Rounded => format!("({label})"),
            NodeShape::Stadium => format!("([{label}])"),
            NodeShape::Subroutine => format!("[[{label}]]"),
            NodeShape::Circle => format!("(({label}))"),
            NodeShape::DoubleCircle => format!("((({label})))"),
        }
    }
}

impl RouteStyle {
    fn connector(&self, via: &str) -> String {
        match self {
            RouteStyle::Dotted => format!("-.{via}.->"),
            RouteStyle::Plain => format!("--{via}---"),
        }
    }
}

/// Stable id for a label: `h = h * 31 + unit` over UTF-16 code units with
/// 32-bit wrapping, then the magnitude.
pub fn hash_label(label: &str) -> u32 {
    label
        .encode_utf16()
        .fold(0_i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

fn node_spec(label: &str, registry: &NodeRegistry) -> Result<String> {
    let node = registry.get(label)?;
    let shape = NodeShape::from_weight(node.weight);
    Ok(format!("{}{}", hash_label(label), shape.format_spec(label)))
}

/// Renders routes in the order given, one line each, shapes taken from the
/// registry's final weights.
pub fn render(routes: &[Route], registry: &NodeRegistry) -> Result<String> {
    let mut chart = String::new();
    chart.push_str(CHART_HEADER);
    chart.push('\n');

    for route in routes {
        let source = node_spec(&route.source, registry)?;
        let destination = node_spec(&route.destination, registry)?;
        writeln!(
            chart,
            "{} {} {}",
            source,
            route.style.connector(&route.via),
            destination
        )
        .map_err(|err| SynthesisError::InvariantViolation(err.to_string()))?;
    }

    Ok(chart)
}
