use tracing::debug;

use crate::error::{Result, SynthesisError};
use crate::registry::NodeRegistry;
use crate::synth::{Route, RouteStyle};
use crate::{DOTTED_END, DOTTED_START, PLAIN_END, PLAIN_START, ROUTE_SEPARATOR};

const START_TOKENS: [&str; 2] = [PLAIN_START, DOTTED_START];
const END_TOKENS: [&str; 2] = [PLAIN_END, DOTTED_END];

/// Caller-supplied anchors and routes, parsed from a `;`-delimited string
/// such as `Keep; Gate -- Old Road --> Keep; Keep -. Tunnel .-> Mine`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitInput {
    /// Bare node names, first-seen order, no duplicates.
    pub anchors: Vec<String>,
    pub routes: Vec<Route>,
}

impl ExplicitInput {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut input = ExplicitInput::default();

        for segment in raw.split(ROUTE_SEPARATOR) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if is_route_expression(segment) {
                input.routes.push(parse_route(segment)?);
            } else if !input.anchors.iter().any(|anchor| anchor == segment) {
                input.anchors.push(segment.to_string());
            }
        }

        debug!(
            anchors = input.anchors.len(),
            routes = input.routes.len(),
            "parsed explicit input"
        );
        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.routes.is_empty()
    }

    /// Registers every anchor and explicit endpoint not already known, with
    /// weight 1 and the given resistance.
    pub fn seed(&self, registry: &mut NodeRegistry, resistance: u32) {
        for anchor in &self.anchors {
            registry.create(anchor, 1, resistance);
        }
        for route in &self.routes {
            registry.create(&route.source, 1, resistance);
            registry.create(&route.destination, 1, resistance);
        }
    }
}

fn is_route_expression(segment: &str) -> bool {
    START_TOKENS
        .iter()
        .chain(END_TOKENS.iter())
        .any(|token| segment.contains(token))
}

fn find_first<'a>(haystack: &str, tokens: &[&'a str]) -> Option<(usize, &'a str)> {
    tokens
        .iter()
        .filter_map(|token| haystack.find(token).map(|idx| (idx, *token)))
        .min_by_key(|(idx, _)| *idx)
}

fn parse_route(expression: &str) -> Result<Route> {
    let Some((start_idx, start_token)) = find_first(expression, &START_TOKENS) else {
        return Err(SynthesisError::malformed(
            expression,
            "missing '--' or '-.' before the route caption",
        ));
    };

    let source = expression[..start_idx].trim();
    let rest = &expression[start_idx + start_token.len()..];

    let Some((end_idx, end_token)) = find_first(rest, &END_TOKENS) else {
        return Err(SynthesisError::malformed(
            expression,
            "missing '-->' or '.->' after the route caption",
        ));
    };

    let via = rest[..end_idx].trim();
    let destination = rest[end_idx + end_token.len()..].trim();

    if is_route_expression(destination) {
        return Err(SynthesisError::malformed(
            expression,
            "chained routes must be separated with ';'",
        ));
    }
    for (part, name) in [(source, "source"), (via, "caption"), (destination, "destination")] {
        if part.is_empty() {
            return Err(SynthesisError::malformed(
                expression,
                format!("empty {name}"),
            ));
        }
    }

    let style = if expression.contains(DOTTED_START) {
        RouteStyle::Dotted
    } else {
        RouteStyle::Plain
    };

    Ok(Route::new(source, destination, via, style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryMode;

    #[test]
    fn bare_name_becomes_anchor() -> Result<()> {
        let input = ExplicitInput::parse("Test City")?;
        assert_eq!(input.anchors, ["Test City"]);
        assert!(input.routes.is_empty());
        Ok(())
    }

    #[test]
    fn plain_route_expression() -> Result<()> {
        let input = ExplicitInput::parse("Test Source City -- Test Path --> Test Destination City")?;

        assert!(input.anchors.is_empty());
        assert_eq!(
            input.routes,
            [Route::new(
                "Test Source City",
                "Test Destination City",
                "Test Path",
                RouteStyle::Plain
            )]
        );

        let mut registry = NodeRegistry::new(RegistryMode::Simple);
        input.seed(&mut registry, 0);
        assert_eq!(registry.weight("Test Source City")?, 1);
        assert_eq!(registry.weight("Test Destination City")?, 1);
        Ok(())
    }

    #[test]
    fn dotted_route_expression() -> Result<()> {
        let input =
            ExplicitInput::parse("Test Source City -. Test Hidden Path .-> Test Destination City")?;

        let route = &input.routes[0];
        assert_eq!(route.style, RouteStyle::Dotted);
        assert_eq!(route.via, "Test Hidden Path");
        assert_eq!(route.destination, "Test Destination City");
        Ok(())
    }

    #[test]
    fn mixed_segments_split_on_semicolon() -> Result<()> {
        let input = ExplicitInput::parse(
            "Test Source City -. Test Hidden Path .-> Test Destination City; Test City; Test City",
        )?;

        assert_eq!(input.anchors, ["Test City"]);
        assert_eq!(input.routes.len(), 1);
        Ok(())
    }

    #[test]
    fn anchor_that_is_also_an_endpoint_is_seeded_once() -> Result<()> {
        let input = ExplicitInput::parse(
            "Test Source City -. Test Hidden Path .-> Test Destination City; Test Source City",
        )?;
        let mut registry = NodeRegistry::new(RegistryMode::Simple);
        input.seed(&mut registry, 0);

        assert_eq!(input.anchors, ["Test Source City"]);
        assert_eq!(registry.len(), 2);
        Ok(())
    }

    #[test]
    fn anchor_aware_seed_sets_resistance() -> Result<()> {
        let input = ExplicitInput::parse("Keep; Gate -- Road --> Keep")?;
        let mut registry = NodeRegistry::new(RegistryMode::AnchorAware);

        input.seed(&mut registry, 3);

        for label in ["Keep", "Gate"] {
            let node = registry.get(label)?;
            assert_eq!((node.weight, node.resistance), (1, 3));
        }
        Ok(())
    }

    #[test]
    fn seed_keeps_existing_nodes() -> Result<()> {
        let input = ExplicitInput::parse("Keep")?;
        let mut registry = NodeRegistry::new(RegistryMode::Simple);
        registry.create("Keep", 1, 0);
        registry.touch("Keep")?;

        input.seed(&mut registry, 0);

        assert_eq!(registry.weight("Keep")?, 2);
        Ok(())
    }

    #[test]
    fn empty_segments_are_ignored() -> Result<()> {
        let input = ExplicitInput::parse(" ; ;")?;
        assert!(input.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_missing_end_token() {
        let err = ExplicitInput::parse("Gate -- Road Keep").unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedRoute { .. }));
    }

    #[test]
    fn rejects_missing_start_token() {
        let err = ExplicitInput::parse("Gate Road --> Keep").unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedRoute { .. }));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(ExplicitInput::parse("-- Road --> Keep").is_err());
        assert!(ExplicitInput::parse("Gate -- --> Keep").is_err());
        assert!(ExplicitInput::parse("Gate -- Road -->").is_err());
    }

    #[test]
    fn rejects_chained_routes() {
        let err = ExplicitInput::parse("A -- x --> B -- y --> C").unwrap_err();
        assert!(matches!(err, SynthesisError::MalformedRoute { .. }));
    }
}
