//! Name-to-constructor table for matchers.

use serde::Deserialize;
use serde_json::Value;

use crate::Matcher;
use crate::coma::{Coma, ComaConfig};
use crate::error::{MatchError, Result};

/// Builds a matcher from its configured arguments.
pub type MatcherFactory = fn(&Value) -> Result<Box<dyn Matcher>>;

const MATCHERS: &[(&str, MatcherFactory)] = &[("coma", build_coma)];

fn build_coma(args: &Value) -> Result<Box<dyn Matcher>> {
    let config = if args.is_null() {
        ComaConfig::default()
    } else {
        ComaConfig::deserialize(args).map_err(|source| MatchError::InvalidArgs {
            matcher: "coma".to_string(),
            source,
        })?
    };
    Ok(Box::new(Coma::new(config)))
}

/// Names of all registered matchers.
pub fn matcher_names() -> Vec<&'static str> {
    MATCHERS.iter().map(|(name, _)| *name).collect()
}

/// Looks up a matcher factory by name.
pub fn resolve_matcher(name: &str) -> Result<MatcherFactory> {
    MATCHERS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, factory)| *factory)
        .ok_or_else(|| MatchError::UnknownMatcher {
            name: name.to_string(),
            known: matcher_names().join(", "),
        })
}

/// Resolves the named matcher and builds it from `args`.
pub fn build_matcher(name: &str, args: &Value) -> Result<Box<dyn Matcher>> {
    let factory = resolve_matcher(name)?;
    factory(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_coma_with_defaults() {
        let matcher = build_matcher("coma", &Value::Null).expect("build coma");
        assert_eq!(matcher.name(), "coma");
    }

    #[test]
    fn unknown_matcher_is_a_lookup_error() {
        let err = build_matcher("cupid", &Value::Null).err().expect("lookup error");
        insta::assert_snapshot!(err.to_string(), @"unknown matcher 'cupid' (known: coma)");
    }

    #[test]
    fn rejects_unknown_arguments() {
        let err = build_matcher("coma", &serde_json::json!({"max_m": 1}))
            .err()
            .expect("invalid args");
        assert!(matches!(err, MatchError::InvalidArgs { .. }));
    }
}
