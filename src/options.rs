use crate::errors::{ContextError, Result};
use crate::host::{Request, TransformFn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// The transform applied after defaults: either the name of a
/// server-registered function (resolved at merge time) or a function
/// supplied directly at construction.
#[derive(Clone)]
pub enum ContextHandler {
    Named(String),
    Direct(Arc<TransformFn>),
}

impl ContextHandler {
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(Value, &dyn Request) -> Value + Send + Sync + 'static,
    {
        Self::Direct(Arc::new(f))
    }
}

impl fmt::Debug for ContextHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Direct(_) => f.debug_tuple("Direct").field(&"<fn>").finish(),
        }
    }
}

// Host config can only name a handler; direct functions are code-supplied.
impl<'de> Deserialize<'de> for ContextHandler {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::Named(name))
    }
}

/// Plugin options, fixed once at construction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Default context entries. Keys may be dotted paths; entries apply in
    /// insertion order, so later entries win at colliding paths.
    pub context: Map<String, Value>,
    /// Optional transform applied after defaults and request additions.
    /// Its output never overrides keys already present.
    pub context_handler: Option<ContextHandler>,
    /// When set, requests carrying a `context` query parameter log their
    /// final context on completion.
    pub enable_debug: bool,
}

impl Options {
    /// Lift options out of a JSON fragment of the host's configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ContextError::Options(e.to_string()))
    }

    pub fn with_context(mut self, defaults: Map<String, Value>) -> Self {
        self.context = defaults;
        self
    }

    pub fn with_handler(mut self, handler: ContextHandler) -> Self {
        self.context_handler = Some(handler);
        self
    }

    pub fn with_debug(mut self) -> Self {
        self.enable_debug = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn options_from_config_json() {
        let opts = Options::from_json(
            r#"{
                "context": {"something": "Something", "nested.something": "Nested"},
                "context_handler": "viewContext",
                "enable_debug": true
            }"#,
        )
        .unwrap();
        assert_eq!(opts.context.get("something"), Some(&json!("Something")));
        assert!(opts.enable_debug);
        match opts.context_handler {
            Some(ContextHandler::Named(name)) => assert_eq!(name, "viewContext"),
            other => panic!("expected named handler, got {other:?}"),
        }
    }

    #[test]
    fn options_default_is_empty() {
        let opts = Options::from_json("{}").unwrap();
        assert!(opts.context.is_empty());
        assert!(opts.context_handler.is_none());
        assert!(!opts.enable_debug);
    }

    #[test]
    fn bad_options_report_error() {
        let err = Options::from_json(r#"{"context": 42}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid options:"));
    }
}
