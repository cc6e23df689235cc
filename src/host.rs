use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity of an in-flight request, assigned by the host framework.
pub type RequestId = u64;

/// A context transform supplied by the host application. Receives the
/// context assembled so far plus the request, returns a context value.
pub type TransformFn = dyn Fn(Value, &dyn Request) -> Value + Send + Sync;

/// What the merge pipeline needs from the host's request object.
pub trait Request {
    fn id(&self) -> RequestId;
    fn path(&self) -> &str;
    /// Parsed query parameters. Only inspected by the debug hook.
    fn query(&self) -> &Map<String, Value>;
}

/// Response classification tag. Only `View` responses carry a template
/// context and are touched by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variety {
    View,
    Plain,
    Stream,
}

/// Mutable slice of the host's response the pipeline writes into.
pub trait Response {
    fn variety(&self) -> Variety;
    fn context(&self) -> Option<&Value>;
    fn set_context(&mut self, context: Value);
}

/// Read-only lookup for server-registered named functions. Resolution
/// happens at merge time, every time, so functions registered after plugin
/// init are still found.
pub trait MethodLookup: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<TransformFn>>;
}

/// Thread-safe named-function registry for hosts that don't bring their own.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    inner: Arc<HashMap<String, Arc<TransformFn>>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, f: F)
    where
        F: Fn(Value, &dyn Request) -> Value + Send + Sync + 'static,
    {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(name.to_string(), Arc::new(f));
    }
}

impl MethodLookup for MethodRegistry {
    fn get(&self, name: &str) -> Option<Arc<TransformFn>> {
        self.inner.get(name).cloned()
    }
}

/// Lookup that resolves nothing, for hosts without a method registry.
#[derive(Clone, Copy, Default)]
pub struct NoMethods;

impl MethodLookup for NoMethods {
    fn get(&self, _name: &str) -> Option<Arc<TransformFn>> {
        None
    }
}
