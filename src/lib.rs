pub mod errors;
pub mod host;
pub mod options;
pub mod path; // dotted-path assignment primitives, usable on their own
mod pipeline;
mod store;

use serde_json::{Map, Value};

pub use errors::{ContextError, Result};
pub use host::{
    MethodLookup, MethodRegistry, NoMethods, Request, RequestId, Response, TransformFn, Variety,
};
pub use options::{ContextHandler, Options};

/// The view-context plugin. Construct once at host startup, then wire the
/// two lifecycle hooks into the host's request pipeline:
/// `on_post_handler` after a handler has produced its response, and
/// `on_response` when the request completes.
pub struct ViewContext {
    pipeline: pipeline::Pipeline,
}

impl ViewContext {
    pub fn new(options: Options) -> Self {
        Self {
            pipeline: pipeline::Pipeline::new(options),
        }
    }

    pub fn options(&self) -> &Options {
        self.pipeline.options()
    }

    /// Add request-scoped context entries (dotted keys allowed), folded into
    /// the final context when this request renders a view. Returns the
    /// request's merged-so-far contributions. Safe to call before any other
    /// plugin state exists for the request; contributions for a request that
    /// never renders a view are discarded on completion.
    pub fn add_context(
        &self,
        request: &dyn Request,
        entries: Map<String, Value>,
    ) -> Map<String, Value> {
        self.pipeline.add_context(request, &entries)
    }

    /// The `(key, value)` call shape of [`add_context`](Self::add_context).
    pub fn add_context_pair(
        &self,
        request: &dyn Request,
        key: &str,
        value: Value,
    ) -> Map<String, Value> {
        let mut entries = Map::new();
        entries.insert(key.to_string(), value);
        self.pipeline.add_context(request, &entries)
    }

    /// Register a context-replacing transform for all future view responses.
    /// Append-only; takes effect for every request merged after this call.
    pub fn set_view_context<F>(&self, f: F)
    where
        F: Fn(Value, &dyn Request) -> Value + Send + Sync + 'static,
    {
        self.pipeline.set_view_context(std::sync::Arc::new(f));
    }

    /// Lifecycle hook: fired by the host after a handler produced its
    /// response, before transmission. Merges defaults, request additions,
    /// and transforms onto view responses; leaves everything else alone.
    pub fn on_post_handler(
        &self,
        request: &dyn Request,
        response: &mut dyn Response,
        methods: &dyn MethodLookup,
    ) {
        self.pipeline.on_post_handler(request, response, methods);
    }

    /// Lifecycle hook: fired by the host when the request completes. Emits
    /// the debug record when configured and releases per-request storage.
    pub fn on_response(&self, request: &dyn Request, response: &dyn Response) {
        self.pipeline.on_response(request, response);
    }
}
