use crate::host::{MethodLookup, Request, Response, TransformFn, Variety};
use crate::options::{ContextHandler, Options};
use crate::path;
use crate::store::RequestStore;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The merge pipeline: owns the plugin options, the per-request
/// contribution store, and the append-only list of registered transforms.
/// All methods are synchronous map manipulation; nothing here blocks.
pub struct Pipeline {
    options: Options,
    store: RequestStore,
    transforms: RwLock<Vec<Arc<TransformFn>>>,
}

impl Pipeline {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            store: RequestStore::new(),
            transforms: RwLock::new(Vec::new()),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Stash request-scoped contributions, folded in at merge time.
    pub fn add_context(
        &self,
        request: &dyn Request,
        entries: &Map<String, Value>,
    ) -> Map<String, Value> {
        self.store.contribute(request.id(), entries)
    }

    /// Append a context-replacing transform for all subsequent view
    /// responses. Transforms are never removed.
    pub fn set_view_context(&self, f: Arc<TransformFn>) {
        self.transforms.write().push(f);
    }

    /// Post-handler hook: assemble the final context and write it back onto
    /// the response. No-op for non-view responses; runs at most once per
    /// request.
    pub fn on_post_handler(
        &self,
        request: &dyn Request,
        response: &mut dyn Response,
        methods: &dyn MethodLookup,
    ) {
        if response.variety() != Variety::View {
            return;
        }
        let Some(pending) = self.store.begin_merge(request.id()) else {
            return;
        };

        // Start from whatever the handler already put on the response.
        // Anything that isn't an object counts as empty.
        let mut context = match response.context() {
            Some(Value::Object(m)) => m.clone(),
            _ => Map::new(),
        };

        path::merge_defaults(&mut context, &self.options.context);
        path::merge_defaults(&mut context, &pending);

        // Handler output supplies fallbacks only; existing keys win.
        if let Some(handler) = self.resolve_handler(methods) {
            if let Value::Object(fallback) = handler(Value::Object(context.clone()), request) {
                path::apply_under(&mut context, fallback);
            }
        }

        // Registered transforms replace the context outright, in
        // registration order. Snapshot the list so a transform may itself
        // call set_view_context without deadlocking.
        let transforms: Vec<Arc<TransformFn>> = self.transforms.read().clone();
        for f in &transforms {
            context = match f(Value::Object(std::mem::take(&mut context)), request) {
                Value::Object(m) => m,
                _ => Map::new(),
            };
        }

        response.set_context(Value::Object(context));
    }

    // Named handlers are resolved against the host registry on every call;
    // a name that resolves to nothing means the step is skipped.
    fn resolve_handler(&self, methods: &dyn MethodLookup) -> Option<Arc<TransformFn>> {
        match self.options.context_handler.as_ref()? {
            ContextHandler::Direct(f) => Some(f.clone()),
            ContextHandler::Named(name) => methods.get(name),
        }
    }

    /// Completion hook: emit the diagnostic record when enabled, then drop
    /// the request's slot. Never alters the response.
    pub fn on_response(&self, request: &dyn Request, response: &dyn Response) {
        if self.options.enable_debug && request.query().contains_key("context") {
            if let Some(Value::Object(context)) = response.context() {
                // bound ahead of the macro: its expansion imports tracing's
                // own `Value` trait, shadowing serde_json's in field position
                let query = Value::Object(request.query().clone());
                let context = Value::Object(context.clone());
                tracing::debug!(
                    target: "view_context",
                    url = request.path(),
                    query = %query,
                    context = %context,
                    "final view context"
                );
            }
        }
        self.store.complete(request.id());
    }
}
