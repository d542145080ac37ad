//! Handler registration table.
//!
//! # Responsibilities
//! - Map marker keys to handler services and pre-built routers
//! - Resolve a key into a three-way outcome: absent, loaded, or failed
//! - Box handlers into a uniform service type the assembler can bind
//!
//! # Keys
//! A key is the marker file's path relative to the routes root, extension
//! stripped, `/`-separated on every platform: `api/hello/get` for
//! `<root>/api/hello/get.rs`, `admin/index` for `<root>/admin/index.rs`.
//!
//! # Design Decisions
//! - Registration is explicit and enumerable; there is no runtime code
//!   loading, so a key that was never registered resolves to `Absent`
//! - Factories may fail, and that failure is a distinct outcome from
//!   absence; the assembler reports the two differently
//! - A router registered for an `index` key must not bind at `/` a method
//!   that its directory also carries as a marker file; axum rejects the
//!   overlapping route at mount time

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::{Handler, HandlerWithoutStateExt};
use axum::response::Response;
use axum::Router;
use tower::util::BoxCloneSyncService;

/// Error type factories may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The uniform shape every registered handler is boxed into.
pub type RouteService = BoxCloneSyncService<Request, Response, Infallible>;

/// Outcome of looking up a registry key.
pub enum Resolution<T> {
    /// No entry registered under the key.
    Absent,
    /// The entry resolved.
    Loaded(T),
    /// The entry exists but its factory failed.
    Failed(BoxError),
}

type ServiceFactory = Arc<dyn Fn() -> Result<RouteService, BoxError> + Send + Sync>;
type RouterFactory = Arc<dyn Fn() -> Result<Router, BoxError> + Send + Sync>;

enum ServiceEntry {
    Ready(RouteService),
    Factory(ServiceFactory),
}

enum RouterEntry {
    Ready(Router),
    Factory(RouterFactory),
}

/// Registration table consumed by the tree assembler.
///
/// Built once at startup with the builder-style `handler`/`router` calls,
/// then handed to [`crate::tree::mount_routes`] by shared reference.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, ServiceEntry>,
    routers: HashMap<String, RouterEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an axum handler under a method-marker key.
    pub fn handler<H, T>(mut self, key: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let svc = RouteService::new(handler.into_service());
        self.handlers.insert(key.into(), ServiceEntry::Ready(svc));
        self
    }

    /// Register a fallible handler source under a method-marker key.
    ///
    /// The factory runs once per load, when the marker is encountered. An
    /// `Err` is reported as a per-file failure and the binding is skipped;
    /// sibling bindings are unaffected.
    pub fn handler_factory<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<RouteService, BoxError> + Send + Sync + 'static,
    {
        self.handlers
            .insert(key.into(), ServiceEntry::Factory(Arc::new(factory)));
        self
    }

    /// Register a pre-built router under an `index` key.
    pub fn router(mut self, key: impl Into<String>, router: Router) -> Self {
        self.routers.insert(key.into(), RouterEntry::Ready(router));
        self
    }

    /// Register a fallible router source under an `index` key.
    ///
    /// An `Err` is reported and the directory falls back to an empty
    /// router; the rest of the load continues.
    pub fn router_factory<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Router, BoxError> + Send + Sync + 'static,
    {
        self.routers
            .insert(key.into(), RouterEntry::Factory(Arc::new(factory)));
        self
    }

    /// Look up a handler for a method-marker key.
    pub fn resolve_handler(&self, key: &str) -> Resolution<RouteService> {
        match self.handlers.get(key) {
            None => Resolution::Absent,
            Some(ServiceEntry::Ready(svc)) => Resolution::Loaded(svc.clone()),
            Some(ServiceEntry::Factory(f)) => match f() {
                Ok(svc) => Resolution::Loaded(svc),
                Err(e) => Resolution::Failed(e),
            },
        }
    }

    /// Look up a router for an `index` key.
    pub fn resolve_router(&self, key: &str) -> Resolution<Router> {
        match self.routers.get(key) {
            None => Resolution::Absent,
            Some(RouterEntry::Ready(router)) => Resolution::Loaded(router.clone()),
            Some(RouterEntry::Factory(f)) => match f() {
                Ok(router) => Resolution::Loaded(router),
                Err(e) => Resolution::Failed(e),
            },
        }
    }

    /// Number of registered entries, handlers and routers combined.
    pub fn len(&self) -> usize {
        self.handlers.len() + self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.routers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_keys_resolve_absent() {
        let registry = HandlerRegistry::new();
        assert!(matches!(
            registry.resolve_handler("api/get"),
            Resolution::Absent
        ));
        assert!(matches!(
            registry.resolve_router("api/index"),
            Resolution::Absent
        ));
    }

    #[test]
    fn registered_handlers_resolve_loaded() {
        let registry = HandlerRegistry::new().handler("api/get", || async { "ok" });
        assert!(matches!(
            registry.resolve_handler("api/get"),
            Resolution::Loaded(_)
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn factory_errors_resolve_failed() {
        let registry = HandlerRegistry::new()
            .handler_factory("api/get", || Err("handler source is broken".into()))
            .router_factory("api/index", || Err("router source is broken".into()));

        match registry.resolve_handler("api/get") {
            Resolution::Failed(e) => assert_eq!(e.to_string(), "handler source is broken"),
            _ => panic!("expected Failed"),
        }
        match registry.resolve_router("api/index") {
            Resolution::Failed(e) => assert_eq!(e.to_string(), "router source is broken"),
            _ => panic!("expected Failed"),
        }
    }

    #[test]
    fn factories_resolve_fresh_values_per_load() {
        let registry =
            HandlerRegistry::new().router_factory("admin/index", || Ok(Router::new()));
        assert!(matches!(
            registry.resolve_router("admin/index"),
            Resolution::Loaded(_)
        ));
        assert!(matches!(
            registry.resolve_router("admin/index"),
            Resolution::Loaded(_)
        ));
    }
}
