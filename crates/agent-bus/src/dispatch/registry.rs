//! Two-level handler registry.
//!
//! Routes are keyed by package, then by function, using exact string
//! equality. The registry is owned by the command processor; only lifecycle
//! transitions running inside the processor loop mutate it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::handler::CommandHandler;

/// Lifecycle routes handled by the processor itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleRoute {
    /// Installs the provider's handlers.
    Start,
    /// Returns the registry to its bootstrap contents.
    Stop,
}

impl LifecycleRoute {
    /// Function name the route is registered under.
    #[must_use]
    pub const fn function(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }
}

/// Entry stored in the registry.
#[derive(Clone)]
pub enum Route {
    /// A lifecycle transition that needs the registry itself.
    Lifecycle(LifecycleRoute),
    /// An ordinary handler.
    Handler(Arc<dyn CommandHandler>),
}

impl fmt::Debug for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lifecycle(route) => formatter.debug_tuple("Lifecycle").field(route).finish(),
            Self::Handler(_) => formatter.write_str("Handler(..)"),
        }
    }
}

/// Mapping from package name to function name to route.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    packages: HashMap<String, HashMap<String, Route>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the route for a package/function pair.
    #[must_use]
    pub fn resolve(&self, package: &str, function: &str) -> Option<&Route> {
        self.packages
            .get(package)
            .and_then(|functions| functions.get(function))
    }

    /// Returns `true` when a route exists for the pair.
    #[must_use]
    pub fn contains(&self, package: &str, function: &str) -> bool {
        self.resolve(package, function).is_some()
    }

    /// Sorted snapshot of every registered `(package, function)` key.
    #[must_use]
    pub fn routes(&self) -> Vec<(String, String)> {
        let mut keys: Vec<(String, String)> = self
            .packages
            .iter()
            .flat_map(|(package, functions)| {
                functions
                    .keys()
                    .map(move |function| (package.clone(), function.clone()))
            })
            .collect();
        keys.sort();
        keys
    }

    /// Total number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.values().map(HashMap::len).sum()
    }

    /// Returns `true` when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a route, replacing any existing entry for the same key.
    pub(crate) fn insert(
        &mut self,
        package: impl Into<String>,
        function: impl Into<String>,
        route: Route,
    ) {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(function.into(), route);
    }

    /// Registers an ordinary handler.
    pub(crate) fn insert_handler(
        &mut self,
        package: impl Into<String>,
        function: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) {
        self.insert(package, function, Route::Handler(handler));
    }

    /// Replaces every function of a package with a single route.
    pub(crate) fn replace_package(
        &mut self,
        package: impl Into<String>,
        function: impl Into<String>,
        route: Route,
    ) {
        let mut functions = HashMap::new();
        functions.insert(function.into(), route);
        self.packages.insert(package.into(), functions);
    }

    /// Removes every route.
    pub(crate) fn clear(&mut self) {
        self.packages.clear();
    }
}
