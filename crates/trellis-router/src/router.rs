//! Method-dispatching router.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::method::Method;
use crate::params::RouteMatch;
use crate::tree::RadixTree;

/// One radix tree per HTTP method.
///
/// The router is built synchronously at start-up through [`add`](Self::add)
/// (or the fluent `get`/`post`/… sugar) and then frozen: lookups take
/// `&self`, mutate nothing, and are safe from any number of concurrent
/// threads. Registering routes while serving requires external
/// synchronization and is not supported here.
#[derive(Debug)]
pub struct Router<T> {
    trees: HashMap<Method, RadixTree<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// Looks up `path` in the tree registered for `method`.
    ///
    /// A method with no registered routes has no tree and therefore no
    /// match. Lookups never fail.
    pub fn find<'a>(&'a self, method: Method, path: &'a str) -> Option<RouteMatch<'a, T>> {
        self.trees.get(&method).and_then(|tree| tree.find(path))
    }

    /// Returns the tree for `method`, if any routes were registered for it.
    #[must_use]
    pub fn tree(&self, method: Method) -> Option<&RadixTree<T>> {
        self.trees.get(&method)
    }

    /// Replaces every registered handler, across all methods, with
    /// `transform(handler)`.
    ///
    /// Used to wrap handlers in middleware exactly once, after registration
    /// completes and before serving begins.
    pub fn bind<F: FnMut(T) -> T>(&mut self, mut transform: F) {
        for tree in self.trees.values_mut() {
            tree.bind_with(&mut transform);
        }
    }

    /// Methods whose routes match `path`, as an allow list: `HEAD` is
    /// implied by `GET`, the order is stable, duplicates are removed.
    #[must_use]
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .trees
            .iter()
            .filter(|(_, tree)| tree.find(path).is_some())
            .map(|(method, _)| *method)
            .collect();
        if methods.contains(&Method::Get) && !methods.contains(&Method::Head) {
            methods.push(Method::Head);
        }
        methods.sort_by_key(|method| method.order());
        methods.dedup();
        methods
    }

    /// Renders the GET tree's structure for debugging.
    #[must_use]
    pub fn dump(&self) -> String {
        self.trees
            .get(&Method::Get)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl<T: Clone> Router<T> {
    /// Registers `pattern` for `method`.
    ///
    /// See [`RadixTree::add`] for the pattern syntax.
    pub fn add(&mut self, method: Method, pattern: &str, handler: T) -> Result<()> {
        debug!("registering route {method} {pattern}");
        self.trees.entry(method).or_default().add(pattern, handler)
    }

    /// Adds a route with any method.
    pub fn route(mut self, method: Method, pattern: &str, handler: T) -> Result<Self> {
        self.add(method, pattern, handler)?;
        Ok(self)
    }

    /// Adds a GET route.
    pub fn get(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Get, pattern, handler)
    }

    /// Adds a POST route.
    pub fn post(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Post, pattern, handler)
    }

    /// Adds a PUT route.
    pub fn put(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Put, pattern, handler)
    }

    /// Adds a PATCH route.
    pub fn patch(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Patch, pattern, handler)
    }

    /// Adds a DELETE route.
    pub fn delete(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Delete, pattern, handler)
    }

    /// Adds a HEAD route.
    pub fn head(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Head, pattern, handler)
    }

    /// Adds an OPTIONS route.
    pub fn options(self, pattern: &str, handler: T) -> Result<Self> {
        self.route(Method::Options, pattern, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_dispatch() {
        let router = Router::new()
            .get("/user/:id", 1)
            .unwrap()
            .post("/user/:id", 2)
            .unwrap();

        let matched = router.find(Method::Get, "/user/7").unwrap();
        assert_eq!(*matched.handler, 1);
        assert_eq!(matched.params.get("id"), Some("7"));

        assert_eq!(router.find(Method::Post, "/user/7").map(|m| *m.handler), Some(2));
        assert!(router.find(Method::Delete, "/user/7").is_none());
    }

    #[test]
    fn test_builders_cover_every_method() {
        let router = Router::new()
            .put("/cfg", 1)
            .unwrap()
            .patch("/cfg", 2)
            .unwrap()
            .head("/cfg", 3)
            .unwrap()
            .options("/cfg", 4)
            .unwrap();

        assert_eq!(router.find(Method::Put, "/cfg").map(|m| *m.handler), Some(1));
        assert_eq!(
            router.allowed("/cfg"),
            vec![Method::Head, Method::Put, Method::Patch, Method::Options]
        );
    }

    #[test]
    fn test_unregistered_method_has_no_tree() {
        let router = Router::new().get("/", 1).unwrap();
        assert!(router.tree(Method::Put).is_none());
        assert!(router.find(Method::Put, "/").is_none());
    }

    #[test]
    fn test_fluent_chain_propagates_errors() {
        let result = Router::new().get("/ok", 1).and_then(|r| r.get("/bad/:", 2));
        assert!(result.is_err());
    }

    #[test]
    fn test_allowed_implies_head_for_get() {
        let router = Router::new()
            .get("/posts", 1)
            .unwrap()
            .post("/posts", 2)
            .unwrap()
            .delete("/posts/:id", 3)
            .unwrap();

        assert_eq!(
            router.allowed("/posts"),
            vec![Method::Get, Method::Head, Method::Post]
        );
        assert_eq!(router.allowed("/posts/7"), vec![Method::Delete]);
        assert!(router.allowed("/missing").is_empty());
    }

    #[test]
    fn test_bind_covers_all_methods() {
        let mut router = Router::new()
            .get("/a", 10)
            .unwrap()
            .post("/b/:id", 20)
            .unwrap();
        router.bind(|handler| handler + 1);

        assert_eq!(router.find(Method::Get, "/a").map(|m| *m.handler), Some(11));
        assert_eq!(router.find(Method::Post, "/b/1").map(|m| *m.handler), Some(21));
    }

    #[test]
    fn test_dump_renders_get_tree() {
        let router = Router::new().get("/user/:id", 1).unwrap();
        let dump = router.dump();
        assert!(dump.contains("/user/"));
        assert!(dump.contains(":id [handler]"));

        let empty: Router<u32> = Router::new();
        assert!(empty.dump().is_empty());
    }
}
