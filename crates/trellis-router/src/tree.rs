//! A radix tree for one HTTP method, with a literal fast path.
//!
//! Pure-literal routes are mirrored into a map keyed by the full path and
//! guarded by a bitset of path lengths, so the common case of a route with
//! no captures skips trie traversal entirely. Everything is also inserted
//! into the trie itself, which keeps structural traversal, handler binding
//! and the trailing-slash alias uniform across route kinds.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, RouterError};
use crate::node::{Node, NodeKind};
use crate::params::{Params, RouteMatch};

/// A growable set of path lengths for which a pure-literal route exists.
#[derive(Debug, Default)]
struct LengthSet {
    bits: Vec<u64>,
}

impl LengthSet {
    fn mark(&mut self, len: usize) {
        let word = len / 64;
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
        self.bits[word] |= 1 << (len % 64);
    }

    fn contains(&self, len: usize) -> bool {
        self.bits
            .get(len / 64)
            .is_some_and(|word| word & (1 << (len % 64)) != 0)
    }
}

/// Checks token syntax before any tree mutation: every capture must have a
/// name, names may not contain reserved bytes, and a wildcard must be the
/// final token of the pattern.
fn validate(pattern: &str) -> Result<()> {
    let mut rest = pattern;
    while let Some(at) = rest.find([':', '*']) {
        let token = &rest[at..];
        let body = &token[1..];
        if token.as_bytes()[0] == b':' {
            let end = body.find('/').unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(RouterError::MissingCaptureName {
                    pattern: pattern.to_string(),
                });
            }
            if name.contains([':', '*']) {
                return Err(RouterError::InvalidCaptureName {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
            rest = &body[end..];
        } else {
            if body.is_empty() {
                return Err(RouterError::MissingCaptureName {
                    pattern: pattern.to_string(),
                });
            }
            if let Some(slash) = body.find('/') {
                return Err(RouterError::WildcardNotLast {
                    pattern: pattern.to_string(),
                    name: body[..slash].to_string(),
                });
            }
            if body.contains([':', '*']) {
                return Err(RouterError::InvalidCaptureName {
                    pattern: pattern.to_string(),
                    name: body.to_string(),
                });
            }
            rest = "";
        }
    }
    Ok(())
}

/// The route tree for a single HTTP method.
///
/// Built synchronously during start-up via [`add`](Self::add); once serving
/// begins, [`find`](Self::find) is a pure read and safe for unlimited
/// concurrent callers.
#[derive(Debug)]
pub struct RadixTree<T> {
    root: Node<T>,
    static_routes: HashMap<String, T>,
    static_lengths: LengthSet,
}

impl<T> Default for RadixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RadixTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            static_routes: HashMap::new(),
            static_lengths: LengthSet::default(),
        }
    }

    /// Looks up `path`, returning the matched handler and the captures in
    /// left-to-right path order. Never fails: an unmatched path is `None`.
    pub fn find<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a, T>> {
        if self.static_lengths.contains(path.len()) {
            if let Some(handler) = self.static_routes.get(path) {
                return Some(RouteMatch {
                    handler,
                    params: Params::new(),
                });
            }
        }

        let mut node = &self.root;
        let mut at = 0;
        let mut params = Params::new();
        // the most recently passed wildcard branch, with the path offset and
        // capture depth at which it was passed; a dead end re-enters it
        let mut fallback: Option<(&Node<T>, usize, usize)> = None;

        loop {
            match node.kind {
                NodeKind::Static => {
                    let rest = path.get(at..)?;
                    if !rest.as_bytes().starts_with(node.prefix.as_bytes()) {
                        let (wild, from, depth) = fallback?;
                        params.truncate(depth);
                        node = wild;
                        at = from;
                        continue;
                    }
                    at += node.prefix.len();
                }
                NodeKind::Param => {
                    let rest = path.get(at..)?;
                    let end = rest.find('/').unwrap_or(rest.len());
                    params.push(&node.prefix, &rest[..end]);
                    at += end;
                }
                NodeKind::Wildcard => {
                    params.push(&node.prefix, path.get(at..)?);
                    return node
                        .handler
                        .as_ref()
                        .map(|handler| RouteMatch { handler, params });
                }
            }

            if let Some(wild) = node.wildcard_child.as_deref() {
                fallback = Some((wild, at, params.len()));
            }
            if at == path.len() {
                // exhausted exactly at a node boundary
                return node
                    .handler
                    .as_ref()
                    .map(|handler| RouteMatch { handler, params });
            }

            let next = path.as_bytes()[at];
            if let Some(slot) = node.slot(next) {
                node = &node.children[slot];
            } else if let Some(param) = node.param_child.as_deref() {
                node = param;
            } else if let Some(wild) = node.wildcard_child.as_deref() {
                node = wild;
            } else {
                let (wild, from, depth) = fallback?;
                params.truncate(depth);
                node = wild;
                at = from;
            }
        }
    }

    /// Replaces every registered handler with `transform(handler)`.
    ///
    /// Covers every reachable node as well as the literal fast-path map.
    /// Intended to run exactly once, after registration completes and
    /// before serving begins, to wrap handlers in middleware.
    pub fn bind<F: FnMut(T) -> T>(&mut self, mut transform: F) {
        self.bind_with(&mut transform);
    }

    pub(crate) fn bind_with<F: FnMut(T) -> T>(&mut self, transform: &mut F) {
        let routes = std::mem::take(&mut self.static_routes);
        self.static_routes = routes
            .into_iter()
            .map(|(path, handler)| (path, transform(handler)))
            .collect();
        self.root.bind(transform);
    }
}

impl<T: Clone> RadixTree<T> {
    /// Registers `pattern` with its handler.
    ///
    /// Pattern syntax: `/` separates segments, `:name` captures one
    /// segment, `*name` captures the remaining path and must be the final
    /// token. Registering the same literal pattern twice overwrites the
    /// previous handler.
    pub fn add(&mut self, pattern: &str, handler: T) -> Result<()> {
        validate(pattern)?;
        if pattern.contains([':', '*']) {
            return self.root.insert(pattern, 0, handler);
        }
        self.root.insert(pattern, 0, handler.clone())?;
        self.static_lengths.mark(pattern.len());
        self.static_routes.insert(pattern.to_string(), handler);
        Ok(())
    }
}

impl<T> fmt::Display for RadixTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(&self.root, 0, f)
    }
}

fn fmt_node<T>(node: &Node<T>, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:width$}", "", width = depth * 2)?;
    match node.kind {
        NodeKind::Static if node.prefix.is_empty() => write!(f, "(root)")?,
        NodeKind::Static => write!(f, "{}", node.prefix)?,
        NodeKind::Param => write!(f, ":{}", node.prefix)?,
        NodeKind::Wildcard => write!(f, "*{}", node.prefix)?,
    }
    if node.handler.is_some() {
        write!(f, " [handler]")?;
    }
    writeln!(f)?;
    for child in &node.children {
        fmt_node(child, depth + 1, f)?;
    }
    if let Some(child) = node.param_child.as_deref() {
        fmt_node(child, depth + 1, f)?;
    }
    if let Some(child) = node.wildcard_child.as_deref() {
        fmt_node(child, depth + 1, f)?;
    }
    Ok(())
}
