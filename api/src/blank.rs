//! Blank node identity scoped to one parsing session.

use crate::model::BlankNode;
use std::collections::{HashMap, HashSet};

/// How blank node labels read from a document are turned into [`BlankNode`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankNodePolicy {
    /// Every distinct label gets a newly minted identifier.
    Fresh,
    /// Labels are kept as identifiers unless they collide with an identifier minted before.
    Preserve,
}

impl Default for BlankNodePolicy {
    fn default() -> Self {
        BlankNodePolicy::Fresh
    }
}

/// Maps blank node labels of one document to [`BlankNode`]s and mints anonymous ones.
///
/// The same label always resolves to the same node until [`reset`](BlankNodeContext::reset) is called.
/// Minted identifiers are `genid1`, `genid2`... so two passes over the same input produce the same nodes.
///
/// ```
/// use rdfio_api::blank::{BlankNodeContext, BlankNodePolicy};
///
/// let mut context = BlankNodeContext::new(BlankNodePolicy::Preserve);
/// let a = context.resolve("a");
/// assert_eq!(a.id, "a");
/// assert_eq!(context.resolve("a"), a);
/// assert_ne!(context.fresh(), a);
/// ```
#[derive(Debug, Default)]
pub struct BlankNodeContext {
    policy: BlankNodePolicy,
    labels: HashMap<String, BlankNode>,
    issued: HashSet<String>,
    counter: u64,
}

impl BlankNodeContext {
    pub fn new(policy: BlankNodePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> BlankNodePolicy {
        self.policy
    }

    /// Returns the node for a label read from the document.
    pub fn resolve(&mut self, label: &str) -> BlankNode {
        if let Some(node) = self.labels.get(label) {
            return node.clone();
        }
        let id = match self.policy {
            BlankNodePolicy::Preserve if !self.issued.contains(label) => label.to_owned(),
            _ => self.next_id(),
        };
        self.issued.insert(id.clone());
        let node = BlankNode { id };
        self.labels.insert(label.to_owned(), node.clone());
        node
    }

    /// Mints a node that has not been returned before in this session.
    pub fn fresh(&mut self) -> BlankNode {
        let id = self.next_id();
        self.issued.insert(id.clone());
        BlankNode { id }
    }

    /// Forgets all labels and restarts identifier minting.
    pub fn reset(&mut self) {
        self.labels.clear();
        self.issued.clear();
        self.counter = 0;
    }

    fn next_id(&mut self) -> String {
        loop {
            self.counter += 1;
            let id = format!("genid{}", self.counter);
            if !self.issued.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_policy_renames_labels() {
        let mut context = BlankNodeContext::default();
        let a = context.resolve("a");
        let b = context.resolve("b");
        assert_eq!(a.id, "genid1");
        assert_eq!(b.id, "genid2");
        assert_eq!(context.resolve("a"), a);
        assert_eq!(context.fresh().id, "genid3");
    }

    #[test]
    fn preserved_labels_do_not_collide_with_minted_ones() {
        let mut context = BlankNodeContext::new(BlankNodePolicy::Preserve);
        assert_eq!(context.fresh().id, "genid1");
        let colliding = context.resolve("genid1");
        assert_ne!(colliding.id, "genid1");
        assert_eq!(context.resolve("genid3").id, "genid3");
        let next = context.fresh();
        assert_ne!(next.id, "genid3");
        assert_ne!(next, colliding);
    }

    #[test]
    fn reset_restarts_the_session() {
        let mut context = BlankNodeContext::default();
        let first = vec![context.resolve("x"), context.fresh()];
        context.reset();
        let second = vec![context.resolve("x"), context.fresh()];
        assert_eq!(first, second);
    }
}
