//! Namespace alias tables.

use std::borrow::Cow;

/// An ordered `alias -> namespace IRI` table given to serializers to shorten their output.
///
/// ```
/// use rdfio_api::namespace::NamespaceMap;
///
/// let mut namespaces = NamespaceMap::new();
/// namespaces.add("schema", "http://schema.org/");
/// assert_eq!(namespaces.get("schema"), Some("http://schema.org/"));
/// assert_eq!(namespaces.alias_for("http://schema.org/"), Some("schema"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    entries: Vec<(String, String)>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias. An existing alias keeps its position and gets the new IRI.
    pub fn add(&mut self, alias: impl Into<String>, iri: impl Into<String>) {
        let alias = alias.into();
        let iri = iri.into();
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| *a == alias) {
            entry.1 = iri;
        } else {
            self.entries.push((alias, iri));
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, iri)| iri.as_str())
    }

    /// Returns the last alias registered for exactly this namespace IRI.
    pub fn alias_for(&self, iri: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(_, i)| i == iri)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, i)| (a.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Into<String>, I: Into<String>> std::iter::FromIterator<(A, I)> for NamespaceMap {
    fn from_iter<T: IntoIterator<Item = (A, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (alias, iri) in iter {
            map.add(alias, iri);
        }
        map
    }
}

/// Scoped XML namespace declarations: each alias maps to a stack of IRIs.
///
/// A scope is opened for each XML element with the declarations it carries and closed with the element.
/// The empty alias is the default namespace.
#[derive(Debug, Default)]
pub struct PrefixStack {
    bindings: Vec<(String, Vec<String>)>,
    scopes: Vec<Vec<usize>>,
}

impl PrefixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self, declarations: impl IntoIterator<Item = (String, String)>) {
        let mut scope = Vec::new();
        for (alias, iri) in declarations {
            let index = match self.bindings.iter().position(|(a, _)| *a == alias) {
                Some(index) => index,
                None => {
                    self.bindings.push((alias, Vec::new()));
                    self.bindings.len() - 1
                }
            };
            self.bindings[index].1.push(iri);
            scope.push(index);
        }
        self.scopes.push(scope);
    }

    pub fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for index in scope {
                self.bindings[index].1.pop();
            }
        }
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(a, _)| a == alias)
            .and_then(|(_, iris)| iris.last())
            .map(String::as_str)
    }

    /// The declarations currently in scope, in order of first declaration.
    pub fn in_scope(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .filter_map(|(alias, iris)| iris.last().map(|iri| (alias.as_str(), iri.as_str())))
    }

    /// Writes an expanded name as a qualified name using the longest namespace IRI in scope.
    ///
    /// The default namespace is only used if `allow_default` is set, attribute names never use it.
    /// The expanded name is returned as is if no namespace matches.
    pub fn shorten<'a>(&self, expanded: &'a str, allow_default: bool) -> Cow<'a, str> {
        let best = self
            .in_scope()
            .filter(|(alias, iri)| {
                !iri.is_empty() && (allow_default || !alias.is_empty()) && expanded.starts_with(iri)
            })
            .max_by_key(|(_, iri)| iri.len());
        match best {
            Some(("", iri)) => Cow::Borrowed(&expanded[iri.len()..]),
            Some((alias, iri)) => Cow::Owned(format!("{}:{}", alias, &expanded[iri.len()..])),
            None => Cow::Borrowed(expanded),
        }
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.scopes.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn namespace_map_keeps_insertion_order() {
        let mut map: NamespaceMap = vec![("b", "http://b/"), ("a", "http://a/")]
            .into_iter()
            .collect();
        map.add("b", "http://b2/");
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![("b", "http://b2/"), ("a", "http://a/")]
        );
        assert_eq!(map.alias_for("http://b/"), None);
    }

    #[test]
    fn prefix_scopes_are_popped() {
        let mut stack = PrefixStack::new();
        stack.push_scope(vec![("ex".to_owned(), "http://ex/".to_owned())]);
        stack.push_scope(vec![("ex".to_owned(), "http://other/".to_owned())]);
        assert_eq!(stack.resolve("ex"), Some("http://other/"));
        stack.pop_scope();
        assert_eq!(stack.resolve("ex"), Some("http://ex/"));
        stack.pop_scope();
        assert_eq!(stack.resolve("ex"), None);
        assert_eq!(stack.in_scope().count(), 0);
    }

    #[test]
    fn shorten_uses_longest_namespace() {
        let mut stack = PrefixStack::new();
        stack.push_scope(vec![
            ("a".to_owned(), "http://ex/".to_owned()),
            ("b".to_owned(), "http://ex/sub/".to_owned()),
            ("".to_owned(), "http://default/".to_owned()),
        ]);
        assert_eq!(stack.shorten("http://ex/sub/x", true), "b:x");
        assert_eq!(stack.shorten("http://ex/y", true), "a:y");
        assert_eq!(stack.shorten("http://default/z", true), "z");
        assert_eq!(stack.shorten("http://default/z", false), "http://default/z");
        assert_eq!(stack.shorten("urn:none", true), "urn:none");
    }
}
