use oxiri::Iri;

/// The base IRI of an XML element, used to resolve `rdf:about`, `rdf:resource`, `rdf:datatype` and `rdf:ID`.
///
/// Resolution is lexical: the query and fragment of the base are dropped, an empty reference resolves
/// to the whole base, a fragment to the whole base followed by the fragment and any other relative
/// reference is appended to the base directory (the base up to its last `/`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct BaseIri {
    whole: String,
    directory: String,
}

impl BaseIri {
    pub fn new(iri: &str) -> Self {
        if iri.is_empty() {
            return Self::default();
        }
        match Iri::parse(iri) {
            Ok(parsed) => {
                let mut whole = format!("{}:", parsed.scheme());
                if let Some(authority) = parsed.authority() {
                    whole.push_str("//");
                    whole.push_str(authority);
                }
                let path = parsed.path();
                if path.is_empty() && parsed.authority().is_some() {
                    whole.push('/');
                } else {
                    whole.push_str(path);
                }
                let directory = match whole.rfind('/') {
                    Some(end) => whole[..=end].to_owned(),
                    None => format!("{}:", parsed.scheme()),
                };
                if let Some(query) = parsed.query() {
                    whole.push('?');
                    whole.push_str(query);
                }
                Self { whole, directory }
            }
            Err(error) => {
                log::debug!("Using {} as a plain base IRI: {}", iri, error);
                let whole = iri.split('#').next().unwrap_or_default().to_owned();
                let directory = match whole.rfind('/') {
                    Some(end) => whole[..=end].to_owned(),
                    None => String::new(),
                };
                Self { whole, directory }
            }
        }
    }

    /// The base without fragment, used to mint `rdf:ID` IRIs.
    pub fn whole(&self) -> &str {
        &self.whole
    }

    pub fn resolve(&self, reference: &str) -> String {
        if has_scheme(reference) {
            reference.to_owned()
        } else if reference.is_empty() {
            self.whole.clone()
        } else if reference.starts_with('#') {
            format!("{}{}", self.whole, reference)
        } else {
            format!("{}{}", self.directory, reference)
        }
    }
}

fn has_scheme(reference: &str) -> bool {
    let mut chars = reference.chars();
    if !chars.next().map_or(false, |c| c.is_ascii_alphabetic()) {
        return false;
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.' => (),
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.com/dir/file?q=1#f", "foo", "http://example.com/dir/foo" ; "relative")]
    #[test_case("http://example.com/dir/file?q=1#f", "", "http://example.com/dir/file?q=1" ; "empty")]
    #[test_case("http://example.com/dir/file", "#frag", "http://example.com/dir/file#frag" ; "fragment")]
    #[test_case("http://example.com/dir/file", "urn:x:y", "urn:x:y" ; "absolute")]
    #[test_case("http://example.com", "foo", "http://example.com/foo" ; "no path")]
    #[test_case("", "foo", "foo" ; "no base")]
    #[test_case("not a base/at all", "foo", "not a base/foo" ; "invalid base")]
    fn resolution(base: &str, reference: &str, expected: &str) {
        assert_eq!(BaseIri::new(base).resolve(reference), expected);
    }

    #[test]
    fn whole_base_drops_the_fragment() {
        assert_eq!(
            BaseIri::new("http://example.com/a/b#c").whole(),
            "http://example.com/a/b"
        );
    }
}
