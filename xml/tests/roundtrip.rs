use rdfio_api::blank::BlankNodePolicy;
use rdfio_api::formatter::QuadSerializer;
use rdfio_api::input::SeekableInput;
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMap;
use rdfio_api::parser::*;
use rdfio_api::vocab::rdf;
use rdfio_xml::*;
use std::io;
use test_case::test_case;

fn parse(file: &str, base_iri: &str) -> Result<Vec<Quad>, RdfXmlError> {
    RdfXmlParser::new(SeekableInput::from_string(file), base_iri)
        .with_blank_node_policy(BlankNodePolicy::Preserve)
        .into_sequence()
        .into_quads()
        .collect()
}

fn document(content: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:ex=\"http://example.com/\" xmlns:urn=\"urn:\">\n{}\n</rdf:RDF>",
        content
    )
}

fn reference_dataset() -> Vec<Quad> {
    let s1 = NamedNode::new("https://sbj/1");
    let s2 = NamedNode::new("https://sbj/2");
    let p1 = NamedNode::new("https://prop/1");
    let p2 = NamedNode::new("https://prop/2");
    vec![
        Quad::new(s1.clone(), p1.clone(), NamedNode::new("https://obj/1"), GraphName::DefaultGraph),
        Quad::new(s1.clone(), p1.clone(), NamedNode::new("https://obj/2"), GraphName::DefaultGraph),
        Quad::new(s1.clone(), p2.clone(), BlankNode::new("genid1"), GraphName::DefaultGraph),
        Quad::new(s2, p1.clone(), Literal::new_simple("foo"), GraphName::DefaultGraph),
        Quad::new(s1, p1, Literal::new_language_tagged("bar", "en"), GraphName::DefaultGraph),
        Quad::new(
            BlankNode::new("genid0"),
            p2,
            Literal::new_typed("3", NamedNode::new("http://www.w3.org/2001/XMLSchema#int")),
            GraphName::DefaultGraph,
        ),
    ]
}

const PRETTY_WITH_ALIASES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ns0="https://prop/">
  <rdf:Description rdf:about="https://sbj/1">
    <ns0:1 rdf:resource="https://obj/1"/>
    <ns0:1 rdf:resource="https://obj/2"/>
    <ns0:2 rdf:nodeID="genid1"/>
  </rdf:Description>
  <rdf:Description rdf:about="https://sbj/2">
    <ns0:1>foo</ns0:1>
  </rdf:Description>
  <rdf:Description rdf:about="https://sbj/1">
    <ns0:1 xml:lang="en">bar</ns0:1>
  </rdf:Description>
  <rdf:Description rdf:nodeID="genid0">
    <ns0:2 rdf:datatype="http://www.w3.org/2001/XMLSchema#int">3</ns0:2>
  </rdf:Description>
</rdf:RDF>"#;

const PRETTY_WITHOUT_ALIASES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="https://sbj/1">
    <ns:1 xmlns:ns="https://prop/" rdf:resource="https://obj/1"/>
    <ns:1 xmlns:ns="https://prop/" rdf:resource="https://obj/2"/>
    <ns:2 xmlns:ns="https://prop/" rdf:nodeID="genid1"/>
  </rdf:Description>
  <rdf:Description rdf:about="https://sbj/2">
    <ns:1 xmlns:ns="https://prop/">foo</ns:1>
  </rdf:Description>
  <rdf:Description rdf:about="https://sbj/1">
    <ns:1 xmlns:ns="https://prop/" xml:lang="en">bar</ns:1>
  </rdf:Description>
  <rdf:Description rdf:nodeID="genid0">
    <ns:2 xmlns:ns="https://prop/" rdf:datatype="http://www.w3.org/2001/XMLSchema#int">3</ns:2>
  </rdf:Description>
</rdf:RDF>"#;

const UGLY_WITH_ALIASES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ns0="https://prop/"><rdf:Description rdf:about="https://sbj/1"><ns0:1 rdf:resource="https://obj/1"/><ns0:1 rdf:resource="https://obj/2"/><ns0:2 rdf:nodeID="genid1"/></rdf:Description><rdf:Description rdf:about="https://sbj/2"><ns0:1>foo</ns0:1></rdf:Description><rdf:Description rdf:about="https://sbj/1"><ns0:1 xml:lang="en">bar</ns0:1></rdf:Description><rdf:Description rdf:nodeID="genid0"><ns0:2 rdf:datatype="http://www.w3.org/2001/XMLSchema#int">3</ns0:2></rdf:Description></rdf:RDF>"#;

const UGLY_WITHOUT_ALIASES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description rdf:about="https://sbj/1"><ns:1 xmlns:ns="https://prop/" rdf:resource="https://obj/1"/><ns:1 xmlns:ns="https://prop/" rdf:resource="https://obj/2"/><ns:2 xmlns:ns="https://prop/" rdf:nodeID="genid1"/></rdf:Description><rdf:Description rdf:about="https://sbj/2"><ns:1 xmlns:ns="https://prop/">foo</ns:1></rdf:Description><rdf:Description rdf:about="https://sbj/1"><ns:1 xmlns:ns="https://prop/" xml:lang="en">bar</ns:1></rdf:Description><rdf:Description rdf:nodeID="genid0"><ns:2 xmlns:ns="https://prop/" rdf:datatype="http://www.w3.org/2001/XMLSchema#int">3</ns:2></rdf:Description></rdf:RDF>"#;

#[test_case(true, true, PRETTY_WITH_ALIASES ; "pretty with aliases")]
#[test_case(true, false, PRETTY_WITHOUT_ALIASES ; "pretty without aliases")]
#[test_case(false, true, UGLY_WITH_ALIASES ; "ugly with aliases")]
#[test_case(false, false, UGLY_WITHOUT_ALIASES ; "ugly without aliases")]
fn serializer_layout(pretty: bool, with_aliases: bool, expected: &str) -> io::Result<()> {
    let mut namespaces = NamespaceMap::new();
    namespaces.add("ns0", "https://prop/");
    let output = RdfXmlSerializer::new(pretty).serialize_to_string(
        &mut QuadVec::from(reference_dataset()),
        if with_aliases { Some(&namespaces) } else { None },
    )?;
    assert_eq!(output, expected);
    Ok(())
}

#[test]
fn serialized_output_parses_back() -> Result<(), Box<dyn std::error::Error>> {
    let p = NamedNode::new("http://example.com/p");
    let dataset = vec![
        Quad::new(NamedNode::new("http://example.com/a?b&c"), p.clone(), Literal::new_simple("sim\"le <tag>"), GraphName::DefaultGraph),
        Quad::new(BlankNode::new("foobar"), p.clone(), Literal::new_language_tagged("v", "en-US"), GraphName::DefaultGraph),
        Quad::new(BlankNode::new("foobar"), p.clone(), BlankNode::new("other"), GraphName::DefaultGraph),
        Quad::new(
            BlankNode::new("foobar"),
            NamedNode::new("http://example.com/ns#q"),
            Literal::new_typed("1", NamedNode::new("http://example.com/d𓀀t")),
            GraphName::DefaultGraph,
        ),
    ];
    let xml = RdfXmlSerializer::default().serialize_to_string(&mut QuadVec::from(dataset.clone()), None)?;
    assert_eq!(parse(&xml, "")?, dataset);
    Ok(())
}

#[test]
fn adjacent_subjects_share_a_description() -> io::Result<()> {
    let s = NamedNode::new("http://example.com/s");
    let p = NamedNode::new("http://example.com/p");
    let mut quads: QuadVec = vec![
        Quad::new(s.clone(), p.clone(), Literal::new_simple("1"), GraphName::DefaultGraph),
        Quad::new(s.clone(), p.clone(), Literal::new_simple("2"), GraphName::DefaultGraph),
        Quad::new(s.clone(), p.clone(), Literal::new_simple("3"), GraphName::DefaultGraph),
        Quad::new(NamedNode::new("http://example.com/t"), p.clone(), Literal::new_simple("4"), GraphName::DefaultGraph),
        Quad::new(s, p, Literal::new_simple("5"), GraphName::DefaultGraph),
    ]
    .into_iter()
    .collect();
    let xml = RdfXmlSerializer::new(false).serialize_to_string(&mut quads, None)?;
    assert_eq!(xml.matches("<rdf:Description rdf:about=\"http://example.com/s\">").count(), 2);
    assert_eq!(xml.matches("<rdf:Description ").count(), 3);
    assert_eq!(xml.matches("</rdf:Description>").count(), 3);
    Ok(())
}

// rdf:ID IRIs are the base without fragment, then `#` and the ID.
#[test]
fn reification() -> Result<(), RdfXmlError> {
    let quads = parse(
        &document("<rdf:Description rdf:about=\"urn:s\"><urn:p rdf:ID=\"r\">v</urn:p></rdf:Description>"),
        "http://example.com/doc",
    )?;
    let statement = NamedNode::new("http://example.com/doc#r");
    let s = NamedNode::new("urn:s");
    let p = NamedNode::new("urn:p");
    assert_eq!(
        quads,
        vec![
            Quad::new(s.clone(), p.clone(), Literal::new_simple("v"), GraphName::DefaultGraph),
            Quad::new(statement.clone(), NamedNode::new(rdf::SUBJECT), s, GraphName::DefaultGraph),
            Quad::new(statement.clone(), NamedNode::new(rdf::PREDICATE), p, GraphName::DefaultGraph),
            Quad::new(statement.clone(), NamedNode::new(rdf::OBJECT), Literal::new_simple("v"), GraphName::DefaultGraph),
            Quad::new(statement, NamedNode::new(rdf::TYPE), NamedNode::new(rdf::STATEMENT), GraphName::DefaultGraph),
        ]
    );
    Ok(())
}

#[test]
fn reification_of_a_resource_property() -> Result<(), RdfXmlError> {
    let quads = parse(
        &document("<rdf:Description rdf:about=\"urn:s\"><urn:p rdf:ID=\"r\" rdf:resource=\"urn:o\"/></rdf:Description>"),
        "http://example.com/doc",
    )?;
    assert_eq!(quads.len(), 5);
    assert_eq!(quads[0].object, Term::from(NamedNode::new("urn:o")));
    assert_eq!(quads[3].object, Term::from(NamedNode::new("urn:o")));
    Ok(())
}

#[test]
fn ids_are_appended_after_a_hash() -> Result<(), RdfXmlError> {
    let quads = parse(
        &document("<rdf:Description rdf:ID=\"r\"><urn:p>v</urn:p></rdf:Description>"),
        "urn:",
    )?;
    assert_eq!(quads[0].subject, Subject::from(NamedNode::new("urn:#r")));
    Ok(())
}

#[test]
fn node_property_attributes_use_the_datatype() -> Result<(), RdfXmlError> {
    let a = NamedNode::new("http://example.com/a");
    assert_eq!(
        parse(
            &document("<ex:Thing rdf:about=\"http://example.com/a\" rdf:datatype=\"dt\" xml:lang=\"en\" ex:p=\"1\"/>"),
            "http://example.com/doc",
        )?,
        vec![
            Quad::new(a.clone(), NamedNode::new(rdf::TYPE), NamedNode::new("http://example.com/Thing"), GraphName::DefaultGraph),
            Quad::new(a, NamedNode::new("http://example.com/p"), Literal::new_typed("1", NamedNode::new("http://example.com/dt")), GraphName::DefaultGraph),
        ]
    );
    Ok(())
}

#[test]
fn implicit_object_attributes_use_the_datatype() -> Result<(), RdfXmlError> {
    let a = NamedNode::new("http://example.com/a");
    let object = BlankNode::new("genid1");
    assert_eq!(
        parse(
            &document("<rdf:Description rdf:about=\"http://example.com/a\"><ex:q rdf:datatype=\"http://example.com/dt\" ex:p=\"1\"/></rdf:Description>"),
            "",
        )?,
        vec![
            Quad::new(a, NamedNode::new("http://example.com/q"), object.clone(), GraphName::DefaultGraph),
            Quad::new(object, NamedNode::new("http://example.com/p"), Literal::new_typed("1", NamedNode::new("http://example.com/dt")), GraphName::DefaultGraph),
        ]
    );
    Ok(())
}

#[test_case(0 ; "empty")]
#[test_case(1 ; "single")]
#[test_case(3 ; "three")]
fn collection(size: usize) -> Result<(), RdfXmlError> {
    let items: String = (0..size)
        .map(|i| format!("<rdf:Description rdf:about=\"http://example.com/{}\"/>", i))
        .collect();
    let quads = parse(
        &document(&format!(
            "<rdf:Description rdf:about=\"http://example.com/s\"><ex:p rdf:parseType=\"Collection\">{}</ex:p></rdf:Description>",
            items
        )),
        "",
    )?;
    let count = |predicate: &str| quads.iter().filter(|q| q.predicate.iri == predicate).count();
    assert_eq!(count(rdf::FIRST), size);
    assert_eq!(count(rdf::REST), size.saturating_sub(1) + usize::from(size > 0));
    assert_eq!(count("http://example.com/p"), 1);
    let nil = Term::from(NamedNode::new(rdf::NIL));
    assert_eq!(quads.iter().filter(|q| q.object == nil).count(), 1);
    assert_eq!(quads.last().map(|q| &q.object), Some(&nil));
    for (i, first) in quads.iter().filter(|q| q.predicate.iri == rdf::FIRST).enumerate() {
        assert_eq!(first.object, Term::from(NamedNode::new(format!("http://example.com/{}", i))));
    }
    Ok(())
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut parsed = Vec::new();
    let error = RdfXmlParser::new(
        SeekableInput::from_string(document(
            "<rdf:Description rdf:ID=\"x\" ex:p=\"1\"/>\n<rdf:Description rdf:ID=\"x\" ex:p=\"2\"/>",
        )),
        "http://example.com/doc",
    )
    .parse_all(&mut |q| parsed.push(q))
    .unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::DuplicateId(id) if id == "x"));
    assert_eq!(error.position().map(|p| p.line), Some(4));
    assert!(error.to_string().starts_with("Duplicated element id 'x' at line 4"));
    assert_eq!(parsed.len(), 1);
}

#[test]
fn rewind_produces_the_same_quads() -> Result<(), RdfXmlError> {
    let mut sequence = RdfXmlParser::new(
        SeekableInput::from_string(document(
            "<ex:T rdf:ID=\"a\"><ex:p><rdf:Description ex:q=\"v\"/></ex:p></ex:T>",
        )),
        "http://example.com/",
    )
    .into_sequence();
    let first: Vec<Quad> = collect(&mut sequence)?;
    let second: Vec<Quad> = collect(&mut sequence)?;
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    Ok(())
}

fn collect<S: QuadSequence>(sequence: &mut S) -> Result<Vec<Quad>, S::Error> {
    let mut quads = Vec::new();
    sequence.rewind()?;
    while let Some(quad) = sequence.current() {
        quads.push(quad.clone());
        sequence.next()?;
    }
    Ok(quads)
}

#[test]
fn byte_order_marks() {
    let mut utf8 = b"\xEF\xBB\xBF".to_vec();
    utf8.extend_from_slice(document("<rdf:Description rdf:about=\"http://example.com/s\" ex:p=\"v\"/>").as_bytes());
    let mut count = 0;
    RdfXmlParser::new(SeekableInput::from_bytes(utf8), "")
        .parse_all(&mut |_| count += 1)
        .unwrap();
    assert_eq!(count, 1);

    let error = RdfXmlParser::new(SeekableInput::from_bytes(b"\xFE\xFF\x00<".to_vec()), "")
        .parse_all(&mut |_| ())
        .unwrap_err();
    assert!(matches!(error.kind(), RdfXmlErrorKind::WrongEncoding(_)));
}

#[test]
fn files_larger_than_a_chunk() -> Result<(), RdfXmlError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let description = "<rdf:Description rdf:about=\"http://example.com/subject\"><ex:p>some value</ex:p></rdf:Description>\n";
    let count = READ_BUFFER_SIZE / description.len() * 3 + 1;
    let mut parsed = 0;
    RdfXmlParser::new(SeekableInput::from_string(document(&description.repeat(count))), "")
        .parse_all(&mut |_| parsed += 1)?;
    assert_eq!(parsed, count);
    Ok(())
}
