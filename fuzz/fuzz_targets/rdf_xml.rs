#![no_main]
use libfuzzer_sys::fuzz_target;
use rdfio_api::input::SeekableInput;
use rdfio_api::parser::QuadParser;
use rdfio_xml::RdfXmlParser;

fuzz_target!(|data: &[u8]| {
    let _ = RdfXmlParser::new(SeekableInput::from_bytes(data), "http://example.com/")
        .parse_all(&mut |_| ());
});
