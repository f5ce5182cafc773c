#![no_main]
use libfuzzer_sys::fuzz_target;
use rdfio_api::input::SeekableInput;
use rdfio_api::parser::QuadParser;
use rdfio_nquads::{NQuadsMode, NQuadsParser, Syntax};

fuzz_target!(|data: &[u8]| {
    for syntax in [Syntax::Strict, Syntax::Relaxed].iter() {
        let _ = NQuadsParser::new(SeekableInput::from_bytes(data), NQuadsMode::QuadsStar, *syntax)
            .parse_all(&mut |_| ());
    }
});
