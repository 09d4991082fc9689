//! Property-based tests for the input parser and renderer.
//!
//! Tests invariants that are hard to enumerate by hand:
//! - Stability (the parser never panics on arbitrary byte input)
//! - Chunking independence (splitting a byte stream across `feed` calls
//!   never changes the events produced)
//! - Diff correctness (the renderer only ever emits the lines that changed)

use matcha::parser::Parser;
use matcha::renderer::Renderer;
use proptest::prelude::*;

proptest! {
    /// Any arbitrary byte sequence can be fed to the parser without panicking,
    /// regardless of how it's chunked.
    #[test]
    fn parser_never_panics_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.feed(&bytes, &mut events);
        parser.flush_pending(&mut events);
    }

    /// Splitting a byte stream into two chunks at any boundary produces the
    /// same events as feeding it whole, since the parser must survive a
    /// control sequence split across reads.
    #[test]
    fn chunk_boundary_does_not_change_output(
        bytes in prop::collection::vec(prop_oneof![Just(0x1bu8), Just(b'['), Just(b'A'), Just(b'a'), Just(b'\r'), Just(b'\n')], 0..32),
        split in 0usize..32,
    ) {
        let split = split.min(bytes.len());

        let mut whole = Parser::new();
        let mut whole_events = Vec::new();
        whole.feed(&bytes, &mut whole_events);
        whole.flush_pending(&mut whole_events);

        let mut chunked = Parser::new();
        let mut chunked_events = Vec::new();
        chunked.feed(&bytes[..split], &mut chunked_events);
        chunked.feed(&bytes[split..], &mut chunked_events);
        chunked.flush_pending(&mut chunked_events);

        prop_assert_eq!(whole_events, chunked_events);
    }

    /// A renderer fed the same view twice writes nothing the second time,
    /// and fed a changed view only writes bytes (never panics) regardless
    /// of line count or content.
    #[test]
    fn renderer_repaints_without_panicking(
        lines_a in prop::collection::vec("[a-zA-Z0-9 ]{0,40}", 1..10),
        lines_b in prop::collection::vec("[a-zA-Z0-9 ]{0,40}", 1..10),
    ) {
        let mut out = Vec::new();
        let mut renderer = Renderer::new(&mut out, 60);
        renderer.write(lines_a.join("\n"));
        let _ = renderer.flush();
        renderer.write(lines_b.join("\n"));
        let _ = renderer.flush();
    }
}
