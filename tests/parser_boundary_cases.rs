//! Boundary behaviors and round-trip laws for the input parser (see the
//! parser's own module docs for the sequences it recognizes).

use matcha::parser::{InputEvent, Parser};
use matcha::KeyType;

#[test]
fn split_sequence_completes_across_chunk_boundaries() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed(b"\x1b[", &mut events);
    assert!(events.is_empty());

    parser.feed(b"A", &mut events);
    assert_eq!(events.len(), 1);
    match &events[0] {
        InputEvent::Key(k) => assert_eq!(k.key_type, KeyType::Up),
        other => panic!("expected a key event, got {other:?}"),
    }
}

#[test]
fn concatenated_sequences_yield_events_in_order() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed(b"\x1b[A\x1b[B", &mut events);

    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (InputEvent::Key(a), InputEvent::Key(b)) => {
            assert_eq!(a.key_type, KeyType::Up);
            assert_eq!(b.key_type, KeyType::Down);
        }
        other => panic!("expected two key events, got {other:?}"),
    }
}

#[test]
fn lone_escape_resolves_on_flush() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed(b"\x1b", &mut events);
    assert!(events.is_empty(), "a bare ESC must not resolve until flushed");

    parser.flush_pending(&mut events);
    assert_eq!(events.len(), 1);
    match &events[0] {
        InputEvent::Key(k) => assert_eq!(k.key_type, KeyType::Esc),
        other => panic!("expected Key::Esc, got {other:?}"),
    }
}

#[test]
fn unterminated_sequence_does_not_panic_or_leak_on_flush() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed(b"\x1b[1;", &mut events);
    parser.flush_pending(&mut events);
    assert!(events.is_empty());
}

#[test]
fn multibyte_utf8_rune_is_assembled_before_emission() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed("é".as_bytes(), &mut events);

    assert_eq!(events.len(), 1);
    match &events[0] {
        InputEvent::Key(k) => {
            assert_eq!(k.key_type, KeyType::Runes);
            assert_eq!(k.runes, vec!['é']);
        }
        other => panic!("expected a rune key event, got {other:?}"),
    }
}

#[test]
fn carriage_return_and_linefeed_both_map_to_enter() {
    for input in [&b"\r"[..], &b"\n"[..], &b"\r\n"[..]] {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.feed(input, &mut events);
        parser.flush_pending(&mut events);
        assert_eq!(events.len(), 1, "input {input:?} should yield one event");
        match &events[0] {
            InputEvent::Key(k) => assert_eq!(k.key_type, KeyType::Enter),
            other => panic!("expected Key::Enter, got {other:?}"),
        }
    }
}

#[test]
fn bracketed_paste_coalesces_chunked_text() {
    let mut parser = Parser::new();
    let mut events = Vec::new();

    parser.feed(b"\x1b[200~hello ", &mut events);
    parser.feed(b"world\x1b[201~", &mut events);

    let pasted: String = events
        .iter()
        .filter_map(|ev| match ev {
            InputEvent::PasteChunk(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(pasted, "hello world");
    assert!(events.iter().any(|ev| matches!(ev, InputEvent::PasteStart)));
    assert!(events.iter().any(|ev| matches!(ev, InputEvent::PasteEnd)));
}
