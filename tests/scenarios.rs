//! End-to-end scenario tests driving the public API the way an application
//! author would: a `Model`, a sequence of messages, and the resulting view.

use matcha::simulator::ProgramSimulator;
use matcha::{quit, Cmd, Message, Model};

struct CounterModel {
    count: i32,
}

enum CounterMsg {
    Increment,
    Reset,
}

impl Model for CounterModel {
    fn update(&mut self, msg: Message) -> Option<Cmd> {
        match msg.downcast_ref::<CounterMsg>() {
            Some(CounterMsg::Increment) => self.count += 1,
            Some(CounterMsg::Reset) => self.count = 0,
            None => {}
        }
        None
    }

    fn view(&self) -> String {
        format!("Count: {}", self.count)
    }
}

#[test]
fn counter_increments() {
    let mut sim = ProgramSimulator::new(CounterModel { count: 0 });
    sim.send(Message::new(CounterMsg::Increment));
    sim.send(Message::new(CounterMsg::Increment));
    sim.send(Message::new(CounterMsg::Reset));
    sim.send(Message::new(CounterMsg::Increment));
    sim.run_until_empty();

    assert_eq!(sim.model().count, 1);
    assert!(sim.last_view().unwrap().contains("Count: 1"));
}

#[test]
fn parse_mouse_click() {
    use matcha::parser::{InputEvent, Parser};
    use matcha::{MouseAction, MouseButton};

    let mut parser = Parser::new();
    let mut events = Vec::new();
    parser.feed(b"\x1b[<0;10;20M", &mut events);

    assert_eq!(events.len(), 1);
    match &events[0] {
        InputEvent::Mouse(m) => {
            assert_eq!(m.x, 10);
            assert_eq!(m.y, 20);
            assert_eq!(m.button, MouseButton::Left);
            assert_eq!(m.action, MouseAction::Press);
        }
        other => panic!("expected a mouse event, got {other:?}"),
    }
}

/// A `Write` sink that can be drained from outside the `Renderer` that owns
/// it, since `Renderer` takes its writer by value and exposes no getter.
#[derive(Clone, Default)]
struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

#[test]
fn diff_emits_only_the_changed_line() {
    use matcha::renderer::Renderer;

    let buf = SharedBuf::default();
    let mut renderer = Renderer::new(buf.clone(), 60);
    renderer.write("A\nB\nC".to_string());
    renderer.flush().unwrap();
    buf.take();

    renderer.write("A\nX\nC".to_string());
    renderer.flush().unwrap();

    let text = String::from_utf8(buf.take()).unwrap();
    assert_eq!(text, "\x1b[2;1HX\x1b[K\x1b[3;1H");
}

#[test]
fn println_queues_a_line_above_the_ui() {
    use matcha::renderer::Renderer;

    let buf = SharedBuf::default();
    let mut renderer = Renderer::new(buf.clone(), 60);
    renderer.write("row1\nrow2\nrow3\nrow4\nrow5".to_string());
    renderer.flush().unwrap();
    buf.take();

    renderer.insert_above("hello".to_string());
    renderer.flush().unwrap();

    let text = String::from_utf8(buf.take()).unwrap();
    assert!(text.starts_with("\x1b[1;5r\x1b[1;1H\x1b[1Lhello\r\n\x1b[r"));
}

struct QuitOnFirstMessage;

impl Model for QuitOnFirstMessage {
    fn update(&mut self, _msg: Message) -> Option<Cmd> {
        Some(quit())
    }

    fn view(&self) -> String {
        "bye".to_string()
    }
}

#[test]
fn quit_command_ends_the_simulation() {
    let mut sim = ProgramSimulator::new(QuitOnFirstMessage);
    sim.send(Message::new(()));
    sim.run_until_empty();

    assert!(sim.is_quit());
    assert_eq!(sim.stats().update_calls, 1);

    // Once quit has been requested, further steps don't reach the model.
    sim.send(Message::new(()));
    sim.run_until_quit(4);
    assert_eq!(sim.stats().update_calls, 1);
}
