//! Incremental ANSI/VT100 input-byte parser.
//!
//! Bytes arrive from the tty in whatever chunks the kernel hands back; a
//! control sequence can be split across reads. [`Parser`] is a small
//! pushdown automaton that survives that split: partially-seen sequences
//! are buffered and resumed on the next call to [`Parser::feed`].
//!
//! No terminfo/termcap lookup happens here — every sequence recognized is a
//! literal byte pattern against a VT100/xterm baseline, matching the
//! sequences this crate's renderer emits (see `renderer.rs`).

use crate::key::{KeyModifiers, KeyMsg, KeyType};
use crate::mouse::{MouseAction, MouseButton, MouseMsg};

const ESC: u8 = 0x1b;

/// One decoded input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard event.
    Key(KeyMsg),
    /// A mouse event.
    Mouse(MouseMsg),
    /// Terminal gained focus.
    FocusIn,
    /// Terminal lost focus.
    FocusOut,
    /// Bracketed paste began.
    PasteStart,
    /// A chunk of pasted text (the parser may split one paste into several
    /// chunks if it arrives across multiple `feed` calls).
    PasteChunk(String),
    /// Bracketed paste ended.
    PasteEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
    Ss3,
    Osc,
    Dcs,
    Paste,
    /// Three raw payload bytes following a bare `ESC [ M` (legacy X10 mouse).
    X10Mouse,
}

/// Stateful incremental parser; one instance per program run.
#[derive(Debug)]
pub struct Parser {
    state: State,
    /// Bytes of the sequence in progress, not including the leading ESC.
    seq: Vec<u8>,
    /// Accumulated UTF-8 continuation bytes for a multi-byte rune in Ground.
    utf8_pending: Vec<u8>,
    utf8_expected: usize,
    paste_buf: String,
    /// A lone CR seen in `Ground`, held back one byte in case it's the first
    /// half of a CRLF pair (which collapses to a single `Enter`).
    pending_cr: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a fresh parser in the `Ground` state.
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            seq: Vec::new(),
            utf8_pending: Vec::new(),
            utf8_expected: 0,
            paste_buf: String::new(),
            pending_cr: false,
        }
    }

    /// Feed a chunk of bytes, appending any decoded events to `out`.
    pub fn feed(&mut self, bytes: &[u8], out: &mut Vec<InputEvent>) {
        for &b in bytes {
            self.feed_byte(b, out);
        }
    }

    /// Called when no further bytes arrived within one poll cycle. A lone
    /// `ESC` with nothing buffered after it resolves to `Key::Escape`;
    /// a lone `ESC` with a partial CSI/SS3/OSC/DCS sequence is dropped
    /// rather than held forever.
    pub fn flush_pending(&mut self, out: &mut Vec<InputEvent>) {
        if self.pending_cr {
            self.pending_cr = false;
            out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Enter)));
        }
        match self.state {
            State::Escape if self.seq.is_empty() => {
                out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Esc)));
            }
            State::Ground => {}
            _ => {
                // Incomplete sequence with no more data coming: drop it
                // silently per the parser's malformed-input contract.
            }
        }
        self.state = State::Ground;
        self.seq.clear();
    }

    fn feed_byte(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        if self.pending_cr {
            self.pending_cr = false;
            out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Enter)));
            if b == 0x0A {
                return;
            }
            // CR wasn't followed by LF; `b` still needs processing below.
        }
        match self.state {
            State::Ground => self.feed_ground(b, out),
            State::Escape => self.feed_escape(b, out),
            State::Csi => self.feed_csi(b, out),
            State::Ss3 => self.feed_ss3(b, out),
            State::Osc => self.feed_osc(b),
            State::Dcs => self.feed_dcs(b),
            State::Paste => self.feed_paste(b, out),
            State::X10Mouse => self.feed_x10_mouse(b, out),
        }
    }

    fn feed_ground(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        if !self.utf8_pending.is_empty() {
            if (b & 0xC0) == 0x80 {
                self.utf8_pending.push(b);
                if self.utf8_pending.len() == self.utf8_expected {
                    self.emit_utf8(out);
                }
                return;
            }
            // Invalid continuation: drop what we had and reprocess b fresh.
            self.utf8_pending.clear();
            self.utf8_expected = 0;
        }

        match b {
            ESC => {
                self.state = State::Escape;
                self.seq.clear();
            }
            0x00 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Null))),
            0x08 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::CtrlH))),
            0x09 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Tab))),
            0x0D => self.pending_cr = true,
            0x0A => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Enter))),
            0x7F => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Backspace))),
            0x01..=0x1A => {
                out.push(InputEvent::Key(KeyMsg::from_type(control_key_type(b))));
            }
            0x1C..=0x1F => {
                out.push(InputEvent::Key(KeyMsg::from_type(control_key_type(b))));
            }
            0x20 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Space))),
            0x00..=0x7F => {
                out.push(InputEvent::Key(KeyMsg::from_char(b as char)));
            }
            _ => {
                let expected = utf8_len(b);
                if expected <= 1 {
                    // Invalid leading byte; drop it silently.
                    return;
                }
                self.utf8_expected = expected;
                self.utf8_pending = vec![b];
            }
        }
    }

    fn emit_utf8(&mut self, out: &mut Vec<InputEvent>) {
        if let Ok(s) = std::str::from_utf8(&self.utf8_pending) {
            if let Some(c) = s.chars().next() {
                out.push(InputEvent::Key(KeyMsg::from_char(c)));
            }
        }
        self.utf8_pending.clear();
        self.utf8_expected = 0;
    }

    fn feed_escape(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        match b {
            b'[' => self.state = State::Csi,
            b'O' => self.state = State::Ss3,
            b']' => self.state = State::Osc,
            b'P' => self.state = State::Dcs,
            ESC => {
                // ESC ESC: treat the first as a standalone Escape key and
                // restart escape processing on the second.
                out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Esc)));
            }
            0x20..=0x7E => {
                out.push(InputEvent::Key(KeyMsg::from_char(b as char).with_alt()));
                self.state = State::Ground;
            }
            _ => {
                // Unrecognized escape follow-up; drop and resync.
                self.state = State::Ground;
            }
        }
    }

    fn feed_ss3(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        let kt = match b {
            b'P' => Some(KeyType::F1),
            b'Q' => Some(KeyType::F2),
            b'R' => Some(KeyType::F3),
            b'S' => Some(KeyType::F4),
            b'A' => Some(KeyType::Up),
            b'B' => Some(KeyType::Down),
            b'C' => Some(KeyType::Right),
            b'D' => Some(KeyType::Left),
            b'H' => Some(KeyType::Home),
            b'F' => Some(KeyType::End),
            _ => None,
        };
        if let Some(kt) = kt {
            out.push(InputEvent::Key(KeyMsg::from_type(kt)));
        }
        self.state = State::Ground;
    }

    fn feed_csi(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        // `ESC [ M` with nothing buffered yet is legacy X10 mouse, whose
        // three payload bytes are raw (not digits) and must be read
        // literally rather than matched as a CSI final byte.
        if b == b'M' && self.seq.is_empty() {
            self.state = State::X10Mouse;
            return;
        }
        match b {
            0x30..=0x3F | b';' => {
                self.seq.push(b);
            }
            0x40..=0x7E => {
                self.dispatch_csi(b, out);
                self.state = State::Ground;
                self.seq.clear();
            }
            _ => {
                // Malformed CSI byte; abandon the sequence.
                self.state = State::Ground;
                self.seq.clear();
            }
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8, out: &mut Vec<InputEvent>) {
        let seq = self.seq.clone();
        let params_str = String::from_utf8_lossy(&seq).into_owned();

        if seq.first() == Some(&b'<') {
            self.dispatch_sgr_mouse(&params_str[1..], final_byte, out);
            return;
        }

        let params: Vec<i64> = params_str
            .split(';')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        match final_byte {
            b'A' => self.push_cursor(out, KeyType::Up, KeyType::ShiftUp, KeyType::CtrlUp, KeyType::CtrlShiftUp, &params),
            b'B' => self.push_cursor(out, KeyType::Down, KeyType::ShiftDown, KeyType::CtrlDown, KeyType::CtrlShiftDown, &params),
            b'C' => self.push_cursor(out, KeyType::Right, KeyType::ShiftRight, KeyType::CtrlRight, KeyType::CtrlShiftRight, &params),
            b'D' => self.push_cursor(out, KeyType::Left, KeyType::ShiftLeft, KeyType::CtrlLeft, KeyType::CtrlShiftLeft, &params),
            b'H' => self.push_cursor(out, KeyType::Home, KeyType::ShiftHome, KeyType::CtrlHome, KeyType::CtrlShiftHome, &params),
            b'F' => self.push_cursor(out, KeyType::End, KeyType::ShiftEnd, KeyType::CtrlEnd, KeyType::CtrlShiftEnd, &params),
            b'Z' => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::ShiftTab))),
            b'I' => out.push(InputEvent::FocusIn),
            b'O' if self.seq.is_empty() => out.push(InputEvent::FocusOut),
            b'~' => self.dispatch_tilde(&params, out),
            _ => {}
        }
    }

    fn push_cursor(
        &self,
        out: &mut Vec<InputEvent>,
        plain: KeyType,
        shift: KeyType,
        ctrl: KeyType,
        ctrl_shift: KeyType,
        params: &[i64],
    ) {
        let modifier = params.get(1).copied().unwrap_or(1);
        let kt = match modifier {
            2 => shift,
            5 => ctrl,
            6 => ctrl_shift,
            _ => plain,
        };
        out.push(InputEvent::Key(KeyMsg::from_type(kt).with_modifiers(modifiers_for(modifier))));
    }

    fn dispatch_tilde(&mut self, params: &[i64], out: &mut Vec<InputEvent>) {
        let code = params.first().copied().unwrap_or(0);
        match code {
            1 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Home))),
            2 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Insert))),
            3 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::Delete))),
            4 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::End))),
            5 => {
                let kt = if params.get(1) == Some(&5) { KeyType::CtrlPgUp } else { KeyType::PgUp };
                out.push(InputEvent::Key(KeyMsg::from_type(kt)));
            }
            6 => {
                let kt = if params.get(1) == Some(&5) { KeyType::CtrlPgDown } else { KeyType::PgDown };
                out.push(InputEvent::Key(KeyMsg::from_type(kt)));
            }
            11 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F1))),
            12 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F2))),
            13 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F3))),
            14 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F4))),
            15 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F5))),
            17 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F6))),
            18 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F7))),
            19 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F8))),
            20 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F9))),
            21 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F10))),
            23 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F11))),
            24 => out.push(InputEvent::Key(KeyMsg::from_type(KeyType::F12))),
            200 => {
                self.state = State::Paste;
                self.paste_buf.clear();
                out.push(InputEvent::PasteStart);
            }
            201 => out.push(InputEvent::PasteEnd),
            _ => {}
        }
    }

    fn dispatch_sgr_mouse(&self, body: &str, final_byte: u8, out: &mut Vec<InputEvent>) {
        let parts: Vec<&str> = body.split(';').collect();
        if parts.len() != 3 {
            return;
        }
        let (Ok(code), Ok(x), Ok(y)) = (
            parts[0].parse::<u8>(),
            parts[1].parse::<u16>(),
            parts[2].parse::<u16>(),
        ) else {
            return;
        };

        let shift = code & 0x04 != 0;
        let alt = code & 0x08 != 0;
        let ctrl = code & 0x10 != 0;
        let motion = code & 0x20 != 0;
        let wheel = code & 0x40 != 0;
        let base = code & 0x03;

        let button = if wheel {
            if base == 0 { MouseButton::WheelUp } else { MouseButton::WheelDown }
        } else {
            match base {
                0 => MouseButton::Left,
                1 => MouseButton::Middle,
                2 => MouseButton::Right,
                _ => MouseButton::None,
            }
        };

        let action = if wheel {
            MouseAction::Wheel
        } else if motion {
            MouseAction::Motion
        } else if final_byte == b'm' {
            MouseAction::Release
        } else {
            MouseAction::Press
        };

        out.push(InputEvent::Mouse(MouseMsg {
            x,
            y,
            shift,
            alt,
            ctrl,
            action,
            button,
        }));
    }

    fn feed_x10_mouse(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        self.seq.push(b);
        if self.seq.len() == 3 {
            self.dispatch_x10_mouse(out);
            self.seq.clear();
            self.state = State::Ground;
        }
    }

    /// Legacy X10 mouse report: `Cb`, `Cx`, `Cy` each offset by 32, with
    /// `Cx`/`Cy` additionally 1-based. `Cb & 0x03 == 3` means release and
    /// carries no button identity.
    fn dispatch_x10_mouse(&self, out: &mut Vec<InputEvent>) {
        let [cb, cx, cy] = [self.seq[0], self.seq[1], self.seq[2]];
        let code = cb.wrapping_sub(32);
        let shift = code & 0x04 != 0;
        let alt = code & 0x08 != 0;
        let ctrl = code & 0x10 != 0;
        let motion = code & 0x20 != 0;
        let wheel = code & 0x40 != 0;
        let base = code & 0x03;

        let button = if wheel {
            if base == 0 { MouseButton::WheelUp } else { MouseButton::WheelDown }
        } else {
            match base {
                0 => MouseButton::Left,
                1 => MouseButton::Middle,
                2 => MouseButton::Right,
                _ => MouseButton::None,
            }
        };

        let action = if wheel {
            MouseAction::Wheel
        } else if motion {
            MouseAction::Motion
        } else if base == 3 {
            MouseAction::Release
        } else {
            MouseAction::Press
        };

        out.push(InputEvent::Mouse(MouseMsg {
            x: u16::from(cx.wrapping_sub(32)),
            y: u16::from(cy.wrapping_sub(32)),
            shift,
            alt,
            ctrl,
            action,
            button,
        }));
    }

    fn feed_osc(&mut self, b: u8) {
        if b == 0x07 || (b == b'\\' && self.seq.last() == Some(&ESC)) {
            self.state = State::Ground;
            self.seq.clear();
            return;
        }
        self.seq.push(b);
    }

    fn feed_dcs(&mut self, b: u8) {
        if b == 0x07 || (b == b'\\' && self.seq.last() == Some(&ESC)) {
            self.state = State::Ground;
            self.seq.clear();
            return;
        }
        self.seq.push(b);
    }

    fn feed_paste(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        // Watch for the paste-end sequence `ESC [ 201 ~` byte-by-byte while
        // accumulating everything else (including embedded control bytes
        // and newlines) as literal paste text.
        const END: &[u8] = b"\x1b[201~";
        self.seq.push(b);
        if self.seq.len() > END.len() {
            let drop = self.seq.len() - END.len();
            self.paste_buf.push_str(&String::from_utf8_lossy(&self.seq[..drop]));
            self.seq.drain(..drop);
        }
        if self.seq.as_slice() == END {
            if !self.paste_buf.is_empty() {
                out.push(InputEvent::PasteChunk(std::mem::take(&mut self.paste_buf)));
            }
            out.push(InputEvent::PasteEnd);
            self.seq.clear();
            self.state = State::Ground;
        }
    }
}

fn modifiers_for(param: i64) -> KeyModifiers {
    // xterm modifier parameter encoding: value-1 is a bitmask of
    // Shift(1)/Alt(2)/Ctrl(4).
    let bits = (param - 1).max(0) as u8;
    let mut m = KeyModifiers::empty();
    if bits & 0b001 != 0 {
        m |= KeyModifiers::SHIFT;
    }
    if bits & 0b010 != 0 {
        m |= KeyModifiers::ALT;
    }
    if bits & 0b100 != 0 {
        m |= KeyModifiers::CTRL;
    }
    m
}

fn control_key_type(b: u8) -> KeyType {
    match b {
        1 => KeyType::CtrlA,
        2 => KeyType::CtrlB,
        3 => KeyType::CtrlC,
        4 => KeyType::CtrlD,
        5 => KeyType::CtrlE,
        6 => KeyType::CtrlF,
        7 => KeyType::CtrlG,
        8 => KeyType::CtrlH,
        9 => KeyType::Tab,
        10 => KeyType::CtrlJ,
        11 => KeyType::CtrlK,
        12 => KeyType::CtrlL,
        13 => KeyType::Enter,
        14 => KeyType::CtrlN,
        15 => KeyType::CtrlO,
        16 => KeyType::CtrlP,
        17 => KeyType::CtrlQ,
        18 => KeyType::CtrlR,
        19 => KeyType::CtrlS,
        20 => KeyType::CtrlT,
        21 => KeyType::CtrlU,
        22 => KeyType::CtrlV,
        23 => KeyType::CtrlW,
        24 => KeyType::CtrlX,
        25 => KeyType::CtrlY,
        26 => KeyType::CtrlZ,
        28 => KeyType::CtrlBackslash,
        29 => KeyType::CtrlCloseBracket,
        30 => KeyType::CtrlCaret,
        31 => KeyType::CtrlUnderscore,
        _ => KeyType::Null,
    }
}

fn utf8_len(lead: u8) -> usize {
    if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Vec<InputEvent> {
        let mut p = Parser::new();
        let mut out = Vec::new();
        p.feed(bytes, &mut out);
        out
    }

    #[test]
    fn plain_char() {
        let events = parse(b"a");
        assert_eq!(events, vec![InputEvent::Key(KeyMsg::from_char('a'))]);
    }

    #[test]
    fn ctrl_c() {
        let events = parse(&[0x03]);
        assert_eq!(events, vec![InputEvent::Key(KeyMsg::from_type(KeyType::CtrlC))]);
    }

    #[test]
    fn enter_crlf() {
        let events = parse(b"\r\n");
        assert_eq!(events, vec![InputEvent::Key(KeyMsg::from_type(KeyType::Enter))]);
    }

    #[test]
    fn enter_lone_cr_resolves_on_flush() {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.feed(b"\r", &mut events);
        assert!(events.is_empty());
        parser.flush_pending(&mut events);
        assert_eq!(events, vec![InputEvent::Key(KeyMsg::from_type(KeyType::Enter))]);
    }

    #[test]
    fn enter_cr_followed_by_other_byte_emits_both() {
        let events = parse(b"\raX");
        assert_eq!(
            events,
            vec![
                InputEvent::Key(KeyMsg::from_type(KeyType::Enter)),
                InputEvent::Key(KeyMsg::from_char('a')),
                InputEvent::Key(KeyMsg::from_char('X')),
            ]
        );
    }

    #[test]
    fn cursor_up() {
        let events = parse(b"\x1b[A");
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], InputEvent::Key(k) if k.key_type == KeyType::Up));
    }

    #[test]
    fn ss3_f1() {
        let events = parse(b"\x1bOP");
        assert!(matches!(&events[0], InputEvent::Key(k) if k.key_type == KeyType::F1));
    }

    #[test]
    fn alt_plus_char() {
        let events = parse(b"\x1ba");
        match &events[0] {
            InputEvent::Key(k) => {
                assert!(k.alt);
                assert_eq!(k.runes, vec!['a']);
            }
            _ => panic!("expected key"),
        }
    }

    #[test]
    fn lone_escape_flushed() {
        let mut p = Parser::new();
        let mut out = Vec::new();
        p.feed(b"\x1b", &mut out);
        assert!(out.is_empty());
        p.flush_pending(&mut out);
        assert_eq!(out, vec![InputEvent::Key(KeyMsg::from_type(KeyType::Esc))]);
    }

    #[test]
    fn sgr_mouse_press() {
        let events = parse(b"\x1b[<0;10;20M");
        assert_eq!(
            events,
            vec![InputEvent::Mouse(MouseMsg {
                x: 10,
                y: 20,
                shift: false,
                alt: false,
                ctrl: false,
                action: MouseAction::Press,
                button: MouseButton::Left,
            })]
        );
    }

    #[test]
    fn x10_mouse_press() {
        // Cb=0 (left, press) + 32, Cx=10+32, Cy=20+32.
        let events = parse(&[ESC, b'[', b'M', 32, 42, 52]);
        assert_eq!(
            events,
            vec![InputEvent::Mouse(MouseMsg {
                x: 10,
                y: 20,
                shift: false,
                alt: false,
                ctrl: false,
                action: MouseAction::Press,
                button: MouseButton::Left,
            })]
        );
    }

    #[test]
    fn x10_mouse_release() {
        // Cb=3 (release) + 32.
        let events = parse(&[ESC, b'[', b'M', 35, 33, 33]);
        assert!(matches!(&events[0], InputEvent::Mouse(m) if m.action == MouseAction::Release));
    }

    #[test]
    fn x10_mouse_split_across_feeds() {
        let mut p = Parser::new();
        let mut out = Vec::new();
        p.feed(&[ESC, b'[', b'M'], &mut out);
        assert!(out.is_empty());
        p.feed(&[32, 42], &mut out);
        assert!(out.is_empty());
        p.feed(&[52], &mut out);
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], InputEvent::Mouse(m) if m.x == 10 && m.y == 20));
    }

    #[test]
    fn sgr_mouse_release() {
        let events = parse(b"\x1b[<0;5;6m");
        assert!(matches!(&events[0], InputEvent::Mouse(m) if m.action == MouseAction::Release));
    }

    #[test]
    fn focus_events() {
        assert_eq!(parse(b"\x1b[I"), vec![InputEvent::FocusIn]);
        assert_eq!(parse(b"\x1b[O"), vec![InputEvent::FocusOut]);
    }

    #[test]
    fn bracketed_paste_roundtrip() {
        let events = parse(b"\x1b[200~hello world\x1b[201~");
        assert_eq!(
            events,
            vec![
                InputEvent::PasteStart,
                InputEvent::PasteChunk("hello world".to_string()),
                InputEvent::PasteEnd,
            ]
        );
    }

    #[test]
    fn bracketed_paste_split_across_feeds() {
        let mut p = Parser::new();
        let mut out = Vec::new();
        p.feed(b"\x1b[200~hel", &mut out);
        p.feed(b"lo\x1b[201~", &mut out);
        assert_eq!(
            out,
            vec![
                InputEvent::PasteStart,
                InputEvent::PasteChunk("hello".to_string()),
                InputEvent::PasteEnd,
            ]
        );
    }

    #[test]
    fn unicode_rune() {
        let events = parse("é".as_bytes());
        assert_eq!(events, vec![InputEvent::Key(KeyMsg::from_char('é'))]);
    }

    #[test]
    fn malformed_csi_dropped() {
        // An unterminated OSC-like sequence should not emit a stray key.
        let mut p = Parser::new();
        let mut out = Vec::new();
        p.feed(b"\x1b]0;title\x07a", &mut out);
        assert_eq!(out, vec![InputEvent::Key(KeyMsg::from_char('a'))]);
    }

    #[test]
    fn backspace_and_tab() {
        assert_eq!(parse(&[0x7f]), vec![InputEvent::Key(KeyMsg::from_type(KeyType::Backspace))]);
        assert_eq!(parse(&[0x09]), vec![InputEvent::Key(KeyMsg::from_type(KeyType::Tab))]);
    }
}
