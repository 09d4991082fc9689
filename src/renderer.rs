//! Diffing line renderer.
//!
//! Converts successive `view()` strings into the minimal ANSI writes that
//! bring the terminal's displayed state in line with the model, at a
//! bounded frame rate. All sequences emitted here are literal VT100/xterm
//! bytes — there is no terminfo/termcap lookup and no configurability of
//! the wire format.

use std::collections::HashSet;
use std::io::{self, Write};
use std::ops::Range;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Mouse reporting mode for [`Renderer::enable_mouse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    /// Report button press/release only.
    CellMotion,
    /// Report all motion, including with no button held.
    AllMotion,
}

/// Renderer state shared with the program runtime. Only the renderer's own
/// task mutates it directly; the signal-handling thread reaches in through
/// [`Renderer::request_full_redraw`] to force a redraw after `SIGCONT`.
pub struct Renderer<W: Write> {
    out: W,
    last_render: Vec<String>,
    ignored_lines: HashSet<usize>,
    queued_lines: Vec<String>,
    pending_frame: Option<String>,
    fps: u32,
    last_flush: Option<Instant>,
    alt_screen: bool,
    cursor_visible: bool,
    mouse_mode: Option<MouseMode>,
    bracketed_paste: bool,
    focus_reporting: bool,
    scroll_region: Option<(u16, u16)>,
    force_redraw: std::sync::Arc<Mutex<bool>>,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer writing to `out`, targeting `fps` frames per second.
    pub fn new(out: W, fps: u32) -> Self {
        Self {
            out,
            last_render: Vec::new(),
            ignored_lines: HashSet::new(),
            queued_lines: Vec::new(),
            pending_frame: None,
            fps: fps.clamp(1, 120),
            last_flush: None,
            alt_screen: false,
            cursor_visible: true,
            mouse_mode: None,
            bracketed_paste: false,
            focus_reporting: false,
            scroll_region: None,
            force_redraw: std::sync::Arc::new(Mutex::new(false)),
        }
    }

    /// A cheap handle other threads (signal handling) can use to request
    /// that the next flush perform a full redraw rather than a diff.
    pub fn redraw_handle(&self) -> std::sync::Arc<Mutex<bool>> {
        self.force_redraw.clone()
    }

    /// Request a full redraw on the next flush, bypassing the diff.
    pub fn request_full_redraw(&mut self) {
        *self.force_redraw.lock() = true;
    }

    fn minimum_frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Returns true if enough time has elapsed since the last flush for a
    /// new frame to be worth emitting at the configured `fps`.
    pub fn ready_for_tick(&self) -> bool {
        match self.last_flush {
            None => true,
            Some(t) => t.elapsed() >= self.minimum_frame_period(),
        }
    }

    /// Set the pending frame without emitting anything yet.
    pub fn write(&mut self, frame: String) {
        self.pending_frame = Some(frame);
    }

    /// Discard the previous frame so the next flush performs a full redraw.
    pub fn clear_screen(&mut self) {
        self.last_render.clear();
        self.request_full_redraw();
    }

    /// Enter the terminal's alternate screen buffer.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            return Ok(());
        }
        self.alt_screen = true;
        self.last_render.clear();
        write!(self.out, "\x1b[?1049h")?;
        self.out.flush()
    }

    /// Exit the terminal's alternate screen buffer.
    pub fn exit_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            return Ok(());
        }
        self.alt_screen = false;
        write!(self.out, "\x1b[?1049l")?;
        self.out.flush()
    }

    /// Show the terminal cursor.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        if self.cursor_visible {
            return Ok(());
        }
        self.cursor_visible = true;
        write!(self.out, "\x1b[?25h")?;
        self.out.flush()
    }

    /// Hide the terminal cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if !self.cursor_visible {
            return Ok(());
        }
        self.cursor_visible = false;
        write!(self.out, "\x1b[?25l")?;
        self.out.flush()
    }

    /// Enable mouse reporting in the given mode.
    pub fn enable_mouse(&mut self, mode: MouseMode) -> io::Result<()> {
        if self.mouse_mode == Some(mode) {
            return Ok(());
        }
        self.mouse_mode = Some(mode);
        let base = match mode {
            MouseMode::CellMotion => "\x1b[?1000h",
            MouseMode::AllMotion => "\x1b[?1003h",
        };
        write!(self.out, "{base}\x1b[?1006h")?;
        self.out.flush()
    }

    /// Disable mouse reporting.
    pub fn disable_mouse(&mut self) -> io::Result<()> {
        let Some(mode) = self.mouse_mode.take() else {
            return Ok(());
        };
        let base = match mode {
            MouseMode::CellMotion => "\x1b[?1000l",
            MouseMode::AllMotion => "\x1b[?1003l",
        };
        write!(self.out, "{base}\x1b[?1006l")?;
        self.out.flush()
    }

    /// Enable bracketed paste mode.
    pub fn enable_bracketed_paste(&mut self) -> io::Result<()> {
        if self.bracketed_paste {
            return Ok(());
        }
        self.bracketed_paste = true;
        write!(self.out, "\x1b[?2004h")?;
        self.out.flush()
    }

    /// Disable bracketed paste mode.
    pub fn disable_bracketed_paste(&mut self) -> io::Result<()> {
        if !self.bracketed_paste {
            return Ok(());
        }
        self.bracketed_paste = false;
        write!(self.out, "\x1b[?2004l")?;
        self.out.flush()
    }

    /// Enable focus in/out reporting.
    pub fn enable_focus_reporting(&mut self) -> io::Result<()> {
        if self.focus_reporting {
            return Ok(());
        }
        self.focus_reporting = true;
        write!(self.out, "\x1b[?1004h")?;
        self.out.flush()
    }

    /// Disable focus in/out reporting.
    pub fn disable_focus_reporting(&mut self) -> io::Result<()> {
        if !self.focus_reporting {
            return Ok(());
        }
        self.focus_reporting = false;
        write!(self.out, "\x1b[?1004l")?;
        self.out.flush()
    }

    /// Emit the OSC sequence that sets the terminal's window title.
    pub fn set_window_title(&mut self, title: &str) -> io::Result<()> {
        write!(self.out, "\x1b]2;{title}\x07")?;
        self.out.flush()
    }

    /// Set a scroll region, rows 1-based inclusive.
    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) -> io::Result<()> {
        self.scroll_region = Some((top, bottom));
        write!(self.out, "\x1b[{top};{bottom}r")
    }

    /// Reset to the full-screen scroll region.
    pub fn reset_scroll_region(&mut self) -> io::Result<()> {
        self.scroll_region = None;
        write!(self.out, "\x1b[r")
    }

    /// Mark a range of frame-relative row indices as owned by external
    /// output; the diff engine will never write to them.
    pub fn ignore_lines(&mut self, rows: Range<usize>) {
        self.ignored_lines.extend(rows);
    }

    /// Clear all ignored-line markers.
    pub fn clear_ignored(&mut self) {
        self.ignored_lines.clear();
    }

    /// Queue a raw line to appear above the UI on the next flush.
    pub fn insert_above(&mut self, text: String) {
        self.queued_lines.push(text);
    }

    /// Emit the diff between the pending frame and the last rendered frame.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_queued_lines()?;

        let Some(frame) = self.pending_frame.take() else {
            return Ok(());
        };

        let force = {
            let mut guard = self.force_redraw.lock();
            std::mem::replace(&mut *guard, false)
        };
        if force {
            self.last_render.clear();
        }

        let new_lines: Vec<String> = frame.split('\n').map(str::to_owned).collect();
        let old_len = self.last_render.len();

        for (idx, new_line) in new_lines.iter().enumerate() {
            if self.ignored_lines.contains(&idx) {
                continue;
            }
            let changed = idx >= old_len || &self.last_render[idx] != new_line;
            if changed {
                write!(self.out, "\x1b[{};1H", idx + 1)?;
                write!(self.out, "{new_line}\x1b[K")?;
            }
        }

        for idx in new_lines.len()..old_len {
            if self.ignored_lines.contains(&idx) {
                continue;
            }
            write!(self.out, "\x1b[{};1H\x1b[K", idx + 1)?;
        }

        write!(self.out, "\x1b[{};1H", new_lines.len())?;
        self.out.flush()?;

        self.last_render = new_lines;
        self.last_flush = Some(Instant::now());
        Ok(())
    }

    fn flush_queued_lines(&mut self) -> io::Result<()> {
        if self.queued_lines.is_empty() {
            return Ok(());
        }
        let ui_height = self.last_render.len().max(1) as u16;
        write!(self.out, "\x1b[1;{ui_height}r")?;
        write!(self.out, "\x1b[1;1H")?;
        for line in self.queued_lines.drain(..) {
            write!(self.out, "\x1b[1L{line}\r\n")?;
        }
        write!(self.out, "\x1b[r")?;
        self.out.flush()
    }

    /// Restore the terminal to a sane state regardless of entry options.
    /// Called exactly once, on program shutdown.
    pub fn stop(&mut self) -> io::Result<()> {
        self.disable_mouse()?;
        self.disable_bracketed_paste()?;
        self.disable_focus_reporting()?;
        self.exit_alt_screen()?;
        self.show_cursor()?;
        write!(self.out, "\x1b[0m")?;
        write!(self.out, "\x1b[{};1H", self.last_render.len() + 1)?;
        write!(self.out, "\r\n")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), 60)
    }

    #[test]
    fn first_flush_writes_every_line() {
        let mut r = renderer();
        r.write("A\nB\nC".to_string());
        r.flush().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.contains("A"));
        assert!(out.contains("B"));
        assert!(out.contains("C"));
    }

    #[test]
    fn second_flush_only_rewrites_changed_line() {
        let mut r = renderer();
        r.write("A\nB\nC".to_string());
        r.flush().unwrap();
        r.out.clear();

        r.write("A\nX\nC".to_string());
        r.flush().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.contains("X"));
        assert!(!out.contains('B'));
        // row 2, col 1 move
        assert!(out.contains("\x1b[2;1H"));
    }

    #[test]
    fn ignored_lines_are_never_written() {
        let mut r = renderer();
        r.write("A\nB".to_string());
        r.flush().unwrap();
        r.out.clear();

        r.ignore_lines(0..1);
        r.write("Z\nB".to_string());
        r.flush().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(!out.contains('Z'));
    }

    #[test]
    fn shrinking_frame_blanks_trailing_rows() {
        let mut r = renderer();
        r.write("A\nB\nC".to_string());
        r.flush().unwrap();
        r.out.clear();

        r.write("A".to_string());
        r.flush().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.contains("\x1b[2;1H\x1b[K"));
        assert!(out.contains("\x1b[3;1H\x1b[K"));
    }

    #[test]
    fn alt_screen_toggle_is_idempotent() {
        let mut r = renderer();
        r.enter_alt_screen().unwrap();
        let len_after_first = r.out.len();
        r.enter_alt_screen().unwrap();
        assert_eq!(r.out.len(), len_after_first);
    }

    #[test]
    fn queued_lines_flush_before_diff() {
        let mut r = renderer();
        r.write("A".to_string());
        r.flush().unwrap();
        r.out.clear();

        r.insert_above("log line".to_string());
        r.write("A".to_string());
        r.flush().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.contains("log line"));
        assert!(out.contains("\x1b[1L"));
    }

    #[test]
    fn stop_restores_terminal() {
        let mut r = renderer();
        r.enter_alt_screen().unwrap();
        r.hide_cursor().unwrap();
        r.out.clear();
        r.stop().unwrap();
        let out = String::from_utf8(r.out.clone()).unwrap();
        assert!(out.contains("\x1b[?1049l"));
        assert!(out.contains("\x1b[?25h"));
        assert!(out.contains("\x1b[0m"));
    }
}
