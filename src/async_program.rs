//! Async program runtime, enabled by the `async` feature.
//!
//! Mirrors [`Program::run`] but drives the same dispatch functions
//! (`dispatch_cmd`, `dispatch_message`, `translate_input_event`) from a
//! tokio task instead of a dedicated OS thread, using
//! [`tokio::time::interval`] for frame pacing and `tokio::select!` to
//! multiplex input, messages, and ticks. The input reader and signal
//! bridge still run on blocking OS threads (tokio's blocking pool for the
//! former, `signal-hook`'s own thread for the latter) and are bridged in
//! via a single `std::sync::mpsc` channel, exactly like the sync engine.

use std::io::{self, Read, Write};
use std::sync::mpsc::{channel, Sender};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::message::{Message, QuitMsg, WindowSizeMsg};
use crate::parser::Parser;
use crate::program::{
    acquire_running_guard, dispatch_cmd, dispatch_message, render_final_frame,
    translate_input_event, Error, LoopSignal, Model, MouseMode, Program, Result,
};
use crate::renderer::{MouseMode as RenderMouseMode, Renderer};
use crate::signal::SignalBridge;

enum AsyncEvent {
    Bytes(Vec<u8>),
    Msg(Message),
    InputClosed,
}

impl<M: Model> Program<M> {
    /// Run the program on the current tokio runtime, reading from stdin.
    pub async fn run_async(self) -> Result<M> {
        let stdin = io::stdin();
        self.run_async_with_input(stdin).await
    }

    /// Run the program on the current tokio runtime, reading from `input`.
    pub async fn run_async_with_input<R: Read + Send + 'static>(
        mut self,
        input: R,
    ) -> Result<M> {
        let _running_guard = acquire_running_guard()?;

        crossterm::terminal::enable_raw_mode()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;
        let (width, height) = crossterm::terminal::size()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;

        let mut renderer = Renderer::new(
            std::mem::replace(&mut self.output, Box::new(io::sink())),
            self.fps,
        );
        let redraw_handle = renderer.redraw_handle();

        if self.alt_screen {
            renderer
                .enter_alt_screen()
                .map_err(|e| Error::TerminalUnavailable { cause: e })?;
        }
        match self.mouse_mode {
            MouseMode::Disabled => {}
            MouseMode::CellMotion => renderer
                .enable_mouse(RenderMouseMode::CellMotion)
                .map_err(|e| Error::TerminalUnavailable { cause: e })?,
            MouseMode::AllMotion => renderer
                .enable_mouse(RenderMouseMode::AllMotion)
                .map_err(|e| Error::TerminalUnavailable { cause: e })?,
        }
        if self.bracketed_paste {
            renderer
                .enable_bracketed_paste()
                .map_err(|e| Error::TerminalUnavailable { cause: e })?;
        }
        if self.report_focus {
            renderer
                .enable_focus_reporting()
                .map_err(|e| Error::TerminalUnavailable { cause: e })?;
        }

        let (std_tx, std_rx) = channel::<AsyncEvent>();
        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();

        // Bridge the blocking std receiver into a tokio channel so the
        // select loop below never blocks a worker thread.
        let (tokio_tx, mut tokio_rx) = tokio::sync::mpsc::channel::<AsyncEvent>(256);
        let bridge_cancel = cancel.clone();
        tracker.spawn_blocking(move || loop {
            if bridge_cancel.is_cancelled() {
                return;
            }
            match std_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(ev) => {
                    if tokio_tx.blocking_send(ev).is_err() {
                        return;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => return,
            }
        });

        spawn_reader(input, std_tx.clone());
        let msg_tx = to_message_sender(std_tx.clone());

        msg_tx
            .send(Message::new(WindowSizeMsg { width, height }))
            .ok();

        let signal_bridge = if self.without_signals {
            None
        } else {
            let resume_handle = redraw_handle.clone();
            let sig_tx = msg_tx.clone();
            Some(
                SignalBridge::spawn(
                    sig_tx,
                    || {
                        let _ = crossterm::terminal::disable_raw_mode();
                    },
                    move || {
                        let _ = crossterm::terminal::enable_raw_mode();
                        *resume_handle.lock() = true;
                    },
                )
                .map_err(|e| Error::TerminalUnavailable { cause: e })?,
            )
        };

        let mut parser = Parser::new();

        if let Some(cmd) = self.model.init() {
            let tx = msg_tx.clone();
            tracker.spawn_blocking(move || dispatch_cmd(cmd, &tx));
        }

        let mut last_view = self.model.view();
        renderer.write(last_view.clone());
        renderer
            .flush()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;

        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)));
        let mut frame_interval = tokio::time::interval(frame_duration);

        loop {
            tokio::select! {
                ev = tokio_rx.recv() => {
                    match ev {
                        Some(AsyncEvent::Bytes(bytes)) => {
                            let mut events = Vec::new();
                            parser.feed(&bytes, &mut events);
                            for e in events {
                                if let Some(m) = translate_input_event(e) {
                                    let _ = msg_tx.send(m);
                                }
                            }
                        }
                        Some(AsyncEvent::Msg(msg)) => {
                            match dispatch_message(&mut self, msg, &msg_tx, &mut renderer, signal_bridge.as_ref())? {
                                LoopSignal::Continue => {}
                                LoopSignal::Quit => {
                                    render_final_frame(&self, &mut renderer, &mut last_view)?;
                                    break;
                                }
                                LoopSignal::Kill => break,
                            }
                        }
                        Some(AsyncEvent::InputClosed) => {
                            let quit_msg = Message::new(QuitMsg);
                            let accepted = match self.filter.as_mut() {
                                Some(f) => f(&self.model, &quit_msg),
                                None => true,
                            };
                            if !accepted {
                                return Err(Error::FilterReturnedNil);
                            }
                            render_final_frame(&self, &mut renderer, &mut last_view)?;
                            break;
                        }
                        None => {}
                    }
                }
                _ = frame_interval.tick() => {
                    if renderer.ready_for_tick() {
                        let view = self.model.view();
                        if view != last_view {
                            last_view = view.clone();
                            renderer.write(view);
                        }
                        renderer.flush().map_err(|e| Error::TerminalUnavailable { cause: e })?;
                    }
                }
            }
        }

        cancel.cancel();
        drop(signal_bridge);
        let _ = renderer.stop();
        let _ = crossterm::terminal::disable_raw_mode();

        Ok(self.model)
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut input: R, sender: Sender<AsyncEvent>) {
    std::thread::spawn(move || loop {
        let mut buf = [0u8; 1024];
        match input.read(&mut buf) {
            Ok(0) => {
                let _ = sender.send(AsyncEvent::InputClosed);
                return;
            }
            Ok(n) => {
                if sender.send(AsyncEvent::Bytes(buf[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(_) => {
                let _ = sender.send(AsyncEvent::InputClosed);
                return;
            }
        }
    });
}

/// Adapt a `Sender<AsyncEvent>` so it can be handed to code (dispatch_cmd,
/// `SignalBridge`) that only knows about `Sender<Message>`.
fn to_message_sender(inner: Sender<AsyncEvent>) -> Sender<Message> {
    let (tx, rx) = channel::<Message>();
    std::thread::spawn(move || {
        while let Ok(msg) = rx.recv() {
            if inner.send(AsyncEvent::Msg(msg)).is_err() {
                return;
            }
        }
    });
    tx
}
