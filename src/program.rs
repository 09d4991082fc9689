//! Program runtime: owns the terminal, drives the message loop, schedules
//! commands, and wires OS signals into the message stream.

use std::io::{self, Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::command::Cmd;
use crate::message::{
    BatchMsg, BlurMsg, ExecMsg, FatalSignalMsg, FocusMsg, InterruptMsg, KillMsg, Message,
    PasteEndMsg, PasteMsg, PasteStartMsg, PrintlnMsg, QuitMsg, RequestWindowSizeMsg, ResumeMsg,
    SequenceMsg, SetWindowTitleMsg, SuspendMsg, WindowSizeMsg,
};
use crate::parser::{InputEvent, Parser};
use crate::renderer::{MouseMode as RenderMouseMode, Renderer};
use crate::screen::{
    ClearScreenMsg, DisableBracketedPasteMsg, DisableMouseMsg, DisableReportFocusMsg,
    EnableBracketedPasteMsg, EnableMouseAllMotionMsg, EnableMouseCellMotionMsg,
    EnableReportFocusMsg, EnterAltScreenMsg, ExitAltScreenMsg, HideCursorMsg,
    ReleaseTerminalMsg, RestoreTerminalMsg, ShowCursorMsg,
};
use crate::signal::SignalBridge;

/// Guards against a recursive or concurrent second `run()`/`start()` call in
/// the same process — the runtime assumes exclusive ownership of the
/// controlling terminal for the duration of one program's event loop.
static PROGRAM_RUNNING: AtomicBool = AtomicBool::new(false);

pub(crate) struct RunningGuard(());

impl Drop for RunningGuard {
    fn drop(&mut self) {
        PROGRAM_RUNNING.store(false, Ordering::SeqCst);
    }
}

/// Claim the process-wide "a program is running" slot for the duration of
/// one `run()`/`run_async()` call. Dropping the guard releases it.
pub(crate) fn acquire_running_guard() -> Result<RunningGuard> {
    if PROGRAM_RUNNING.swap(true, Ordering::SeqCst) {
        return Err(Error::AlreadyRunning);
    }
    Ok(RunningGuard(()))
}

/// Errors returned by [`Program::run`].
#[derive(Debug, Error)]
pub enum Error {
    /// The controlling terminal could not be acquired or put into raw mode,
    /// its dimensions could not be probed, or a write to it failed.
    #[error("terminal unavailable: {cause}")]
    TerminalUnavailable {
        /// Underlying I/O failure.
        #[source]
        cause: io::Error,
    },
    /// `SIGINT` arrived while catch-panics/interrupt handling was disabled.
    #[error("interrupted by user")]
    InterruptedByUser,
    /// The process received a fatal signal the runtime could not translate
    /// to a graceful quit.
    #[error("killed by signal {0}")]
    Killed(i32),
    /// A user callback (`update`/`view`/`init`) panicked while catch-panics
    /// mode was enabled.
    #[error("panic in model callback: {0}")]
    Panic(String),
    /// The installed `filter` rejected a message required for teardown.
    #[error("filter returned nil for a required teardown message")]
    FilterReturnedNil,
    /// `run()` was called on a `Program` that is already running.
    #[error("program is already running")]
    AlreadyRunning,
}

/// Result type used throughout the crate's public surface.
pub type Result<T> = std::result::Result<T, Error>;

/// A user-defined application: state, lifecycle hooks, and a render.
///
/// Models are value-semantic from the program's point of view — the
/// runtime holds exactly one instance and drives it via `&mut self` in
/// place of returning a replacement value, since the runtime already owns
/// the only reference.
pub trait Model: Send + 'static {
    /// Called once before the first render. Return a command to kick off
    /// any startup effect (loading data, starting a timer, ...).
    fn init(&self) -> Option<Cmd> {
        None
    }

    /// Called for every message delivered to the program, including
    /// framework messages the model chooses to react to (e.g. `KeyMsg`,
    /// `WindowSizeMsg`). Return a command to schedule a follow-up effect.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the current state as the terminal frame.
    fn view(&self) -> String;
}

/// Terminal mouse-reporting mode requested via [`Program::with_mouse_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    /// No mouse reporting.
    Disabled,
    /// Report button press/release and drag.
    CellMotion,
    /// Report all motion, with or without a button held.
    AllMotion,
}

/// Handle to a program running on a background thread.
pub struct ProgramHandle<M: Model> {
    sender: Sender<Message>,
    running: Arc<AtomicBool>,
    join: Option<JoinHandle<Result<M>>>,
}

impl<M: Model> ProgramHandle<M> {
    /// Enqueue a message from any thread. Silently dropped if the program
    /// has already terminated.
    pub fn send(&self, msg: Message) {
        let _ = self.sender.send(msg);
    }

    /// Request graceful termination.
    pub fn quit(&self) {
        self.send(Message::new(QuitMsg));
    }

    /// Request abrupt termination: the final `view()` render is skipped, but
    /// the terminal is still restored.
    pub fn kill(&self) {
        self.send(Message::new(KillMsg));
    }

    /// Whether the program loop is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Block until the program terminates and return its final model.
    pub fn wait(mut self) -> Result<M> {
        self.join
            .take()
            .expect("wait() called twice")
            .join()
            .unwrap_or_else(|e| Err(Error::Panic(panic_message(&e))))
    }
}

/// The program runtime: owns the terminal, the model, and the message loop.
pub struct Program<M: Model> {
    pub(crate) model: M,
    pub(crate) alt_screen: bool,
    pub(crate) mouse_mode: MouseMode,
    pub(crate) bracketed_paste: bool,
    pub(crate) report_focus: bool,
    pub(crate) fps: u32,
    pub(crate) without_signals: bool,
    pub(crate) without_catch_panics: bool,
    pub(crate) filter: Option<Box<dyn FnMut(&M, &Message) -> bool + Send>>,
    pub(crate) output: Box<dyn Write + Send>,
}

impl<M: Model> Program<M> {
    /// Create a program with default options: no alt-screen, no mouse
    /// reporting, bracketed paste on, focus reporting off, 60fps, signals
    /// and panic-catching enabled, writing to stdout.
    pub fn new(model: M) -> Self {
        Self {
            model,
            alt_screen: false,
            mouse_mode: MouseMode::Disabled,
            bracketed_paste: true,
            report_focus: false,
            fps: 60,
            without_signals: false,
            without_catch_panics: false,
            filter: None,
            output: Box::new(io::stdout()),
        }
    }

    /// Enter the alternate screen for the duration of the program.
    pub fn with_alt_screen(mut self) -> Self {
        self.alt_screen = true;
        self
    }

    /// Enable mouse reporting in the given mode.
    pub fn with_mouse_mode(mut self, mode: MouseMode) -> Self {
        self.mouse_mode = mode;
        self
    }

    /// Disable bracketed paste (enabled by default).
    pub fn without_bracketed_paste(mut self) -> Self {
        self.bracketed_paste = false;
        self
    }

    /// Enable terminal focus-in/focus-out reporting.
    pub fn with_report_focus(mut self) -> Self {
        self.report_focus = true;
        self
    }

    /// Set the target render frame rate, clamped to `[1, 120]`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(1, 120);
        self
    }

    /// Skip installing OS signal handlers.
    pub fn without_signals(mut self) -> Self {
        self.without_signals = true;
        self
    }

    /// Let panics in model callbacks propagate instead of converting them
    /// to a terminating [`Error::Panic`].
    pub fn without_catch_panics(mut self) -> Self {
        self.without_catch_panics = true;
        self
    }

    /// Install a pre-dispatch message filter. Returning `false` drops the
    /// message before it reaches `update`; the filter sees a `QuitMsg` like
    /// any other message and may drop it, delaying shutdown.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: FnMut(&M, &Message) -> bool + Send + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Write frames to `writer` instead of stdout.
    pub fn with_output<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.output = Box::new(writer);
        self
    }

    /// Run the program on the current thread until it terminates, reading
    /// input from stdin.
    pub fn run(self) -> Result<M> {
        let stdin = io::stdin();
        let (msg_tx, msg_rx) = channel();
        event_loop(self, stdin, msg_tx, msg_rx)
    }

    /// Run the program on the current thread, reading input from `input`
    /// instead of stdin.
    pub fn run_with_input<R: Read + Send + 'static>(self, input: R) -> Result<M> {
        let (msg_tx, msg_rx) = channel();
        event_loop(self, input, msg_tx, msg_rx)
    }

    /// Run the program on a background thread and return a handle.
    pub fn start(self) -> ProgramHandle<M> {
        let (msg_tx, msg_rx) = channel();
        let handle_sender = msg_tx.clone();
        let running = Arc::new(AtomicBool::new(true));
        let running_for_thread = running.clone();
        let stdin = io::stdin();
        let join = std::thread::spawn(move || {
            let result = event_loop(self, stdin, msg_tx, msg_rx);
            running_for_thread.store(false, Ordering::SeqCst);
            result
        });
        ProgramHandle {
            sender: handle_sender,
            running,
            join: Some(join),
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Internal events multiplexed onto one channel: decoded framework/user
/// messages, and raw byte chunks from the input-reader thread.
enum LoopEvent {
    Msg(Message),
    Bytes(Vec<u8>),
    InputClosed,
}

fn spawn_reader<R: Read + Send + 'static>(mut input: R, sender: Sender<LoopEvent>) {
    std::thread::spawn(move || loop {
        let mut buf = [0u8; 1024];
        match input.read(&mut buf) {
            Ok(0) => {
                let _ = sender.send(LoopEvent::InputClosed);
                return;
            }
            Ok(n) => {
                if sender.send(LoopEvent::Bytes(buf[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(_) => {
                let _ = sender.send(LoopEvent::InputClosed);
                return;
            }
        }
    });
}

fn bridge_messages(msg_rx: Receiver<Message>, sender: Sender<LoopEvent>) {
    std::thread::spawn(move || {
        while let Ok(msg) = msg_rx.recv() {
            if sender.send(LoopEvent::Msg(msg)).is_err() {
                return;
            }
        }
    });
}

fn event_loop<M: Model, R: Read + Send + 'static>(
    mut program: Program<M>,
    input: R,
    msg_tx: Sender<Message>,
    msg_rx: Receiver<Message>,
) -> Result<M> {
    let _running_guard = acquire_running_guard()?;

    debug!("program starting");

    crossterm::terminal::enable_raw_mode()
        .map_err(|e| Error::TerminalUnavailable { cause: e })?;
    let (width, height) =
        crossterm::terminal::size().map_err(|e| Error::TerminalUnavailable { cause: e })?;

    let mut renderer = Renderer::new(
        std::mem::replace(&mut program.output, Box::new(io::sink())),
        program.fps,
    );
    let redraw_handle = renderer.redraw_handle();

    if program.alt_screen {
        renderer
            .enter_alt_screen()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;
    }
    match program.mouse_mode {
        MouseMode::Disabled => {}
        MouseMode::CellMotion => renderer
            .enable_mouse(RenderMouseMode::CellMotion)
            .map_err(|e| Error::TerminalUnavailable { cause: e })?,
        MouseMode::AllMotion => renderer
            .enable_mouse(RenderMouseMode::AllMotion)
            .map_err(|e| Error::TerminalUnavailable { cause: e })?,
    }
    if program.bracketed_paste {
        renderer
            .enable_bracketed_paste()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;
    }
    if program.report_focus {
        renderer
            .enable_focus_reporting()
            .map_err(|e| Error::TerminalUnavailable { cause: e })?;
    }

    let (loop_tx, loop_rx) = channel::<LoopEvent>();
    bridge_messages(msg_rx, loop_tx.clone());
    spawn_reader(input, loop_tx);

    msg_tx.send(Message::new(WindowSizeMsg { width, height })).ok();

    let signal_bridge = if program.without_signals {
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

    let init_cmd = program.model.init();
    schedule(init_cmd, &msg_tx);

    let mut last_view = program.model.view();
    renderer.write(last_view.clone());
    renderer
        .flush()
        .map_err(|e| Error::TerminalUnavailable { cause: e })?;

    let result = run_dispatch_loop(
        &mut program,
        &loop_rx,
        &msg_tx,
        &mut parser,
        &mut renderer,
        &mut last_view,
        signal_bridge.as_ref(),
    );

    drop(signal_bridge);
    let _ = renderer.stop();
    let _ = crossterm::terminal::disable_raw_mode();

    debug!("program stopped");
    result.map(|()| program.model)
}

fn schedule(cmd: Option<Cmd>, msg_tx: &Sender<Message>) {
    let Some(cmd) = cmd else { return };
    let tx = msg_tx.clone();
    std::thread::spawn(move || dispatch_cmd(cmd, &tx));
}

/// Execute one command, recursively unpacking `batch`/`sequence` wrapper
/// messages rather than delivering them to `update` directly.
///
/// A `batch`'s children run on their own threads but are joined before this
/// call returns, so a `batch` nested inside a `sequence` is fully resolved
/// before the sequence advances to its next item (every child thread spawned
/// below has already sent its message by the time `dispatch_cmd` returns).
pub(crate) fn dispatch_cmd(cmd: Cmd, msg_tx: &Sender<Message>) {
    let Some(msg) = cmd.execute() else { return };

    if msg.is::<BatchMsg>() {
        if let Some(BatchMsg(cmds)) = msg.downcast::<BatchMsg>() {
            let handles: Vec<_> = cmds
                .into_iter()
                .map(|c| {
                    let tx = msg_tx.clone();
                    std::thread::spawn(move || dispatch_cmd(c, &tx))
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        }
        return;
    }
    if msg.is::<SequenceMsg>() {
        if let Some(SequenceMsg(cmds)) = msg.downcast::<SequenceMsg>() {
            let tx = msg_tx.clone();
            std::thread::spawn(move || {
                for c in cmds {
                    dispatch_cmd(c, &tx);
                }
            });
        }
        return;
    }
    let _ = msg_tx.send(msg);
}

fn run_dispatch_loop<M: Model, W: Write>(
    program: &mut Program<M>,
    loop_rx: &Receiver<LoopEvent>,
    msg_tx: &Sender<Message>,
    parser: &mut Parser,
    renderer: &mut Renderer<W>,
    last_view: &mut String,
    signal_bridge: Option<&SignalBridge>,
) -> Result<()> {
    let tick_period = Duration::from_secs_f64(1.0 / f64::from(program.fps.max(1)));

    loop {
        match loop_rx.recv_timeout(tick_period) {
            Ok(LoopEvent::Bytes(bytes)) => {
                let mut events = Vec::new();
                parser.feed(&bytes, &mut events);
                for ev in events {
                    if let Some(msg) = translate_input_event(ev) {
                        let _ = msg_tx.send(msg);
                    }
                }
            }
            Ok(LoopEvent::Msg(msg)) => {
                match dispatch_message(program, msg, msg_tx, renderer, signal_bridge)? {
                    LoopSignal::Continue => {}
                    LoopSignal::Quit => {
                        render_final_frame(program, renderer, last_view)?;
                        return Ok(());
                    }
                    LoopSignal::Kill => return Ok(()),
                }
            }
            Ok(LoopEvent::InputClosed) => {
                trace!("input reader closed");
                let quit_msg = Message::new(QuitMsg);
                let accepted = match program.filter.as_mut() {
                    Some(f) => f(&program.model, &quit_msg),
                    None => true,
                };
                if !accepted {
                    return Err(Error::FilterReturnedNil);
                }
                render_final_frame(program, renderer, last_view)?;
                return Ok(());
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                let mut dropped = Vec::new();
                parser.flush_pending(&mut dropped);
                for ev in dropped {
                    if let Some(msg) = translate_input_event(ev) {
                        let _ = msg_tx.send(msg);
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if renderer.ready_for_tick() {
            let view = program.model.view();
            if &view != last_view {
                *last_view = view.clone();
                renderer.write(view);
            }
            renderer
                .flush()
                .map_err(|e| Error::TerminalUnavailable { cause: e })?;
        }
    }

    Ok(())
}

pub(crate) fn render_final_frame<M: Model, W: Write>(
    program: &Program<M>,
    renderer: &mut Renderer<W>,
    last_view: &mut String,
) -> Result<()> {
    let view = program.model.view();
    *last_view = view.clone();
    renderer.write(view);
    renderer
        .flush()
        .map_err(|e| Error::TerminalUnavailable { cause: e })
}

pub(crate) fn translate_input_event(ev: InputEvent) -> Option<Message> {
    match ev {
        InputEvent::Key(k) => Some(Message::new(k)),
        InputEvent::Mouse(m) => Some(Message::new(m)),
        InputEvent::FocusIn => Some(Message::new(FocusMsg)),
        InputEvent::FocusOut => Some(Message::new(BlurMsg)),
        InputEvent::PasteStart => Some(Message::new(PasteStartMsg)),
        InputEvent::PasteChunk(s) => Some(Message::new(PasteMsg(s))),
        InputEvent::PasteEnd => Some(Message::new(PasteEndMsg)),
    }
}

/// What the dispatch loop should do after handling one message.
pub(crate) enum LoopSignal {
    /// Keep running.
    Continue,
    /// Stop after rendering one final frame.
    Quit,
    /// Stop immediately, skipping the final render.
    Kill,
}

pub(crate) fn dispatch_message<M: Model, W: Write>(
    program: &mut Program<M>,
    msg: Message,
    msg_tx: &Sender<Message>,
    renderer: &mut Renderer<W>,
    signal_bridge: Option<&SignalBridge>,
) -> Result<LoopSignal> {
    if let Some(filter) = program.filter.as_mut() {
        if !filter(&program.model, &msg) {
            return Ok(LoopSignal::Continue);
        }
    }

    if msg.is::<QuitMsg>() {
        return Ok(LoopSignal::Quit);
    }
    if msg.is::<KillMsg>() {
        return Ok(LoopSignal::Kill);
    }
    if msg.is::<FatalSignalMsg>() {
        if let Some(FatalSignalMsg(signal)) = msg.downcast::<FatalSignalMsg>() {
            return Err(Error::Killed(signal));
        }
    }
    if msg.is::<InterruptMsg>() {
        if program.without_catch_panics {
            return Err(Error::InterruptedByUser);
        }
        let _ = msg_tx.send(Message::new(QuitMsg));
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<SuspendMsg>() || msg.is::<ResumeMsg>() {
        run_update(program, msg, msg_tx)?;
        return Ok(LoopSignal::Continue);
    }

    // Renderer-owned framework messages: forwarded, not passed to `update`.
    if msg.is::<ClearScreenMsg>() {
        renderer.clear_screen();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<EnterAltScreenMsg>() {
        let _ = renderer.enter_alt_screen();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<ExitAltScreenMsg>() {
        let _ = renderer.exit_alt_screen();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<ShowCursorMsg>() {
        let _ = renderer.show_cursor();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<HideCursorMsg>() {
        let _ = renderer.hide_cursor();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<EnableMouseCellMotionMsg>() {
        let _ = renderer.enable_mouse(RenderMouseMode::CellMotion);
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<EnableMouseAllMotionMsg>() {
        let _ = renderer.enable_mouse(RenderMouseMode::AllMotion);
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<DisableMouseMsg>() {
        let _ = renderer.disable_mouse();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<EnableBracketedPasteMsg>() {
        let _ = renderer.enable_bracketed_paste();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<DisableBracketedPasteMsg>() {
        let _ = renderer.disable_bracketed_paste();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<EnableReportFocusMsg>() {
        let _ = renderer.enable_focus_reporting();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<DisableReportFocusMsg>() {
        let _ = renderer.disable_focus_reporting();
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<PrintlnMsg>() {
        if let Some(PrintlnMsg(text)) = msg.downcast::<PrintlnMsg>() {
            renderer.insert_above(text);
        }
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<SetWindowTitleMsg>() {
        if let Some(SetWindowTitleMsg(title)) = msg.downcast::<SetWindowTitleMsg>() {
            let _ = renderer.set_window_title(&title);
        }
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<RequestWindowSizeMsg>() {
        if let Ok((width, height)) = crossterm::terminal::size() {
            let _ = msg_tx.send(Message::new(WindowSizeMsg { width, height }));
        }
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<ReleaseTerminalMsg>() {
        release_terminal(renderer, signal_bridge);
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<RestoreTerminalMsg>() {
        restore_terminal(program, renderer, signal_bridge);
        return Ok(LoopSignal::Continue);
    }
    if msg.is::<ExecMsg>() {
        if let Some(ExecMsg { command, on_done }) = msg.downcast::<ExecMsg>() {
            let tx = msg_tx.clone();
            let done_msg = crate::exec::run(
                command,
                || {
                    let _ = crossterm::terminal::disable_raw_mode();
                },
                || {
                    let _ = crossterm::terminal::enable_raw_mode();
                },
            );
            renderer.request_full_redraw();
            let _ = tx.send(on_done_result(done_msg, on_done));
        }
        return Ok(LoopSignal::Continue);
    }

    run_update(program, msg, msg_tx)?;
    Ok(LoopSignal::Continue)
}

/// Hand the terminal to a child process: raw mode off, program modes torn
/// down, signal forwarding suspended. Mirrors what `exec::run`'s `release`
/// closure does for its own child, but reusable directly from `update`.
fn release_terminal<W: Write>(renderer: &mut Renderer<W>, signal_bridge: Option<&SignalBridge>) {
    let _ = renderer.disable_mouse();
    let _ = renderer.disable_bracketed_paste();
    let _ = renderer.disable_focus_reporting();
    let _ = renderer.exit_alt_screen();
    let _ = renderer.show_cursor();
    let _ = crossterm::terminal::disable_raw_mode();
    if let Some(bridge) = signal_bridge {
        bridge.disable();
    }
}

/// Reacquire the terminal after [`release_terminal`]: raw mode back on, the
/// program's configured modes reapplied, signal forwarding resumed, and a
/// full redraw forced since the screen contents are now unknown.
fn restore_terminal<M: Model, W: Write>(
    program: &Program<M>,
    renderer: &mut Renderer<W>,
    signal_bridge: Option<&SignalBridge>,
) {
    let _ = crossterm::terminal::enable_raw_mode();
    if program.alt_screen {
        let _ = renderer.enter_alt_screen();
    }
    match program.mouse_mode {
        MouseMode::Disabled => {}
        MouseMode::CellMotion => {
            let _ = renderer.enable_mouse(RenderMouseMode::CellMotion);
        }
        MouseMode::AllMotion => {
            let _ = renderer.enable_mouse(RenderMouseMode::AllMotion);
        }
    }
    if program.bracketed_paste {
        let _ = renderer.enable_bracketed_paste();
    }
    if program.report_focus {
        let _ = renderer.enable_focus_reporting();
    }
    if let Some(bridge) = signal_bridge {
        bridge.enable();
    }
    renderer.request_full_redraw();
}

fn on_done_result(
    exec_finished: Message,
    on_done: Box<dyn FnOnce(io::Result<std::process::ExitStatus>) -> Message + Send>,
) -> Message {
    let finished = exec_finished
        .downcast::<crate::message::ExecFinishedMsg>()
        .expect("exec::run always returns ExecFinishedMsg");
    match finished.error {
        Some(e) => on_done(Err(e)),
        None => on_done(Ok(finished
            .status
            .expect("status set when error is absent"))),
    }
}

fn run_update<M: Model>(
    program: &mut Program<M>,
    msg: Message,
    msg_tx: &Sender<Message>,
) -> Result<()> {
    let without_catch = program.without_catch_panics;
    let model = &mut program.model;

    let cmd = if without_catch {
        model.update(msg)
    } else {
        match panic::catch_unwind(AssertUnwindSafe(|| model.update(msg))) {
            Ok(cmd) => cmd,
            Err(payload) => {
                error!("model update panicked");
                return Err(Error::Panic(panic_message(&payload)));
            }
        }
    };
    schedule(cmd, msg_tx);
    Ok(())
}
