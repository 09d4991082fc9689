//! OS signal translation.
//!
//! Runs a background thread (via `signal-hook`'s `Signals` iterator) that
//! converts `SIGWINCH`/`SIGINT`/`SIGTERM`/`SIGTSTP`/`SIGCONT`/`SIGHUP`/
//! `SIGQUIT` into messages on the program's channel. Installed only while
//! `Program::run` is active and torn down on exit — there is no global
//! signal state (aside from the per-bridge enable/disable gate used during
//! a terminal handoff).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use signal_hook::consts::{SIGCONT, SIGHUP, SIGINT, SIGQUIT, SIGTERM, SIGTSTP, SIGWINCH};
use signal_hook::iterator::Signals;

use crate::message::{
    FatalSignalMsg, InterruptMsg, Message, QuitMsg, ResumeMsg, SuspendMsg, WindowSizeMsg,
};

/// Handle to the running signal-translation thread.
pub struct SignalBridge {
    handle: Option<JoinHandle<()>>,
    signals: signal_hook::iterator::Handle,
    enabled: Arc<AtomicBool>,
}

impl SignalBridge {
    /// Spawn the signal-translation thread. `on_suspend` is invoked from the
    /// signal thread immediately before the process raises `SIGSTOP` on
    /// itself (it must release the terminal); `on_resume` runs right after
    /// waking back up (it must reacquire raw mode and force a full redraw).
    pub fn spawn<FSusp, FRes>(
        sender: Sender<Message>,
        on_suspend: FSusp,
        on_resume: FRes,
    ) -> std::io::Result<Self>
    where
        FSusp: Fn() + Send + 'static,
        FRes: Fn() + Send + 'static,
    {
        let mut signals = Signals::new([
            SIGWINCH, SIGINT, SIGTERM, SIGTSTP, SIGCONT, SIGHUP, SIGQUIT,
        ])?;
        let handle = signals.handle();
        let enabled = Arc::new(AtomicBool::new(true));
        let enabled_for_thread = enabled.clone();

        let join = std::thread::spawn(move || {
            for signal in &mut signals {
                // While the terminal is released to a child (see
                // `release_terminal`), suspend/resume still need to run so the
                // tty handoff itself stays correct, but everything else is held
                // off until the terminal is reacquired.
                let gated = !enabled_for_thread.load(Ordering::SeqCst);
                match signal {
                    SIGWINCH if !gated => {
                        if let Some((width, height)) = terminal_size() {
                            let _ = sender.send(Message::new(WindowSizeMsg { width, height }));
                        }
                    }
                    SIGINT if !gated => {
                        let _ = sender.send(Message::new(InterruptMsg));
                    }
                    SIGTERM if !gated => {
                        let _ = sender.send(Message::new(QuitMsg));
                    }
                    SIGHUP | SIGQUIT if !gated => {
                        let _ = sender.send(Message::new(FatalSignalMsg(signal)));
                    }
                    SIGTSTP => {
                        on_suspend();
                        let _ = sender.send(Message::new(SuspendMsg));
                        raise_sigstop();
                    }
                    SIGCONT => {
                        on_resume();
                        let _ = sender.send(Message::new(ResumeMsg));
                    }
                    _ => {}
                }
            }
        });

        Ok(Self {
            handle: Some(join),
            signals: handle,
            enabled,
        })
    }

    /// Suspend forwarding of `SIGWINCH`/`SIGINT`/`SIGTERM`/`SIGHUP`/`SIGQUIT`
    /// while the terminal is handed off to a child process.
    pub(crate) fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Resume forwarding signals after the terminal has been reacquired.
    pub(crate) fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }
}

impl Drop for SignalBridge {
    fn drop(&mut self) {
        self.signals.close();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Re-raise `SIGSTOP` against this process so the shell's job control sees
/// the expected stop, exactly as a normal `SIGTSTP` delivery would.
///
/// Safety: `libc::kill` is called with `getpid()` (this process only) and a
/// fixed, valid signal number; it cannot affect any other process and has
/// no memory-safety implications.
#[allow(unsafe_code)]
fn raise_sigstop() {
    unsafe {
        libc::kill(libc::getpid(), libc::SIGSTOP);
    }
}

fn terminal_size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    #[test]
    fn bridge_spawns_and_tears_down() {
        let (tx, _rx) = channel();
        let bridge = SignalBridge::spawn(tx, || {}, || {});
        assert!(bridge.is_ok());
        drop(bridge);
    }

    #[test]
    #[allow(unsafe_code)]
    fn sigint_translates_to_interrupt() {
        let (tx, rx) = channel();
        let _bridge = SignalBridge::spawn(tx, || {}, || {}).unwrap();
        unsafe {
            libc::raise(SIGINT);
        }
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(msg.is::<InterruptMsg>());
    }

    #[test]
    #[allow(unsafe_code)]
    fn sighup_translates_to_fatal_signal() {
        let (tx, rx) = channel();
        let _bridge = SignalBridge::spawn(tx, || {}, || {}).unwrap();
        unsafe {
            libc::raise(SIGHUP);
        }
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let fatal = msg.downcast::<FatalSignalMsg>().unwrap();
        assert_eq!(fatal.0, SIGHUP);
    }

    #[test]
    #[allow(unsafe_code)]
    fn disabled_bridge_drops_interrupt() {
        let (tx, rx) = channel();
        let bridge = SignalBridge::spawn(tx, || {}, || {}).unwrap();
        bridge.disable();
        unsafe {
            libc::raise(SIGINT);
        }
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        bridge.enable();
        unsafe {
            libc::raise(SIGINT);
        }
        let msg = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(msg.is::<InterruptMsg>());
    }
}
