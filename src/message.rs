//! Message types for the Elm Architecture.
//!
//! Messages are the only way to update the model in matcha. All user input,
//! timer events, and custom events are represented as messages.

use std::any::Any;
use std::fmt;

use crate::command::Cmd;

/// A type-erased message container.
///
/// Messages can be any type that is `Send + 'static`. Use [`Message::new`] to create
/// a message and [`Message::downcast`] to retrieve the original type.
///
/// # Example
///
/// ```rust
/// use matcha::Message;
///
/// struct MyMsg(i32);
///
/// let msg = Message::new(MyMsg(42));
/// if let Some(my_msg) = msg.downcast::<MyMsg>() {
///     assert_eq!(my_msg.0, 42);
/// }
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Create a new message from any sendable type.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Try to downcast to a specific message type.
    ///
    /// Returns `Some(T)` if the message is of type `T`, otherwise `None`.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Try to get a reference to the message as a specific type.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Check if the message is of a specific type.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

// Built-in message types

/// Message to quit the program gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Message to terminate the program abruptly, skipping the final render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KillMsg;

/// A signal the runtime cannot translate into a graceful `QuitMsg`; carries
/// the signal number for `Error::Killed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FatalSignalMsg(pub i32);

/// Message for Ctrl+C interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMsg;

/// Message to suspend the program (Ctrl+Z / SIGTSTP).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspendMsg;

/// Message delivered after the program resumes from suspension (SIGCONT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeMsg;

/// Message containing terminal window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
}

/// Message when terminal gains focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMsg;

/// Message when terminal loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurMsg;

/// Message delivered when bracketed paste begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteStartMsg;

/// Message carrying the text of a bracketed paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteMsg(pub String);

/// Message delivered when bracketed paste ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteEndMsg;

/// Internal message to set window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetWindowTitleMsg(pub String);

/// Internal message to request window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestWindowSizeMsg;

/// Internal message for batch command execution.
pub(crate) struct BatchMsg(pub Vec<Cmd>);

/// Internal message for sequential command execution.
pub(crate) struct SequenceMsg(pub Vec<Cmd>);

/// A line to flush above the UI via the renderer's scroll-region insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrintlnMsg(pub String);

/// Request to release the terminal, run a child process, and reacquire it.
pub(crate) struct ExecMsg {
    pub command: std::process::Command,
    pub on_done: Box<dyn FnOnce(std::io::Result<std::process::ExitStatus>) -> Message + Send>,
}

/// Delivered after an `exec` command's child process exits.
#[derive(Debug)]
pub struct ExecFinishedMsg {
    /// Exit status of the child process, if it could be observed.
    pub status: Option<std::process::ExitStatus>,
    /// I/O error encountered while spawning or waiting on the child, if any.
    pub error: Option<std::io::Error>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_downcast() {
        struct TestMsg(i32);

        let msg = Message::new(TestMsg(42));
        assert!(msg.is::<TestMsg>());
        let inner = msg.downcast::<TestMsg>().unwrap();
        assert_eq!(inner.0, 42);
    }

    #[test]
    fn test_message_downcast_wrong_type() {
        struct TestMsg1;
        struct TestMsg2;

        let msg = Message::new(TestMsg1);
        assert!(!msg.is::<TestMsg2>());
        assert!(msg.downcast::<TestMsg2>().is_none());
    }

    #[test]
    fn test_quit_msg() {
        let msg = Message::new(QuitMsg);
        assert!(msg.is::<QuitMsg>());
    }

    #[test]
    fn test_window_size_msg() {
        let msg = WindowSizeMsg {
            width: 80,
            height: 24,
        };
        assert_eq!(msg.width, 80);
        assert_eq!(msg.height, 24);
    }

    #[test]
    fn test_paste_msg_roundtrip() {
        let msg = Message::new(PasteMsg("hello".to_string()));
        let inner = msg.downcast::<PasteMsg>().unwrap();
        assert_eq!(inner.0, "hello");
    }
}
