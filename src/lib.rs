#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::module_inception)]

//! # Matcha
//!
//! A framework for building terminal applications around The Elm
//! Architecture: a [`Model`] holds application state, `update` reacts to
//! [`Message`]s, and `view` renders the current frame as a string.
//!
//! Matcha owns the terminal directly rather than delegating rendering and
//! input decoding to an external crossterm event loop: input bytes are
//! decoded by a hand-rolled ANSI parser ([`parser`]), and frames are drawn
//! by a diffing [`renderer`] that only rewrites the lines that changed
//! since the previous frame, at a bounded frame rate.
//!
//! ```rust,ignore
//! use matcha::{Cmd, Message, Model, Program};
//!
//! struct Counter(i32);
//!
//! impl Model for Counter {
//!     fn update(&mut self, msg: Message) -> Option<Cmd> {
//!         if let Some(n) = msg.downcast::<i32>() {
//!             self.0 += n;
//!         }
//!         None
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("count: {}", self.0)
//!     }
//! }
//!
//! fn main() -> matcha::Result<()> {
//!     Program::new(Counter(0)).run()?;
//!     Ok(())
//! }
//! ```
//!
//! Enable the `async` feature to drive the same [`Model`] from a tokio
//! runtime via [`Program::run_async`].

mod command;
mod exec;
mod key;
mod message;
mod mouse;
pub mod parser;
mod program;
pub mod renderer;
mod screen;
mod signal;
pub mod simulator;

#[cfg(feature = "async")]
mod async_program;

pub use command::{
    batch, every, exec, kill, printf, println, pure, quit, sequence, set_window_title, tick,
    window_size, Cmd,
};
pub use key::{KeyModifiers, KeyMsg, KeyType};
pub use message::{
    BlurMsg, ExecFinishedMsg, FocusMsg, InterruptMsg, Message, PasteEndMsg, PasteMsg,
    PasteStartMsg, QuitMsg, ResumeMsg, SuspendMsg, WindowSizeMsg,
};
pub use mouse::{MouseAction, MouseButton, MouseMsg};
pub use program::{Error, Model, MouseMode, Program, ProgramHandle, Result};
pub use screen::{
    clear_screen, disable_bracketed_paste, disable_mouse, disable_report_focus,
    enable_bracketed_paste, enable_mouse_all_motion, enable_mouse_cell_motion,
    enable_report_focus, enter_alt_screen, exit_alt_screen, hide_cursor, release_terminal,
    restore_terminal, show_cursor,
};
