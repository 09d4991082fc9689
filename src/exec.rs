//! Child-process handoff for the `exec` command.
//!
//! Running an interactive child (an editor, a pager, a shell) needs the
//! controlling terminal back in cooked mode with no alternate screen or
//! mouse reporting in the way. This module performs that release/run/
//! reacquire dance and reports the result as a message.

use std::process::Command;

use crate::command::exec_finished;
use crate::message::Message;

/// Release the terminal via `release`, run `command` to completion, then
/// reacquire it via `reacquire`. Always calls `reacquire`, even if the
/// child failed to spawn, so the terminal is never left in cooked mode.
pub fn run<FRelease, FReacquire>(
    mut command: Command,
    release: FRelease,
    reacquire: FReacquire,
) -> Message
where
    FRelease: FnOnce(),
    FReacquire: FnOnce(),
{
    release();
    let result = command.status();
    reacquire();

    match result {
        Ok(status) => exec_finished(Some(status), None),
        Err(err) => exec_finished(None, Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ExecFinishedMsg;

    #[test]
    fn successful_child_reports_status() {
        let mut released = false;
        let mut reacquired = false;
        let cmd = Command::new("true");
        let msg = run(
            cmd,
            || released = true,
            || reacquired = true,
        );
        assert!(released);
        assert!(reacquired);
        let finished = msg.downcast::<ExecFinishedMsg>().unwrap();
        assert!(finished.error.is_none());
    }

    #[test]
    fn missing_binary_reports_error_but_still_reacquires() {
        let mut reacquired = false;
        let cmd = Command::new("this-binary-does-not-exist-xyz");
        let msg = run(cmd, || {}, || reacquired = true);
        assert!(reacquired);
        let finished = msg.downcast::<ExecFinishedMsg>().unwrap();
        assert!(finished.error.is_some());
    }
}
