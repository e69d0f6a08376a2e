// SPDX-License-Identifier: GPL-3.0-only

//! Host capability interface.
//!
//! The keyboard core reaches its host only through [`TextSink`]. Every call
//! is fire-and-forget: the core never reads anything back.

/// The five operations a host exposes to the keyboard.
pub trait TextSink {
    /// Inserts text at the cursor.
    fn insert_text(&mut self, text: &str);

    /// Deletes one character before the cursor.
    fn delete_backward(&mut self);

    /// Inserts a line break.
    fn insert_return(&mut self);

    /// Moves the cursor by `offset` characters (negative moves left).
    fn move_cursor(&mut self, offset: i32);

    /// Asks the host to switch to its next input method.
    fn switch_to_next_input_mode(&mut self);
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    InsertText(String),
    DeleteBackward,
    InsertReturn,
    MoveCursor(i32),
    SwitchToNextInputMode,
}

impl HostCommand {
    /// Replays the command on a sink.
    pub fn apply_to<S: TextSink + ?Sized>(&self, sink: &mut S) {
        match self {
            HostCommand::InsertText(text) => sink.insert_text(text),
            HostCommand::DeleteBackward => sink.delete_backward(),
            HostCommand::InsertReturn => sink.insert_return(),
            HostCommand::MoveCursor(offset) => sink.move_cursor(*offset),
            HostCommand::SwitchToNextInputMode => sink.switch_to_next_input_mode(),
        }
    }
}

/// Recording host: every call becomes a [`HostCommand`].
impl TextSink for Vec<HostCommand> {
    fn insert_text(&mut self, text: &str) {
        self.push(HostCommand::InsertText(text.to_string()));
    }

    fn delete_backward(&mut self) {
        self.push(HostCommand::DeleteBackward);
    }

    fn insert_return(&mut self) {
        self.push(HostCommand::InsertReturn);
    }

    fn move_cursor(&mut self, offset: i32) {
        self.push(HostCommand::MoveCursor(offset));
    }

    fn switch_to_next_input_mode(&mut self) {
        self.push(HostCommand::SwitchToNextInputMode);
    }
}
