// SPDX-License-Identifier: GPL-3.0-only

//! Messages emitted by the keyboard widgets.

use crate::layout::KeyId;

/// Messages emitted by the keyboard renderer.
///
/// Only the press is reported per key. Pointer motion and release are read
/// from the window's global mouse events, since the pointer may leave the
/// pressed key (to hover a picker cell) before it is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMessage {
    /// The pointer went down on a key.
    KeyDown(KeyId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Section;

    #[test]
    fn test_key_down_carries_id() {
        let id = KeyId::new(Section::Alphabetic, 1, 4);
        let RendererMessage::KeyDown(carried) = RendererMessage::KeyDown(id);
        assert_eq!(carried, id);
    }
}
