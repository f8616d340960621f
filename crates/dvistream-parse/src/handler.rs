//! Consumer callback trait for decoded DVI commands.
//!
//! Defines the [`DviHandler`] trait that bridges the structural interpreter
//! and whatever semantic layer the host attaches (font engine, CMap
//! resolver, renderer). The interpreter calls the handler as it classifies
//! commands; it never interprets operand values itself.

use crate::decoder::CommandKind;

/// One decoded command, reported before its parameter bytes are consumed.
///
/// `offset` is the position of the opcode byte, so a host holding the same
/// byte source can re-read the operand region itself if it needs the
/// values — the interpreter only measures and skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEvent {
    /// The opcode byte as read from the stream.
    pub opcode: u8,
    /// Resolved command shape.
    pub kind: CommandKind,
    /// Inline value for the direct character/font bands, fixed parameter
    /// byte count otherwise.
    pub param: u32,
    /// Position of the opcode byte in the source.
    pub offset: u64,
}

/// Callback handler for DVI command interpretation.
///
/// The interpreter calls [`on_command`](DviHandler::on_command) once per
/// decoded command, before the command's parameter bytes are skipped.
/// The default implementation is a no-op, so handlers subscribe only to
/// what they care about.
pub trait DviHandler {
    /// Called for every decoded command.
    fn on_command(&mut self, _event: CommandEvent) {}
}

/// A handler that ignores every event.
///
/// Useful for driver operations where only the side effects on the cursor
/// and version state matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl DviHandler for NoopHandler {}

#[cfg(test)]
mod tests {
    use super::*;

    struct CollectingHandler {
        events: Vec<CommandEvent>,
    }

    impl DviHandler for CollectingHandler {
        fn on_command(&mut self, event: CommandEvent) {
            self.events.push(event);
        }
    }

    fn sample_event() -> CommandEvent {
        CommandEvent {
            opcode: 65,
            kind: CommandKind::SetCharDirect,
            param: 65,
            offset: 15,
        }
    }

    #[test]
    fn collecting_handler_receives_events() {
        let mut handler = CollectingHandler { events: Vec::new() };
        handler.on_command(sample_event());
        handler.on_command(CommandEvent {
            opcode: 171,
            kind: CommandKind::SelectFontDirect,
            param: 0,
            offset: 16,
        });
        assert_eq!(handler.events.len(), 2);
        assert_eq!(handler.events[0].param, 65);
        assert_eq!(handler.events[1].kind, CommandKind::SelectFontDirect);
    }

    #[test]
    fn noop_handler_accepts_events() {
        let mut handler = NoopHandler;
        handler.on_command(sample_event());
    }

    #[test]
    fn handler_is_object_safe() {
        let mut handler = CollectingHandler { events: Vec::new() };
        let handler_ref: &mut dyn DviHandler = &mut handler;
        handler_ref.on_command(sample_event());
        assert_eq!(handler.events.len(), 1);
    }
}
