//! dvistream-parse: structural DVI command-stream interpreter.
//!
//! This crate losslessly walks a seekable DVI byte stream (standard DVI,
//! pTeX's vertical-writing dialect, or XeTeX's XDV sub-versions 5–7),
//! classifies every opcode into its command shape, advances the cursor by
//! exactly the bytes each command occupies, and reports each decoded
//! command to a [`DviHandler`] without assigning graphical meaning to any
//! value. It depends on dvistream-core for the shared version lattice,
//! opcode constants, and error taxonomy.

pub mod decoder;
pub mod error;
pub mod handler;
pub mod interpreter;
pub mod reader;

pub use decoder::{Command, CommandKind, decode};
pub use dvistream_core;
pub use error::ReaderError;
pub use handler::{CommandEvent, DviHandler, NoopHandler};
pub use interpreter::DviInterpreter;
pub use reader::{HashSink, StreamReader};
