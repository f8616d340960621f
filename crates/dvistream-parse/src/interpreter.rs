//! Structural DVI command interpreter and document driver.
//!
//! [`DviInterpreter`] walks a seekable byte source one command at a time:
//! the decoder classifies each opcode, an executor consumes exactly the
//! bytes the command occupies, and every decoded command is reported to a
//! [`DviHandler`] before its parameter bytes are skipped. The driver
//! methods sequence the document-level protocol — preamble, pages,
//! postamble, font definitions, and the backward page-offset chain.
//!
//! No graphical meaning is assigned to any value: the interpreter
//! classifies, measures, and advances, nothing more.

use std::io::{Read, Seek};

use dvistream_core::{DviError, DviVersion, VersionState, opcode};

use crate::decoder::{Command, CommandKind, decode};
use crate::error::ReaderError;
use crate::handler::{CommandEvent, DviHandler};
use crate::reader::StreamReader;

/// The "no previous page" sentinel in the page-offset chain (-1 as u32).
const NO_BOP: u32 = u32::MAX;

/// A structural interpreter over one seekable DVI byte source.
///
/// Stateful only in the cursor position and the discovered version; not
/// reentrant for a single instance. Parsing many files concurrently means
/// one interpreter per source.
#[derive(Debug)]
pub struct DviInterpreter<R> {
    reader: StreamReader<R>,
    version: VersionState,
}

impl<R: Read + Seek> DviInterpreter<R> {
    /// Wraps `source` with a fresh cursor and no version discovered.
    pub fn new(source: R) -> Result<Self, ReaderError> {
        Ok(Self {
            reader: StreamReader::new(source)?,
            version: VersionState::new(),
        })
    }

    /// The DVI dialect discovered so far.
    pub fn version(&self) -> Option<DviVersion> {
        self.version.current()
    }

    /// Shared access to the byte cursor.
    pub fn reader(&self) -> &StreamReader<R> {
        &self.reader
    }

    /// Exclusive access to the byte cursor, for hosts that re-read operand
    /// regions between commands. Moving the cursor mid-command is on the
    /// caller.
    pub fn reader_mut(&mut self) -> &mut StreamReader<R> {
        &mut self.reader
    }

    /// Decodes and executes the single command at the cursor, reporting it
    /// to `handler` before its parameter bytes are consumed.
    ///
    /// Returns the opcode of the executed command so drivers can watch for
    /// control opcodes (`eop`, `post`, `post_post`).
    pub fn execute_command(&mut self, handler: &mut dyn DviHandler) -> Result<u8, ReaderError> {
        let offset = self.reader.tell()?;
        let op = self.reader.read_u8()?;
        let cmd = decode(op, self.version.current(), offset)?;
        handler.on_command(CommandEvent {
            opcode: cmd.opcode,
            kind: cmd.kind,
            param: cmd.param,
            offset,
        });
        self.dispatch(cmd)?;
        Ok(op)
    }

    /// Seeks to offset 0 and executes the preamble.
    ///
    /// # Errors
    ///
    /// [`DviError::Malformed`] when the first opcode is not `pre`.
    pub fn execute_preamble(&mut self, handler: &mut dyn DviHandler) -> Result<(), ReaderError> {
        self.reader.seek(0)?;
        if self.reader.peek()? == Some(opcode::PRE) {
            self.reader.skip(1)?;
            handler.on_command(CommandEvent {
                opcode: opcode::PRE,
                kind: CommandKind::Pre,
                param: 0,
                offset: 0,
            });
            return self.cmd_pre();
        }
        Err(self.malformed("invalid DVI file (missing preamble)", 0))
    }

    /// Executes every command from offset 0 until `post` is reached.
    ///
    /// If no version has been discovered yet, the post_post record is read
    /// first purely to learn it (extension opcodes inside pages would
    /// otherwise be illegal).
    pub fn execute_all_pages(&mut self, handler: &mut dyn DviHandler) -> Result<(), ReaderError> {
        if self.version.current().is_none() {
            self.execute_post_post()?;
        }
        self.reader.seek(0)?;
        while self.execute_command(handler)? != opcode::POST {}
        Ok(())
    }

    /// Moves the cursor to the first byte of the postamble.
    ///
    /// Walks backward over trailing fill bytes (223), requires at least 4
    /// of them, then follows the 4-byte postamble pointer stored just
    /// before the run.
    pub fn go_to_postamble(&mut self) -> Result<(), ReaderError> {
        let id_pos = self.scan_trailing_fill("invalid DVI file (missing postamble)")?;
        // The 4-byte postamble pointer sits immediately before the
        // identification byte.
        self.reader.seek(id_pos - 4)?;
        let q = self.reader.read_unsigned(4)?;
        self.reader.seek(u64::from(q))?;
        Ok(())
    }

    /// Locates the postamble and executes commands until `post_post`.
    pub fn execute_postamble(&mut self, handler: &mut dyn DviHandler) -> Result<(), ReaderError> {
        self.go_to_postamble()?;
        while self.execute_command(handler)? != opcode::POST_POST {}
        Ok(())
    }

    /// Reads the version identification byte from the post_post record.
    ///
    /// Scans the trailing fill bytes independently, so it works without
    /// first locating the postamble body.
    pub fn execute_post_post(&mut self) -> Result<(), ReaderError> {
        let id_pos = self.scan_trailing_fill("invalid DVI file (missing postpost)")?;
        self.reader.seek(id_pos)?;
        let id = self.reader.read_unsigned(1)? as u8;
        self.version.observe(id, id_pos)?;
        Ok(())
    }

    /// Executes the font-definition commands stored in the postamble.
    ///
    /// By format contract the commands between the postamble header and
    /// `post_post` are exclusively font definitions (and `nop`s).
    pub fn execute_font_defs(&mut self, handler: &mut dyn DviHandler) -> Result<(), ReaderError> {
        self.go_to_postamble()?;
        self.reader.skip(1 + 28)?; // now on first fontdef or post_post
        if self.reader.peek()? != Some(opcode::POST_POST) {
            while self.execute_command(handler)? != opcode::POST_POST {}
        }
        Ok(())
    }

    /// Collects the file offsets of all `bop` commands in document order,
    /// with the postamble's own offset as the final entry.
    ///
    /// Walks the backward chain embedded in the file: each `bop` stores the
    /// offset of the previous one as its final field. Each claimed offset
    /// must point at a `bop` opcode and each previous pointer must be the
    /// sentinel or strictly less than the current offset — the strict
    /// decrease rejects cycles, self pointers, and forward pointers.
    pub fn collect_bop_offsets(&mut self) -> Result<Vec<u32>, ReaderError> {
        let mut bop_offsets = Vec::new();
        self.go_to_postamble()?;
        bop_offsets.push(self.reader.tell()? as u32); // also record the postamble offset
        self.reader.skip(1)?; // skip post opcode
        let mut offset = self.reader.read_unsigned(4)?; // offset of final bop
        while offset != NO_BOP {
            bop_offsets.push(offset);
            self.reader.seek(u64::from(offset))?;
            if self.reader.read_u8()? != opcode::BOP {
                return Err(DviError::BadBopPointer {
                    offset: u64::from(offset),
                }
                .into());
            }
            self.reader.skip(40)?; // skip the 10 count registers
            let prev_offset = self.reader.read_unsigned(4)?;
            if prev_offset >= offset && prev_offset != NO_BOP {
                return Err(DviError::InvalidBopOffset {
                    offset: self.reader.tell()? - 4,
                }
                .into());
            }
            offset = prev_offset;
        }
        bop_offsets.reverse();
        Ok(bop_offsets)
    }

    /// Consumes the parameter bytes of one decoded command.
    fn dispatch(&mut self, cmd: Command) -> Result<(), ReaderError> {
        match cmd.kind {
            // Inline-parameter and no-operand commands occupy only their
            // opcode byte.
            CommandKind::SetCharDirect
            | CommandKind::SelectFontDirect
            | CommandKind::Nop
            | CommandKind::Eop
            | CommandKind::Push
            | CommandKind::Pop
            | CommandKind::W0
            | CommandKind::X0
            | CommandKind::Y0
            | CommandKind::Z0 => Ok(()),
            // Fixed-length commands: the decoder supplied the byte count.
            CommandKind::SetChar
            | CommandKind::SetRule
            | CommandKind::PutChar
            | CommandKind::PutRule
            | CommandKind::Bop
            | CommandKind::Right
            | CommandKind::W
            | CommandKind::X
            | CommandKind::Down
            | CommandKind::Y
            | CommandKind::Z
            | CommandKind::SelectFont
            | CommandKind::Dir => self.reader.skip(i64::from(cmd.param)),
            CommandKind::Special => self.cmd_special(cmd.param as usize),
            CommandKind::FontDef => self.cmd_font_def(cmd.param as usize),
            CommandKind::Pre => self.cmd_pre(),
            CommandKind::Post => self.reader.skip(28),
            CommandKind::PostPost => self.cmd_post_post(),
            CommandKind::Pic => self.cmd_pic(),
            CommandKind::NativeFontDef => self.cmd_native_font_def(),
            CommandKind::GlyphArray => self.cmd_glyph_array(),
            CommandKind::GlyphString => self.cmd_glyph_string(),
            CommandKind::TextAndGlyphs => self.cmd_text_and_glyphs(),
        }
    }

    /// `pre`: i[1] num[4] den[4] mag[4] k[1] x[k]
    fn cmd_pre(&mut self) -> Result<(), ReaderError> {
        let id_pos = self.reader.tell()?;
        let id = self.reader.read_unsigned(1)? as u8;
        self.version.observe(id, id_pos)?;
        self.reader.skip(12)?; // numerator, denominator, magnification
        let comment_len = self.reader.read_unsigned(1)?;
        self.reader.skip(i64::from(comment_len))
    }

    /// `post_post`: q[4] i[1] 223's[>= 4]
    fn cmd_post_post(&mut self) -> Result<(), ReaderError> {
        self.reader.skip(4)?;
        let id_pos = self.reader.tell()?;
        let id = self.reader.read_unsigned(1)? as u8;
        self.version.observe(id, id_pos)?;
        while self.reader.peek()? == Some(opcode::FILL) {
            self.reader.skip(1)?;
        }
        Ok(())
    }

    /// `xxx1`–`xxx4`: the payload length is read from the stream itself,
    /// then the payload is skipped opaquely.
    fn cmd_special(&mut self, len_width: usize) -> Result<(), ReaderError> {
        let payload_len = self.reader.read_unsigned(len_width)?;
        self.reader.skip(i64::from(payload_len))
    }

    /// `fnt_defN`: k[N] c[4] s[4] d[4] a[1] l[1] n[a+l]
    fn cmd_font_def(&mut self, num_width: usize) -> Result<(), ReaderError> {
        self.reader.skip((num_width + 12) as i64)?; // font number + checksum/scale/design block
        let area_len = self.reader.read_unsigned(1)?;
        let name_len = self.reader.read_unsigned(1)?;
        self.reader.skip(i64::from(area_len + name_len))
    }

    /// XDV picture inclusion: box[1] matrix[4][6] p[2] len[2] path[len]
    fn cmd_pic(&mut self) -> Result<(), ReaderError> {
        self.reader.skip(1 + 24 + 2)?;
        let path_len = self.reader.read_unsigned(2)?;
        self.reader.skip(i64::from(path_len))
    }

    /// XDV native font definition. The name length gains two extra 1-byte
    /// fields under XDV5, a subfont index appears from XDV6 on, and each
    /// set style flag adds one 4-byte block; XDV5 additionally carries an
    /// optional variation array with its own 2-byte count.
    fn cmd_native_font_def(&mut self) -> Result<(), ReaderError> {
        self.reader.skip(4 + 4)?; // font number + point size
        let flags = self.reader.read_unsigned(2)?;
        let mut name_len = self.reader.read_unsigned(1)?;
        if self.version.current() == Some(DviVersion::Xdv5) {
            name_len += self.reader.read_unsigned(1)? + self.reader.read_unsigned(1)?;
        }
        self.reader.skip(i64::from(name_len))?;
        if self
            .version
            .current()
            .is_some_and(|v| v >= DviVersion::Xdv6)
        {
            self.reader.skip(4)?; // subfont index
        }
        if flags & 0x0200 != 0 {
            self.reader.skip(4)?; // colored
        }
        if flags & 0x1000 != 0 {
            self.reader.skip(4)?; // extend
        }
        if flags & 0x2000 != 0 {
            self.reader.skip(4)?; // slant
        }
        if flags & 0x4000 != 0 {
            self.reader.skip(4)?; // embolden
        }
        if flags & 0x0800 != 0 && self.version.current() == Some(DviVersion::Xdv5) {
            let num_variations = self.reader.read_unsigned(2)?;
            self.reader.skip(4 * i64::from(num_variations))?;
        }
        Ok(())
    }

    /// XDV glyph array: w[4] n[2] xy[(4+4)n] g[2n]
    fn cmd_glyph_array(&mut self) -> Result<(), ReaderError> {
        self.reader.skip(4)?;
        let num_glyphs = self.reader.read_unsigned(2)?;
        self.reader.skip(10 * i64::from(num_glyphs))
    }

    /// XDV glyph string: w[4] n[2] x[4n] y[4] g[2n] — one shared y, so the
    /// per-glyph stride is 6 instead of 10.
    fn cmd_glyph_string(&mut self) -> Result<(), ReaderError> {
        self.reader.skip(4)?;
        let num_glyphs = self.reader.read_unsigned(2)?;
        self.reader.skip(6 * i64::from(num_glyphs))
    }

    /// XDV "actual text" plus glyphs: l[2] t[2l] then a glyph array.
    fn cmd_text_and_glyphs(&mut self) -> Result<(), ReaderError> {
        let num_units = self.reader.read_unsigned(2)?;
        self.reader.skip(2 * i64::from(num_units))?;
        self.cmd_glyph_array()
    }

    /// Scans backward over trailing fill bytes, returning the position of
    /// the last non-fill byte (the post_post identification byte).
    ///
    /// `missing_msg` names the structure the caller was after, reported
    /// when the file is too short to hold one.
    fn scan_trailing_fill(&mut self, missing_msg: &str) -> Result<u64, ReaderError> {
        if self.reader.is_empty() {
            return Err(self.malformed(missing_msg, 0));
        }
        let mut pos = self.reader.len() - 1;
        let mut fill_count = 0u32;
        loop {
            if self.reader.peek_at(pos)? != Some(opcode::FILL) {
                break;
            }
            fill_count += 1;
            if pos == 0 {
                break;
            }
            pos -= 1;
        }
        if fill_count < 4 {
            return Err(self.malformed("missing fill bytes at end of file", pos));
        }
        if pos < 4 {
            // Too short to hold the postamble pointer before the fill run.
            return Err(self.malformed(missing_msg, pos));
        }
        Ok(pos)
    }

    fn malformed(&self, message: &str, offset: u64) -> ReaderError {
        DviError::Malformed {
            message: message.to_string(),
            offset,
        }
        .into()
    }
}
