//! Shared helpers for integration tests: an in-memory DVI document builder.

use dvistream_parse::{CommandEvent, DviHandler};

/// Builds synthetic DVI byte streams record by record.
///
/// Offsets are reported as the records are appended so tests can wire up
/// the backward page chain and the postamble pointer themselves.
#[derive(Default)]
pub struct DviBuilder {
    bytes: Vec<u8>,
}

impl DviBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the next byte to be written.
    pub fn offset(&self) -> u32 {
        self.bytes.len() as u32
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn nops(&mut self, n: usize) -> &mut Self {
        self.bytes.extend(std::iter::repeat_n(138u8, n));
        self
    }

    /// `pre i[1] num[4] den[4] mag[4] k[1] x[k]`
    pub fn preamble(&mut self, id: u8, comment: &[u8]) -> &mut Self {
        self.bytes.push(247);
        self.bytes.push(id);
        self.bytes.extend(25400000u32.to_be_bytes()); // num
        self.bytes.extend(473628672u32.to_be_bytes()); // den
        self.bytes.extend(1000u32.to_be_bytes()); // mag
        self.bytes.push(comment.len() as u8);
        self.bytes.extend_from_slice(comment);
        self
    }

    /// `bop c0..c9[4 each] p[4]` — returns the offset of the bop opcode.
    pub fn bop(&mut self, prev: i32) -> u32 {
        let offset = self.offset();
        self.bytes.push(139);
        for count in 0..10u32 {
            self.bytes.extend(count.to_be_bytes());
        }
        self.bytes.extend(prev.to_be_bytes());
        offset
    }

    pub fn eop(&mut self) -> &mut Self {
        self.bytes.push(140);
        self
    }

    pub fn set_char(&mut self, code: u8) -> &mut Self {
        assert!(code <= 127);
        self.bytes.push(code);
        self
    }

    /// `post p[4] num[4] den[4] mag[4] l[4] u[4] s[2] t[2]` — returns the
    /// offset of the post opcode.
    pub fn post(&mut self, last_bop: i32) -> u32 {
        let offset = self.offset();
        self.bytes.push(248);
        self.bytes.extend(last_bop.to_be_bytes());
        self.bytes.extend(25400000u32.to_be_bytes());
        self.bytes.extend(473628672u32.to_be_bytes());
        self.bytes.extend(1000u32.to_be_bytes());
        self.bytes.extend(0x0400_0000u32.to_be_bytes()); // tallest page height
        self.bytes.extend(0x0300_0000u32.to_be_bytes()); // widest page width
        self.bytes.extend(2u16.to_be_bytes()); // max stack depth
        self.bytes.extend(((self.count_bops()) as u16).to_be_bytes());
        offset
    }

    /// `fnt_def1 k[1] c[4] s[4] d[4] a[1] l[1] n[a+l]`
    pub fn font_def1(&mut self, number: u8, area: &[u8], name: &[u8]) -> &mut Self {
        self.bytes.push(243);
        self.bytes.push(number);
        self.bytes.extend(0u32.to_be_bytes()); // checksum
        self.bytes.extend(655360u32.to_be_bytes()); // scale
        self.bytes.extend(655360u32.to_be_bytes()); // design size
        self.bytes.push(area.len() as u8);
        self.bytes.push(name.len() as u8);
        self.bytes.extend_from_slice(area);
        self.bytes.extend_from_slice(name);
        self
    }

    /// `post_post q[4] i[1]` followed by `fill_count` fill bytes.
    pub fn post_post(&mut self, post_offset: u32, id: u8, fill_count: usize) -> &mut Self {
        self.bytes.push(249);
        self.bytes.extend(post_offset.to_be_bytes());
        self.bytes.push(id);
        self.bytes.extend(std::iter::repeat_n(223u8, fill_count));
        self
    }

    /// Overwrites the previous-page pointer field of the bop at `bop_offset`.
    pub fn patch_bop_prev(&mut self, bop_offset: u32, prev: i32) -> &mut Self {
        let field = bop_offset as usize + 41;
        self.bytes[field..field + 4].copy_from_slice(&prev.to_be_bytes());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn count_bops(&self) -> usize {
        // Good enough for the synthetic documents built here.
        self.bytes.iter().filter(|&&b| b == 139).count()
    }
}

/// Captures every command event for assertions.
#[derive(Default)]
pub struct CollectingHandler {
    pub events: Vec<CommandEvent>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<dvistream_parse::CommandKind> {
        self.events.iter().map(|e| e.kind).collect()
    }
}

impl DviHandler for CollectingHandler {
    fn on_command(&mut self, event: CommandEvent) {
        self.events.push(event);
    }
}
