//! Opcode resolution: byte value + live version → command shape.
//!
//! [`decode`] is a pure function classifying one opcode byte into a
//! [`CommandKind`] plus its raw parameter, consulting version-gated
//! extension tables. It never touches the byte source; consuming the
//! command's parameter bytes is the executor layer's job.

use dvistream_core::{DviError, DviVersion, opcode};

/// The shape of a decoded DVI command.
///
/// Kinds that only differ in the width of their parameter field share a
/// variant (`SetChar` covers `set1`–`set4`, and so on); the width travels
/// in [`Command::param`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Character code 0–127 encoded directly in the opcode.
    SetCharDirect,
    /// `set1`–`set4`.
    SetChar,
    /// `set_rule`.
    SetRule,
    /// `put1`–`put4`.
    PutChar,
    /// `put_rule`.
    PutRule,
    /// `nop`.
    Nop,
    /// `bop` — begin of page.
    Bop,
    /// `eop` — end of page.
    Eop,
    /// `push`.
    Push,
    /// `pop`.
    Pop,
    /// `right1`–`right4`.
    Right,
    /// `w0`.
    W0,
    /// `w1`–`w4`.
    W,
    /// `x0`.
    X0,
    /// `x1`–`x4`.
    X,
    /// `down1`–`down4`.
    Down,
    /// `y0`.
    Y0,
    /// `y1`–`y4`.
    Y,
    /// `z0`.
    Z0,
    /// `z1`–`z4`.
    Z,
    /// Font number 0–63 encoded directly in the opcode.
    SelectFontDirect,
    /// `fnt1`–`fnt4`.
    SelectFont,
    /// `xxx1`–`xxx4` — special with a self-declared payload length.
    Special,
    /// `fnt_def1`–`fnt_def4`.
    FontDef,
    /// `pre` — preamble.
    Pre,
    /// `post` — begin of postamble.
    Post,
    /// `post_post` — end of postamble.
    PostPost,
    /// pTeX direction toggle.
    Dir,
    /// XDV image/PDF inclusion (XDV5 only).
    Pic,
    /// XDV native font definition.
    NativeFontDef,
    /// XDV glyph array with per-glyph x/y coordinates.
    GlyphArray,
    /// XDV glyph string sharing one y coordinate (XDV5 only).
    GlyphString,
    /// XDV "actual text" plus glyph array (XDV7 only).
    TextAndGlyphs,
}

/// One decoded command: opcode value, shape, and raw parameter.
///
/// For the direct bands `param` is the inline value (the character code or
/// font number); for everything else it is the number of fixed parameter
/// bytes the command occupies. Ephemeral — consumed immediately by the
/// executor, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// The opcode byte as read from the stream.
    pub opcode: u8,
    /// Resolved command shape.
    pub kind: CommandKind,
    /// Inline value for the direct bands, fixed parameter byte count
    /// otherwise.
    pub param: u32,
}

/// Fixed command shapes for the two contiguous standard bands
/// (128–170 and 235–249); the font-number band between them is a hole
/// skipped at lookup time.
const STANDARD_COMMANDS: [(CommandKind, u32); 58] = [
    (CommandKind::SetChar, 1),    // 128
    (CommandKind::SetChar, 2),    // 129
    (CommandKind::SetChar, 3),    // 130
    (CommandKind::SetChar, 4),    // 131
    (CommandKind::SetRule, 8),    // 132
    (CommandKind::PutChar, 1),    // 133
    (CommandKind::PutChar, 2),    // 134
    (CommandKind::PutChar, 3),    // 135
    (CommandKind::PutChar, 4),    // 136
    (CommandKind::PutRule, 8),    // 137
    (CommandKind::Nop, 0),        // 138
    (CommandKind::Bop, 44),       // 139
    (CommandKind::Eop, 0),        // 140
    (CommandKind::Push, 0),       // 141
    (CommandKind::Pop, 0),        // 142
    (CommandKind::Right, 1),      // 143
    (CommandKind::Right, 2),      // 144
    (CommandKind::Right, 3),      // 145
    (CommandKind::Right, 4),      // 146
    (CommandKind::W0, 0),         // 147
    (CommandKind::W, 1),          // 148
    (CommandKind::W, 2),          // 149
    (CommandKind::W, 3),          // 150
    (CommandKind::W, 4),          // 151
    (CommandKind::X0, 0),         // 152
    (CommandKind::X, 1),          // 153
    (CommandKind::X, 2),          // 154
    (CommandKind::X, 3),          // 155
    (CommandKind::X, 4),          // 156
    (CommandKind::Down, 1),       // 157
    (CommandKind::Down, 2),       // 158
    (CommandKind::Down, 3),       // 159
    (CommandKind::Down, 4),       // 160
    (CommandKind::Y0, 0),         // 161
    (CommandKind::Y, 1),          // 162
    (CommandKind::Y, 2),          // 163
    (CommandKind::Y, 3),          // 164
    (CommandKind::Y, 4),          // 165
    (CommandKind::Z0, 0),         // 166
    (CommandKind::Z, 1),          // 167
    (CommandKind::Z, 2),          // 168
    (CommandKind::Z, 3),          // 169
    (CommandKind::Z, 4),          // 170
    (CommandKind::SelectFont, 1), // 235
    (CommandKind::SelectFont, 2), // 236
    (CommandKind::SelectFont, 3), // 237
    (CommandKind::SelectFont, 4), // 238
    (CommandKind::Special, 1),    // 239
    (CommandKind::Special, 2),    // 240
    (CommandKind::Special, 3),    // 241
    (CommandKind::Special, 4),    // 242
    (CommandKind::FontDef, 1),    // 243
    (CommandKind::FontDef, 2),    // 244
    (CommandKind::FontDef, 3),    // 245
    (CommandKind::FontDef, 4),    // 246
    (CommandKind::Pre, 0),        // 247
    (CommandKind::Post, 0),       // 248
    (CommandKind::PostPost, 0),   // 249
];

/// Resolves one opcode byte against the live version state.
///
/// Checks run most-specific-first: the direct character and font bands,
/// the version-gated XDV bands, the pTeX direction opcode, then the
/// generic table. `offset` is the position of the opcode byte, used only
/// for error annotation.
///
/// # Errors
///
/// [`DviError::UndefinedOpcode`] when the opcode exceeds the highest
/// defined command and is not legalized by the current version.
pub fn decode(op: u8, version: Option<DviVersion>, offset: u64) -> Result<Command, DviError> {
    if op <= opcode::SET_CHAR_127 {
        return Ok(Command {
            opcode: op,
            kind: CommandKind::SetCharDirect,
            param: u32::from(op),
        });
    }
    if (opcode::FNT_NUM_0..=opcode::FNT_NUM_63).contains(&op) {
        return Ok(Command {
            opcode: op,
            kind: CommandKind::SelectFontDirect,
            param: u32::from(op - opcode::FNT_NUM_0),
        });
    }
    if let Some(kind) = decode_xdv(op, version) {
        return Ok(Command {
            opcode: op,
            kind,
            param: 0,
        });
    }
    if version == Some(DviVersion::Ptex) && op == opcode::DIR {
        return Ok(Command {
            opcode: op,
            kind: CommandKind::Dir,
            param: 1,
        });
    }
    if op > opcode::POST_POST {
        return Err(DviError::UndefinedOpcode { opcode: op, offset });
    }
    // The font-number band is a hole in the numeric space; indices above
    // it skip its 64 values.
    let index = if op < opcode::FNT_NUM_0 {
        usize::from(op - opcode::SET1)
    } else {
        usize::from(op - opcode::SET1) - 64
    };
    let (kind, param) = STANDARD_COMMANDS[index];
    Ok(Command {
        opcode: op,
        kind,
        param,
    })
}

/// Resolves an opcode within the XDV extension bands, if the live version
/// legalizes it. Opcode 254 is `GlyphString` under XDV5 but `TextAndGlyphs`
/// under XDV7, so the version decides, not the opcode alone.
fn decode_xdv(op: u8, version: Option<DviVersion>) -> Option<CommandKind> {
    let v = version?;
    let (min, max) = match v {
        DviVersion::Xdv5 => (251, 254),
        DviVersion::Xdv6 => (252, 253),
        DviVersion::Xdv7 => (252, 254),
        _ => return None,
    };
    if op < min || op > max {
        return None;
    }
    Some(match op {
        opcode::XDV_PIC => CommandKind::Pic,
        opcode::XDV_FONT_DEF => CommandKind::NativeFontDef,
        opcode::XDV_GLYPH_ARRAY => CommandKind::GlyphArray,
        _ if v == DviVersion::Xdv5 => CommandKind::GlyphString,
        _ => CommandKind::TextAndGlyphs,
    })
}
