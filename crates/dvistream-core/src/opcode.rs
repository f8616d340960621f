//! DVI opcode band constants.
//!
//! The opcode space 0–255 is partitioned into fixed bands: two "compressed"
//! single-byte bands where the operand is encoded in the opcode value itself
//! (character codes 0–127, font numbers 171–234), the standard multi-byte
//! command families, and the optional extension values above 249 whose
//! legality depends on the discovered DVI dialect.

/// First direct character code (`set_char_0`).
pub const SET_CHAR_0: u8 = 0;
/// Last direct character code (`set_char_127`).
pub const SET_CHAR_127: u8 = 127;
/// `set1` — typeset a character from a 1-byte code.
pub const SET1: u8 = 128;
/// `set_rule` — typeset a rule (8 parameter bytes).
pub const SET_RULE: u8 = 132;
/// `put1` — like `set1` without cursor advance.
pub const PUT1: u8 = 133;
/// `put_rule` — like `set_rule` without cursor advance.
pub const PUT_RULE: u8 = 137;
/// `nop` — no operation.
pub const NOP: u8 = 138;
/// `bop` — begin of page (10 count registers + previous-bop pointer).
pub const BOP: u8 = 139;
/// `eop` — end of page.
pub const EOP: u8 = 140;
/// `push` — save the positioning state.
pub const PUSH: u8 = 141;
/// `pop` — restore the positioning state.
pub const POP: u8 = 142;
/// `right1` — first of the horizontal movement family.
pub const RIGHT1: u8 = 143;
/// `w0` — move right by the current `w` amount.
pub const W0: u8 = 147;
/// `x0` — move right by the current `x` amount.
pub const X0: u8 = 152;
/// `down1` — first of the vertical movement family.
pub const DOWN1: u8 = 157;
/// `y0` — move down by the current `y` amount.
pub const Y0: u8 = 161;
/// `z0` — move down by the current `z` amount.
pub const Z0: u8 = 166;
/// `z4` — last opcode of the contiguous low command band.
pub const Z4: u8 = 170;
/// First direct font number (`fnt_num_0`).
pub const FNT_NUM_0: u8 = 171;
/// Last direct font number (`fnt_num_63`).
pub const FNT_NUM_63: u8 = 234;
/// `fnt1` — select a font from a 1-byte number.
pub const FNT1: u8 = 235;
/// `xxx1` — special with a 1-byte payload length.
pub const XXX1: u8 = 239;
/// `xxx4` — special with a 4-byte payload length.
pub const XXX4: u8 = 242;
/// `fnt_def1` — font definition with a 1-byte font number.
pub const FNT_DEF1: u8 = 243;
/// `pre` — preamble.
pub const PRE: u8 = 247;
/// `post` — begin of postamble.
pub const POST: u8 = 248;
/// `post_post` — end of postamble; highest opcode defined by standard DVI.
pub const POST_POST: u8 = 249;
/// XDV extension: include an image or PDF file (XDV5 only).
pub const XDV_PIC: u8 = 251;
/// XDV extension: native font definition.
pub const XDV_FONT_DEF: u8 = 252;
/// XDV extension: glyph array with per-glyph x/y coordinates.
pub const XDV_GLYPH_ARRAY: u8 = 253;
/// XDV extension: glyph string sharing one y coordinate (XDV5) or
/// "actual text" plus glyph array (XDV7) — resolved by version.
pub const XDV_GLYPH_STRING: u8 = 254;
/// pTeX extension: text direction toggle.
pub const DIR: u8 = 255;
/// Fill byte padding the end of a DVI file (at least 4 required).
pub const FILL: u8 = 223;
