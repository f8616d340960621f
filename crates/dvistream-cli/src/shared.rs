use std::fs::File;
use std::path::Path;

use dvistream_parse::dvistream_core::DviVersion;
use dvistream_parse::{CommandKind, DviInterpreter};

/// Open a DVI file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not
/// found or cannot be opened.
pub fn open_dvi(file: &Path) -> Result<DviInterpreter<File>, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let source = File::open(file).map_err(|e| {
        eprintln!("Error: failed to open file: {e}");
        1
    })?;
    DviInterpreter::new(source).map_err(|e| {
        eprintln!("Error: failed to read file: {e}");
        1
    })
}

/// The dialect label printed in summaries and JSON output.
pub fn version_str(version: &DviVersion) -> &'static str {
    match version {
        DviVersion::Standard => "dvi",
        DviVersion::Ptex => "ptex",
        DviVersion::Xdv5 => "xdv5",
        DviVersion::Xdv6 => "xdv6",
        DviVersion::Xdv7 => "xdv7",
    }
}

/// TeX's mnemonic for a command shape, used as the listing label.
pub fn kind_str(kind: &CommandKind) -> &'static str {
    match kind {
        CommandKind::SetCharDirect => "set_char",
        CommandKind::SetChar => "set",
        CommandKind::SetRule => "set_rule",
        CommandKind::PutChar => "put",
        CommandKind::PutRule => "put_rule",
        CommandKind::Nop => "nop",
        CommandKind::Bop => "bop",
        CommandKind::Eop => "eop",
        CommandKind::Push => "push",
        CommandKind::Pop => "pop",
        CommandKind::Right => "right",
        CommandKind::W0 => "w0",
        CommandKind::W => "w",
        CommandKind::X0 => "x0",
        CommandKind::X => "x",
        CommandKind::Down => "down",
        CommandKind::Y0 => "y0",
        CommandKind::Y => "y",
        CommandKind::Z0 => "z0",
        CommandKind::Z => "z",
        CommandKind::SelectFontDirect => "fnt_num",
        CommandKind::SelectFont => "fnt",
        CommandKind::Special => "xxx",
        CommandKind::FontDef => "fnt_def",
        CommandKind::Pre => "pre",
        CommandKind::Post => "post",
        CommandKind::PostPost => "post_post",
        CommandKind::Dir => "dir",
        CommandKind::Pic => "pic_file",
        CommandKind::NativeFontDef => "define_native_font",
        CommandKind::GlyphArray => "set_glyphs",
        CommandKind::GlyphString => "set_glyph_string",
        CommandKind::TextAndGlyphs => "set_text_and_glyphs",
    }
}
