use std::path::Path;

use dvistream_parse::{CommandEvent, CommandKind, DviHandler, NoopHandler};

use crate::cli::OutputFormat;
use crate::shared::{open_dvi, version_str};

/// Counts font-definition commands seen in the postamble.
#[derive(Default)]
struct FontCounter {
    fonts: usize,
}

impl DviHandler for FontCounter {
    fn on_command(&mut self, event: CommandEvent) {
        if matches!(
            event.kind,
            CommandKind::FontDef | CommandKind::NativeFontDef
        ) {
            self.fonts += 1;
        }
    }
}

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut dvi = open_dvi(file)?;

    dvi.execute_preamble(&mut NoopHandler).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    let version = dvi.version().map(|v| version_str(&v));

    // The preamble comment sits after pre i[1] num[4] den[4] mag[4].
    let comment = read_comment(&mut dvi).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let offsets = dvi.collect_bop_offsets().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    // The final entry is the postamble's own offset.
    let pages = offsets.len() - 1;

    let mut counter = FontCounter::default();
    dvi.execute_font_defs(&mut counter).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let bytes = dvi.reader().len();

    match format {
        OutputFormat::Text => {
            println!("File: {}", file.display());
            if let Some(v) = version {
                println!("Version: {v}");
            }
            if !comment.is_empty() {
                println!("Comment: {comment}");
            }
            println!("Pages: {pages}");
            println!("Fonts: {}", counter.fonts);
            println!("Bytes: {bytes}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "version": version,
                "comment": comment,
                "pages": pages,
                "fonts": counter.fonts,
                "bytes": bytes,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
    }

    Ok(())
}

fn read_comment(
    dvi: &mut dvistream_parse::DviInterpreter<std::fs::File>,
) -> Result<String, dvistream_parse::ReaderError> {
    let reader = dvi.reader_mut();
    reader.seek(14)?;
    let len = reader.read_unsigned(1)?;
    reader.read_string(len as usize)
}
