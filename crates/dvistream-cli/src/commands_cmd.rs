use std::path::Path;

use dvistream_parse::{CommandEvent, DviHandler};

use crate::cli::OutputFormat;
use crate::shared::{kind_str, open_dvi};

/// Records every command in stream order.
#[derive(Default)]
struct Listing {
    events: Vec<CommandEvent>,
}

impl DviHandler for Listing {
    fn on_command(&mut self, event: CommandEvent) {
        self.events.push(event);
    }
}

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let mut dvi = open_dvi(file)?;

    let mut listing = Listing::default();
    dvi.execute_all_pages(&mut listing).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => {
            for event in &listing.events {
                println!(
                    "{:08}  {:3}  {}",
                    event.offset,
                    event.opcode,
                    kind_str(&event.kind)
                );
            }
        }
        OutputFormat::Json => {
            let commands: Vec<serde_json::Value> = listing
                .events
                .iter()
                .map(|event| {
                    serde_json::json!({
                        "offset": event.offset,
                        "opcode": event.opcode,
                        "command": kind_str(&event.kind),
                        "param": event.param,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "commands": commands,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
    }

    Ok(())
}
