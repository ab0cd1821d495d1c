//! # gridpage CLI
//!
//! Usage:
//!   gridpage ticket.json -o out/ticket.pdf
//!   echo '{ ... }' | gridpage -o ticket.pdf
//!   gridpage --example > ticket.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "gridpage")]
#[command(version)]
#[command(about = "Compose grid-based documents into PDF", long_about = None)]
struct Cli {
    /// Input document JSON (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "output.pdf")]
    output: PathBuf,

    /// Print a sample ticket document and exit
    #[arg(long)]
    example: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.example {
        print!("{EXAMPLE_TICKET}");
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = gridpage::render_json(&input)?;
    for warning in &output.warnings {
        log::warn!("{warning}");
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&cli.output, &output.bytes)
        .map_err(|e| format!("failed to write {}: {e}", cli.output.display()))?;
    log::info!(
        "wrote {} pages ({} bytes) to {}",
        output.page_count,
        output.bytes.len(),
        cli.output.display()
    );
    Ok(())
}

/// A one-page cinema ticket: logo header, show details, seat block, QR code,
/// booking barcode and a footer line.
const EXAMPLE_TICKET: &str = r##"{
  "config": {
    "width": 120,
    "height": 200,
    "metadata": { "title": "Ticket #1", "author": "ShowBees Ticketing" }
  },
  "header": [
    { "height": 16, "columns": [
      { "size": 4, "elements": [
        { "type": "image", "source": { "base64": "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==" }, "percent": 100 }
      ]},
      { "size": 2 },
      { "size": 6, "elements": [
        { "type": "text", "content": "ShowBees Ticketing", "style": { "weight": "bold", "size": 10 } },
        { "type": "text", "content": "1234 Main St, City, State 12345", "style": { "size": 10 }, "top": 6 }
      ]}
    ]}
  ],
  "rows": [
    { "height": 6 },
    { "height": 4, "columns": [
      { "size": 12, "elements": [
        { "type": "line", "thickness": 0.2, "color": { "r": 200, "g": 200, "b": 200 } }
      ]}
    ]},
    { "height": 6 },
    { "height": 30, "columns": [
      { "size": 4, "elements": [
        { "type": "image", "source": { "base64": "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==" }, "percent": 100, "center": true }
      ]},
      { "size": 8, "elements": [
        { "type": "text", "content": "Planet of the Gophers: The War Begins", "style": { "weight": "bold", "size": 10 } },
        { "type": "text", "content": "English", "style": { "size": 8, "color": { "r": 95, "g": 95, "b": 95 } }, "top": 6 },
        { "type": "text", "content": "Sat 01/01/2022 7:00 PM", "style": { "weight": "bold", "size": 10 }, "top": 12 },
        { "type": "text", "content": "Gophedorium", "style": { "size": 8, "color": { "r": 95, "g": 95, "b": 95 } }, "top": 18 }
      ]}
    ]},
    { "height": 6 },
    { "height": 1, "columns": [
      { "size": 12, "elements": [
        { "type": "line", "thickness": 0.2, "style": "dashed", "color": { "r": 200, "g": 200, "b": 200 } }
      ]}
    ]},
    { "height": 3 },
    { "height": 16, "columns": [
      { "size": 2, "elements": [
        { "type": "text", "content": "2", "style": { "weight": "bold", "size": 24, "align": "center" } },
        { "type": "text", "content": "Tickets", "style": { "size": 8, "align": "center", "color": { "r": 95, "g": 95, "b": 95 } }, "top": 12 }
      ]},
      { "size": 2 },
      { "size": 8, "elements": [
        { "type": "text", "content": "Screen 1", "style": { "size": 8, "color": { "r": 95, "g": 95, "b": 95 } } },
        { "type": "text", "content": "Platinum - A1, A2", "style": { "weight": "bold", "size": 14 }, "top": 6 }
      ]}
    ]},
    { "height": 3 },
    { "height": 1, "columns": [
      { "size": 12, "elements": [
        { "type": "line", "thickness": 0.2, "style": "dashed", "color": { "r": 200, "g": 200, "b": 200 } }
      ]}
    ]},
    { "height": 6 },
    { "height": 20, "columns": [
      { "size": 12, "elements": [
        { "type": "qrCode", "value": "1\nPlanet of the Gophers: The War Begins\nSat 01/01/2022 7:00 PM\nGophedorium", "center": true }
      ]}
    ]},
    { "height": 10, "columns": [
      { "size": 12, "elements": [
        { "type": "text", "content": "Booking ID: 1", "style": { "size": 8, "align": "center" }, "top": 2 }
      ]}
    ]},
    { "height": 1, "columns": [
      { "size": 12, "elements": [
        { "type": "line", "thickness": 0.2, "color": { "r": 200, "g": 200, "b": 200 } }
      ]}
    ]},
    { "height": 3 },
    { "height": 10, "columns": [
      { "size": 12, "elements": [
        { "type": "barcode", "value": "1", "center": true }
      ]}
    ]},
    { "height": 8 }
  ],
  "footer": [
    { "height": 2, "columns": [
      { "size": 12, "elements": [
        { "type": "text", "content": "Powered by ShowBees Ticketing System", "style": { "slant": "italic", "size": 8, "align": "center", "color": { "r": 255, "g": 120, "b": 218 } } }
      ]}
    ]}
  ]
}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_ticket_renders_on_one_page() {
        let output = gridpage::render_json(EXAMPLE_TICKET).unwrap();
        assert_eq!(output.page_count, 1);
        assert!(output.warnings.is_empty());
        assert!(output.bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn cli_parses_output_flag() {
        let cli = Cli::parse_from(["gridpage", "in.json", "-o", "out/ticket.pdf"]);
        assert_eq!(cli.input, Some(PathBuf::from("in.json")));
        assert_eq!(cli.output, PathBuf::from("out/ticket.pdf"));
        assert!(!cli.example);
    }
}
