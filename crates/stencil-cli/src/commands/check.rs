//! Implementation of the `stencil check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use serde::Serialize;
use stencil::parser::{parse_placeholder, scan, ScanError, Span};

use crate::output::StencilDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for per-file check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    ok: bool,
    placeholders: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Validate one template: scan it and parse every placeholder.
///
/// Returns the placeholder count, or the first error with the byte range
/// it occupies in the source.
fn check_template(content: &str) -> Result<usize, (usize, usize, String)> {
    let spans = scan(content).map_err(|e| {
        let ScanError::Unclosed { offset } = &e;
        (*offset, 2, e.to_string())
    })?;

    let mut count = 0;
    for span in &spans {
        if let Span::Placeholder { raw, offset } = span {
            parse_placeholder(raw).map_err(|e| (*offset, raw.len() + 4, e.to_string()))?;
            count += 1;
        }
    }
    Ok(count)
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results: Vec<CheckJson> = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .map_err(|e| miette::miette!("Cannot read template file {}: {}", path.display(), e))?;

        match check_template(&content) {
            Ok(placeholders) => {
                results.push(CheckJson {
                    file: path.display().to_string(),
                    ok: true,
                    placeholders,
                    error: None,
                });
            }
            Err((offset, len, message)) => {
                if args.json {
                    results.push(CheckJson {
                        file: path.display().to_string(),
                        ok: false,
                        placeholders: 0,
                        error: Some(message),
                    });
                } else {
                    let diagnostic = StencilDiagnostic::new(
                        &path.display().to_string(),
                        &content,
                        offset,
                        len,
                        message,
                    );
                    return Err(diagnostic.into());
                }
            }
        }
    }

    let any_failed = results.iter().any(|r| !r.ok);

    if args.json {
        let json_output = serde_json::to_string_pretty(&results)
            .expect("JSON serialization should not fail");
        println!("{}", json_output);
    } else {
        for result in &results {
            println!(
                "{}: ok ({} placeholder{})",
                result.file,
                result.placeholders,
                if result.placeholders == 1 { "" } else { "s" }
            );
        }
    }

    if any_failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
