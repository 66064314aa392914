//! Implementation of the `stencil expand` command.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use stencil::{Expander, SystemEnv, VariableLayer};

use crate::output::StencilDiagnostic;

/// Arguments for the expand command.
#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Template file to expand
    pub file: Option<PathBuf>,

    /// Template string to expand (alternative to a file)
    #[arg(long, conflicts_with = "file")]
    pub template: Option<String>,

    /// Destination file; also selects the output encoding
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with variable definitions
    #[arg(long)]
    pub vars_file: Option<PathBuf>,

    /// Variables in name=value format (repeatable)
    #[arg(long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Working directory for absolute-path filters
    #[arg(long)]
    pub working_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for expand results.
#[derive(Serialize)]
pub struct ExpandResult {
    pub result: String,
    pub encoding: String,
}

/// Parse a name=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the expand command.
pub fn run_expand(args: ExpandArgs) -> miette::Result<i32> {
    let (template, source_name) = match (&args.file, &args.template) {
        (Some(path), None) => {
            let content = fs::read_to_string(path).map_err(|e| {
                miette::miette!("Cannot read template file {}: {}", path.display(), e)
            })?;
            (content, path.display().to_string())
        }
        (None, Some(template)) => (template.clone(), "<template>".to_string()),
        _ => {
            return Err(miette::miette!(
                "expected either a template file or --template"
            ));
        }
    };

    let file_layer = match &args.vars_file {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                miette::miette!("Cannot read variables file {}: {}", path.display(), e)
            })?;
            let layer: VariableLayer = serde_json::from_str(&content).map_err(|e| {
                miette::miette!("Invalid variables file {}: {}", path.display(), e)
            })?;
            VariableLayer::with_entries("file", layer.entries().clone())
        }
        None => VariableLayer::new("file"),
    };

    let inline_layer = VariableLayer::with_entries("inline", args.vars.iter().cloned().collect());

    let env = SystemEnv;
    let expander = Expander::builder()
        .template(&template)
        .file_layer(file_layer)
        .inline_layer(inline_layer)
        .env(&env)
        .maybe_working_dir(args.working_dir.clone())
        .maybe_destination(args.output.clone())
        .build();

    match expander.expand() {
        Ok(expansion) => {
            if let Some(path) = &args.output {
                fs::write(path, expansion.to_bytes()).map_err(|e| {
                    miette::miette!("Cannot write output file {}: {}", path.display(), e)
                })?;
            } else if args.json {
                let output = ExpandResult {
                    result: expansion.text.clone(),
                    encoding: expansion.encoding.name().to_string(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", expansion.text);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
                Ok(exitcode::DATAERR)
            } else {
                let diagnostic = StencilDiagnostic::from_expand_error(&source_name, &template, &e);
                Err(diagnostic.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_key_val;

    #[test]
    fn parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("Name=ada").unwrap(),
            ("Name".to_string(), "ada".to_string())
        );
        assert_eq!(
            parse_key_val("Args=-a=1").unwrap(),
            ("Args".to_string(), "-a=1".to_string())
        );
    }

    #[test]
    fn parse_key_val_allows_empty_value() {
        assert_eq!(
            parse_key_val("Name=").unwrap(),
            ("Name".to_string(), String::new())
        );
    }

    #[test]
    fn parse_key_val_rejects_missing_equals() {
        assert!(parse_key_val("Name").is_err());
    }
}
