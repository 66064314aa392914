//! Implementation of the `stencil filters` command.

use serde::Serialize;
use stencil::FilterKind;

use crate::output::table::format_filter_table;

/// Arguments for the filters command.
#[derive(Debug, clap::Args)]
pub struct FiltersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one filter catalog entry.
#[derive(Debug, Serialize)]
struct FilterJson {
    name: &'static str,
    usage: &'static str,
    description: &'static str,
}

/// Run the filters command.
pub fn run_filters(args: FiltersArgs) -> miette::Result<i32> {
    if args.json {
        let entries: Vec<FilterJson> = FilterKind::ALL
            .iter()
            .map(|f| FilterJson {
                name: f.name(),
                usage: f.signature(),
                description: f.summary(),
            })
            .collect();
        let json_output =
            serde_json::to_string_pretty(&entries).expect("JSON serialization should not fail");
        println!("{}", json_output);
    } else {
        let table = format_filter_table(FilterKind::ALL);
        println!("{}", table);
    }

    Ok(exitcode::OK)
}
