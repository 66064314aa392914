//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use stencil::FilterKind;

/// Format the filter catalog as an ASCII table.
pub fn format_filter_table(filters: &[FilterKind]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Filter", "Usage", "Description"]);

    for filter in filters {
        table.add_row(vec![filter.name(), filter.signature(), filter.summary()]);
    }

    table
}
