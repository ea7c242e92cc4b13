use anyhow::Context;

use crate::domain::table::ExtractedTable;

/// Serialize a table's rows as CSV, one line per row, no index column.
/// The writer runs flexible because extracted rows may be jagged.
pub fn to_csv(table: &ExtractedTable) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in &table.rows {
        writer.write_record(row).context("writing CSV record")?;
    }

    let bytes = writer.into_inner().context("flushing CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Download name for the table at `index` in the scrape result.
pub fn export_file_name(index: usize) -> String {
    format!("table_{}.csv", index)
}
