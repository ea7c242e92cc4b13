/// One HTML table lifted out of a page, labeled with the text of the
/// nearest `<h3>` that precedes it in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    pub label: String,
    /// Rows of plain text cells. `<th>` and `<td>` are not distinguished,
    /// and rows may have differing lengths.
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    pub fn preview(&self, limit: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(limit)]
    }
}
