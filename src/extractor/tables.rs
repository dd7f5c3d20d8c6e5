//! Table extraction.

use kuchiki::NodeRef;

use super::schema::Table;
use crate::utils::string_utils::collapse_whitespace;

/// Extract every table with at least one non-empty row.
///
/// The title comes from `<caption>` when present, otherwise the positional
/// fallback "Tableau N" (N counts all tables in document order, including
/// ones later dropped as empty, so numbering stays stable for readers
/// comparing against the page).
pub(crate) fn extract_tables(document: &NodeRef) -> Vec<Table> {
    let Ok(table_nodes) = document.select("table") else {
        return Vec::new();
    };

    let mut tables = Vec::new();
    for (position, table) in table_nodes.enumerate() {
        let node = table.as_node();

        let title = node
            .select_first("caption")
            .ok()
            .map(|caption| collapse_whitespace(&caption.text_contents()))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("Tableau {}", position + 1));

        let mut rows: Vec<Vec<String>> = Vec::new();
        if let Ok(row_nodes) = node.select("tr") {
            for row in row_nodes {
                let Ok(cell_nodes) = row.as_node().select("th, td") else {
                    continue;
                };
                let cells: Vec<String> = cell_nodes
                    .map(|cell| collapse_whitespace(&cell.text_contents()))
                    .collect();
                // A row whose every cell is empty carries no data
                if cells.iter().any(|cell| !cell.is_empty()) {
                    rows.push(cells);
                }
            }
        }

        if !rows.is_empty() {
            tables.push(Table { title, rows });
        }
    }

    tables
}
