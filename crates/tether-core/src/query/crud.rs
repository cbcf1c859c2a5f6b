//! Single-table statements used by the session's persistence helpers

use crate::assoc::DEFAULT_PRIMARY_KEY;

pub fn select_all(table: &str) -> String {
    format!("SELECT {t}.* FROM {t}", t = table)
}

pub fn select_first(table: &str) -> String {
    format!("SELECT {t}.* FROM {t} LIMIT 1", t = table)
}

pub fn select_last(table: &str) -> String {
    format!(
        "SELECT {t}.* FROM {t} ORDER BY {pk} DESC LIMIT 1",
        t = table,
        pk = DEFAULT_PRIMARY_KEY
    )
}

pub fn select_by_id(table: &str) -> String {
    format!(
        "SELECT {t}.* FROM {t} WHERE {pk} = ?",
        t = table,
        pk = DEFAULT_PRIMARY_KEY
    )
}

/// `INSERT` binding one placeholder per column, or `DEFAULT VALUES`
pub fn insert(table: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table);
    }
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

/// `UPDATE ... WHERE id = ?`; the id binds after the column values
pub fn update(table: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        table, assignments, DEFAULT_PRIMARY_KEY
    )
}
