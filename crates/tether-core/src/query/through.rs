use crate::assoc::BelongsTo;

/// Table and key columns of one has-one-through traversal
///
/// `through` is the owner's belongs-to leg, `source` is the belongs-to leg
/// declared on the through target.
#[derive(Debug, Clone, Copy)]
pub struct ThroughJoin<'a> {
    pub through_table: &'a str,
    pub through: &'a BelongsTo,
    pub source_table: &'a str,
    pub source: &'a BelongsTo,
}

impl ThroughJoin<'_> {
    /// Render the single-hop join
    ///
    /// The one placeholder binds the owner's `through.foreign_key` value.
    pub fn sql(&self) -> String {
        format!(
            "SELECT {st}.* FROM {tt} JOIN {st} ON {tt}.{sfk} = {st}.{spk} WHERE {tt}.{tpk} = ?",
            st = self.source_table,
            tt = self.through_table,
            sfk = self.source.foreign_key,
            spk = self.source.primary_key,
            tpk = self.through.primary_key,
        )
    }
}
