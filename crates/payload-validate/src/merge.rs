//! Deduplication of per-field results.

use crate::report::FieldResult;
use indexmap::IndexMap;

/// Merge raw results into one result per field.
///
/// Fields keep the position of their first appearance. For a repeated field
/// the first result is kept unless it passed and a later one failed, so a
/// failure always wins over a pass regardless of arrival order.
pub fn merge_results<I>(results: I) -> Vec<FieldResult>
where
    I: IntoIterator<Item = FieldResult>,
{
    let mut merged: IndexMap<String, FieldResult> = IndexMap::new();

    for result in results {
        match merged.get_mut(&result.field) {
            Some(existing) => {
                if existing.valid && !result.valid {
                    *existing = result;
                }
            }
            None => {
                merged.insert(result.field.clone(), result);
            }
        }
    }

    merged.into_values().collect()
}
