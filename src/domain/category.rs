//! Question category.

use crate::domain::CategoryId;
use std::collections::BTreeMap;

/// A labeled grouping of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    /// Display label, stored in the `type` column.
    pub kind: String,
}

/// Build the `{id: type}` mapping the API exposes for category listings.
///
/// Keys serialize as JSON object keys (strings) and come out in ascending id
/// order.
pub fn category_map(categories: Vec<Category>) -> BTreeMap<CategoryId, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
