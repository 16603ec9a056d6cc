use std::hash::{Hash, Hasher};

use sqlx::FromRow;

/// Database model for category
///
/// Two categories are the same category when their names match, whatever
/// their ids. Deduplication must go through `PartialEq`/`Hash`, not `id`.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
