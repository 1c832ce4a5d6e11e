use serde::{Deserialize, Deserializer, Serialize};

use super::repo::Item;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update. Absent fields are left alone; `description: null` clears the
/// description. `title` is not nullable, so `null` there counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateItemRequest {
    /// Description change as borrowed strings: `None` keeps, `Some(None)` clears.
    pub fn description_change(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(|d| d.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            title: i.title,
            description: i.description,
            owner_id: i.owner_id,
        }
    }
}
