use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

// clients send either the bare id or the whole category object they rendered,
// and ids taken from JSON object keys arrive as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRef {
    Bare(#[serde(deserialize_with = "deserialize_number_from_string")] i64),
    Object {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        id: i64,
    },
}

/// Category filter for a quiz: `None` when the client asked for every category (id 0).
pub fn deserialize_category_filter<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match CategoryRef::deserialize(deserializer)? {
        CategoryRef::Bare(id) | CategoryRef::Object { id } => id,
    };
    Ok((id != 0).then_some(id))
}
