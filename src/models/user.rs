use serde::{Deserialize, Serialize};

/// A host record. Only `id` is interpreted here; the rest of the user
/// shape belongs to the auth layer and is carried through untouched.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
