use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row in the `categorias` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    /// Four upper-case letters, unique across the collection.
    pub codigo: String,
    pub nome: String,
    pub descricao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new category. The code is normalized
/// and uniqueness-checked before the row is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub codigo: String,
    pub nome: String,
    pub descricao: Option<String>,
}
