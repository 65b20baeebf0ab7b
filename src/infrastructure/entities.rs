//! Database entities

use sqlx::FromRow;

/// One row of the `alerts` collection. Only the JSON body is selected; the storage id
/// stays inside the database.
#[derive(Debug, Clone, FromRow)]
pub struct AlertDocument {
    pub document: String,
}
