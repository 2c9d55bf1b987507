use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
