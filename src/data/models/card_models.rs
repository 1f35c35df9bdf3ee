use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::cards;

/// Flashcard content shared by every user who studies it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    pub id: String,
    pub word: String,
    pub translation: String,
    pub definition: Option<String>,
    pub meta: Option<String>,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
    pub example_translation: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Request payload for adding a card to the caller's collection
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardRequest {
    pub id: Option<String>, // Generated when absent
    pub word: String,
    pub translation: String,
    pub definition: Option<String>,
    pub meta: Option<String>,
    pub pronunciation: Option<String>,
    pub example: Option<String>,
    pub example_translation: Option<String>,
}

impl CreateCardRequest {
    pub fn into_card(self, created_at: NaiveDateTime) -> Card {
        Card {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            word: self.word.trim().to_string(),
            translation: self.translation.trim().to_string(),
            definition: self.definition,
            meta: self.meta,
            pronunciation: self.pronunciation,
            example: self.example,
            example_translation: self.example_translation,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub cards: Vec<CreateCardRequest>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct BulkCreateResponse {
    pub added: Vec<String>,
    pub failed: Vec<String>,
}
