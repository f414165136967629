use serde::{Deserialize, Serialize};

/// Метаданные жизненного цикла записи (lifecycle tracking)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Мягкое удаление: запись считается удалённой, если момент проставлен
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl EntityMetadata {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Пометить запись удалённой (hard delete не используется для договоров)
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(chrono::Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
