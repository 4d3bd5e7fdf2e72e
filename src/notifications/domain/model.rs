use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct NotificationEntity {
    pub notification_id: String,
    pub version: i64,
    pub member_id: String,
    pub message: String,
    pub is_read: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl NotificationEntity {
    pub fn new(member_id: &str, message: &str) -> Self {
        Self {
            notification_id: Uuid::new_v4().to_string(),
            version: 0,
            member_id: member_id.to_string(),
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for NotificationEntity {
    fn id(&self) -> String {
        self.notification_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
