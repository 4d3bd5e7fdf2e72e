use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// single well-known row; every reader shares the same id
pub(crate) const CONFIG_ID: &str = "library";

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LibraryConfigEntity {
    pub config_id: String,
    pub version: i64,
    pub fine_per_day: Decimal,
    pub hold_expiry_days: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LibraryConfigEntity {
    pub fn new(fine_per_day: Decimal, hold_expiry_days: i64) -> Self {
        Self {
            config_id: CONFIG_ID.to_string(),
            version: 0,
            fine_per_day,
            hold_expiry_days,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Default for LibraryConfigEntity {
    fn default() -> Self {
        Self::new(dec!(1.00), 3)
    }
}

impl Identifiable for LibraryConfigEntity {
    fn id(&self) -> String {
        self.config_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use crate::config::domain::model::{LibraryConfigEntity, CONFIG_ID};

    #[tokio::test]
    async fn test_should_build_default_config() {
        let config = LibraryConfigEntity::default();
        assert_eq!(CONFIG_ID, config.config_id.as_str());
        assert_eq!(dec!(1.00), config.fine_per_day);
        assert_eq!(3, config.hold_expiry_days);
    }
}
