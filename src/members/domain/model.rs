use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// MemberEntity is a borrower identity. Authorization happens at the boundary;
// circulation receives already-authorized member ids.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub email: String,
    pub full_name: String,
    pub tier_id: Option<String>,
    pub active: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(email: &str, full_name: &str, tier_id: Option<&str>) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            email: email.to_string(),
            full_name: full_name.to_string(),
            tier_id: tier_id.map(str::to_string),
            active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// MembershipTierEntity carries the per-tier lending limits.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MembershipTierEntity {
    pub tier_id: String,
    pub version: i64,
    pub name: String,
    pub max_concurrent_loans: i64,
    pub loan_duration_days: i64,
    pub max_renewals: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MembershipTierEntity {
    pub fn new(name: &str, max_concurrent_loans: i64, loan_duration_days: i64, max_renewals: i64) -> Self {
        Self {
            tier_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            max_concurrent_loans,
            loan_duration_days,
            max_renewals,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MembershipTierEntity {
    fn id(&self) -> String {
        self.tier_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::members::domain::model::{MemberEntity, MembershipTierEntity};

    #[tokio::test]
    async fn test_should_build_member() {
        let member = MemberEntity::new("email", "name", Some("tier1"));
        assert_eq!("email", member.email.as_str());
        assert_eq!(Some("tier1".to_string()), member.tier_id);
        assert!(member.active);
    }

    #[tokio::test]
    async fn test_should_build_tier() {
        let tier = MembershipTierEntity::new("Premium", 5, 14, 1);
        assert_eq!("Premium", tier.name.as_str());
        assert_eq!(5, tier.max_concurrent_loans);
        assert_eq!(14, tier.loan_duration_days);
        assert_eq!(1, tier.max_renewals);
    }
}
