use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use crate::config::domain::model::{LibraryConfigEntity, CONFIG_ID};
use crate::config::domain::ConfigService;
use crate::config::repository::ConfigRepository;
use crate::core::lending::{LendingError, LendingResult};

pub(crate) struct ConfigServiceImpl {
    config_repository: Box<dyn ConfigRepository>,
    // cached copy of the singleton row; invalidated on update
    cached: RwLock<Option<LibraryConfigEntity>>,
}

impl ConfigServiceImpl {
    pub(crate) fn new(config_repository: Box<dyn ConfigRepository>) -> Self {
        Self {
            config_repository,
            cached: RwLock::new(None),
        }
    }

    fn read_cache(&self) -> Option<LibraryConfigEntity> {
        match self.cached.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        }
    }

    fn store_cache(&self, config: &LibraryConfigEntity) {
        if let Ok(mut guard) = self.cached.write() {
            *guard = Some(config.clone());
        }
    }

    async fn get_or_create(&self) -> LendingResult<LibraryConfigEntity> {
        match self.config_repository.get(CONFIG_ID).await {
            Ok(config) => Ok(config),
            Err(LendingError::NotFound { .. }) => {
                let config = LibraryConfigEntity::default();
                match self.config_repository.create(&config).await {
                    Ok(_) => Ok(config),
                    // another writer created the row first
                    Err(LendingError::DuplicateKey { .. }) => self.config_repository.get(CONFIG_ID).await,
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn load(&self) -> LendingResult<LibraryConfigEntity> {
        if let Some(config) = self.read_cache() {
            return Ok(config);
        }
        let config = self.get_or_create().await?;
        self.store_cache(&config);
        Ok(config)
    }

    async fn fine_rate_per_day(&self) -> LendingResult<Decimal> {
        Ok(self.load().await?.fine_per_day)
    }

    async fn hold_expiry_days(&self) -> LendingResult<i64> {
        Ok(self.load().await?.hold_expiry_days)
    }

    async fn update(&self, fine_per_day: Decimal, hold_expiry_days: i64) -> LendingResult<LibraryConfigEntity> {
        let mut config = self.get_or_create().await?;
        config.fine_per_day = fine_per_day;
        config.hold_expiry_days = hold_expiry_days;
        config.updated_at = Utc::now().naive_utc();
        self.config_repository.update(&config).await?;
        let saved = self.config_repository.get(CONFIG_ID).await?;
        self.store_cache(&saved);
        Ok(saved)
    }
}
