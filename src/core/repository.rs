pub mod ddb_repository;
pub mod memory_repository;

use async_trait::async_trait;
use core::option::Option;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::lending::{LendingResult, PaginatedResult};

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LendingResult<usize>;

    // updates an entity, guarded by its optimistic version
    async fn update(&self, entity: &Entity) -> LendingResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LendingResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LendingResult<usize>;

    // find entities matching the predicate; keys may carry a comparison
    // operator suffix such as "due_at:<="
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}
