use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::domain::Identifiable;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::Repository;

type Table = Arc<Mutex<HashMap<String, Value>>>;

lazy_static! {
    // Named tables are shared process-wide so independently wired services
    // observe the same rows, the same way the DynamoDB repositories share
    // tables across service instances.
    static ref TABLES: Mutex<HashMap<String, Table>> = Mutex::new(HashMap::new());
}

fn open_table(table_name: &str) -> Table {
    match TABLES.lock() {
        Ok(mut tables) => tables.entry(table_name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(HashMap::new()))).clone(),
        Err(_) => Arc::new(Mutex::new(HashMap::new())),
    }
}

// MemoryRepository keeps rows as serialized json values behind a mutex with
// the same optimistic version check as the DynamoDB store. It backs the test
// suite and local development.
pub(crate) struct MemoryRepository<E> {
    rows: Table,
    table_name: String,
    _entity: PhantomData<E>,
}

impl<E> MemoryRepository<E> {
    pub(crate) fn new(table_name: &str) -> Self {
        Self {
            rows: open_table(table_name),
            table_name: table_name.to_string(),
            _entity: PhantomData,
        }
    }

    fn lock_rows(&self) -> LendingResult<MutexGuard<'_, HashMap<String, Value>>> {
        self.rows.lock().map_err(|err| LendingError::runtime(
            format!("failed to lock table {} {:?}", self.table_name, err).as_str(), None))
    }
}

fn stored_version(value: &Value) -> i64 {
    value.get("version").and_then(Value::as_i64).unwrap_or(0)
}

fn compare(ordering: std::cmp::Ordering, op: &str) -> bool {
    match op {
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => ordering.is_eq(),
    }
}

fn matches_field(field: Option<&Value>, op: &str, expected: &str) -> bool {
    match field {
        Some(Value::String(actual)) => compare(actual.as_str().cmp(expected), op),
        Some(Value::Number(actual)) => {
            match (actual.as_f64(), expected.parse::<f64>()) {
                (Some(lhs), Ok(rhs)) => compare(lhs.total_cmp(&rhs), op),
                _ => false,
            }
        }
        Some(Value::Bool(actual)) => {
            expected.parse::<bool>().map(|rhs| compare(actual.cmp(&rhs), op)).unwrap_or(false)
        }
        _ => false,
    }
}

fn matches_predicate(value: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| {
        let parts = k.split(':').collect::<Vec<&str>>();
        let (name, op) = if parts.len() > 1 { (parts[0], parts[1]) } else { (k.as_str(), "=") };
        matches_field(value.get(name), op, v.as_str())
    })
}

#[async_trait]
impl<E> Repository<E> for MemoryRepository<E>
    where E: Identifiable + Serialize + DeserializeOwned + Sync + Send {
    async fn create(&self, entity: &E) -> LendingResult<usize> {
        let val = serde_json::to_value(entity)?;
        let mut rows = self.lock_rows()?;
        if rows.contains_key(entity.id().as_str()) {
            return Err(LendingError::duplicate_key(
                format!("{} already exists in {}", entity.id(), self.table_name).as_str()));
        }
        rows.insert(entity.id(), val);
        Ok(1)
    }

    async fn update(&self, entity: &E) -> LendingResult<usize> {
        let mut val = serde_json::to_value(entity)?;
        if let Value::Object(ref mut map) = val {
            map.insert("version".to_string(), Value::from(entity.version() + 1));
        }
        let mut rows = self.lock_rows()?;
        match rows.get(entity.id().as_str()) {
            Some(existing) if stored_version(existing) == entity.version() => {
                rows.insert(entity.id(), val);
                Ok(1)
            }
            Some(existing) => {
                Err(LendingError::unavailable(
                    format!("version conflict for {} in {}: stored {} given {}",
                            entity.id(), self.table_name, stored_version(existing),
                            entity.version()).as_str(), None, true))
            }
            None => {
                Err(LendingError::not_found(
                    format!("{} not found in {}", entity.id(), self.table_name).as_str()))
            }
        }
    }

    async fn get(&self, id: &str) -> LendingResult<E> {
        let rows = self.lock_rows()?;
        if let Some(val) = rows.get(id) {
            serde_json::from_value(val.clone()).map_err(LendingError::from)
        } else {
            Err(LendingError::not_found(
                format!("{} not found in {}", id, self.table_name).as_str()))
        }
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut rows = self.lock_rows()?;
        rows.remove(id);
        Ok(1)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<E>> {
        let rows = self.lock_rows()?;
        let mut matched = rows.iter()
            .filter(|(_, val)| matches_predicate(val, predicate))
            .collect::<Vec<_>>();
        // deterministic paging order
        matched.sort_by(|(a, _), (b, _)| a.cmp(b));
        let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let mut records = Vec::new();
        for (_, val) in matched.iter().skip(offset).take(page_size) {
            records.push(serde_json::from_value((*val).clone())?);
        }
        let next_page = if offset + page_size < matched.len() {
            Some((offset + page_size).to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}
