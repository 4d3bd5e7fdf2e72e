use std::cmp;
use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::domain::Identifiable;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, from_item, parse_item, to_ddb_page};

// DdbRepository persists any serializable entity as a full item. Updates are
// written as conditional puts guarded by the stored version, which is bumped
// on every successful write.
#[derive(Debug)]
pub(crate) struct DdbRepository<E> {
    client: Client,
    table_name: String,
    index_name: String,
    key_name: String,
    index_key_name: String,
    _entity: PhantomData<E>,
}

impl<E> DdbRepository<E> {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str,
                      key_name: &str, index_key_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            key_name: key_name.to_string(),
            index_key_name: index_key_name.to_string(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E> Repository<E> for DdbRepository<E>
    where E: Identifiable + Serialize + DeserializeOwned + Sync + Send {
    async fn create(&self, entity: &E) -> LendingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression(format!("attribute_not_exists({})", self.key_name))
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(|err| match &err {
            SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception() => {
                LendingError::duplicate_key(
                    format!("{} already exists in {}", entity.id(), self.table_name).as_str())
            }
            _ => LendingError::from(err),
        })
    }

    async fn update(&self, entity: &E) -> LendingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let mut val = serde_json::to_value(entity)?;
        if let Value::Object(ref mut map) = val {
            map.insert("version".to_string(), Value::from(entity.version() + 1));
        }
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression(format!("attribute_exists({}) AND version = :old_version", self.key_name))
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version().to_string()))
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(|err| match &err {
            SdkError::<PutItemError>::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception() => {
                LendingError::unavailable(
                    format!("version conflict for {} in {}", entity.id(), self.table_name).as_str(),
                    None, true)
            }
            _ => LendingError::from(err),
        })
    }

    async fn get(&self, id: &str) -> LendingResult<E> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key(self.key_name.as_str(), AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LendingError::from)?;
        if let Some(item) = out.item() {
            from_item(item)
        } else {
            Err(LendingError::not_found(
                format!("{} not found in {}", id, self.table_name).as_str()))
        }
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key(self.key_name.as_str(), AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LendingError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<E>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        if let Some(index_val) = predicate.get(self.index_key_name.as_str()) {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .limit(cmp::min(page_size, 500) as i32)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key)
                .key_condition_expression(format!("{} = :index_key", self.index_key_name))
                .expression_attribute_values(":index_key", AttributeValue::S(index_val.to_string()));
            let mut filter_expr = String::new();
            for (k, v) in predicate {
                if k != self.index_key_name.as_str() {
                    let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                    request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
                }
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            let out = request.send().await.map_err(LendingError::from)?;
            let mut records = Vec::new();
            for item in out.items.as_ref().unwrap_or(&vec![]) {
                records.push(from_item(item)?);
            }
            Ok(from_ddb(page, page_size, out.last_evaluated_key(), records))
        } else {
            // no index key in the predicate, fall back to a filtered scan
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .limit(cmp::min(page_size, 500) as i32)
                .set_exclusive_start_key(exclusive_start_key);
            let mut filter_expr = String::new();
            for (k, v) in predicate {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            let out = request.send().await.map_err(LendingError::from)?;
            let mut records = Vec::new();
            for item in out.items.as_ref().unwrap_or(&vec![]) {
                records.push(from_item(item)?);
            }
            Ok(from_ddb(page, page_size, out.last_evaluated_key(), records))
        }
    }
}
