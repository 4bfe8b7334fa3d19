//! Per-schema data gateway
//!
//! A `DataGateway` binds one schema to one transport and exposes the four
//! CRUD operations. Update and delete refuse to run on records without
//! `_id`; those failures happen before anything is sent.

use crate::operations::OperationNames;
use crate::transport::{GraphqlRequest, Transport};
use crate::translate::to_wire_query;
use serde_json::{Value, json};
use smallcrud_core::{CrudError, CrudResult};
use smallcrud_schema::{ID_FIELD, PageResult, Query, Record, Schema};
use std::sync::Arc;
use tracing::{debug, info};

/// Backend acknowledgment of an update or delete
#[derive(Debug, Clone, PartialEq)]
pub struct Ack(pub Value);

impl Ack {
    /// Check if the backend reported success
    ///
    /// `false`, `null` and a zero count mean nothing was changed.
    pub fn is_ok(&self) -> bool {
        match &self.0 {
            Value::Bool(ok) => *ok,
            Value::Null => false,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => true,
        }
    }
}

/// CRUD adapter for one schema
#[derive(Clone)]
pub struct DataGateway {
    schema: Arc<Schema>,
    transport: Arc<dyn Transport>,
    names: OperationNames,
}

impl DataGateway {
    /// Create a gateway for `schema` over `transport`
    pub fn new(schema: Arc<Schema>, transport: Arc<dyn Transport>) -> Self {
        let names = OperationNames::for_schema(&schema);
        Self {
            schema,
            transport,
            names,
        }
    }

    /// The bound schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Operation names for the bound schema
    pub fn names(&self) -> &OperationNames {
        &self.names
    }

    /// Insert one record and return the server-assigned `_id`
    pub async fn create(&self, record: &Record) -> CrudResult<Value> {
        info!(schema = %self.schema.name, "Creating record");
        let request = GraphqlRequest::new(
            self.names.create_document(),
            json!({ "data": [record] }),
        );
        let created = self.send(&self.names.create, &request).await?;

        let entry = match &created {
            Value::Array(items) => items.first(),
            Value::Object(_) => Some(&created),
            _ => None,
        };
        entry
            .and_then(|e| e.get(ID_FIELD))
            .cloned()
            .ok_or_else(|| CrudError::malformed(&self.names.create, "no _id in response"))
    }

    /// Update the record identified by its `_id`
    pub async fn update(&self, record: &Record) -> CrudResult<Ack> {
        let id = self.require_id(record, "update")?;
        info!(schema = %self.schema.name, id = %id, "Updating record");
        let request = GraphqlRequest::new(
            self.names.update_document(),
            json!({
                "filter": { ID_FIELD: id },
                "data": record.without_id(),
            }),
        );
        self.send(&self.names.update, &request).await.map(Ack)
    }

    /// Delete the record identified by its `_id`
    pub async fn delete(&self, record: &Record) -> CrudResult<Ack> {
        let id = self.require_id(record, "delete")?;
        info!(schema = %self.schema.name, id = %id, "Deleting record");
        let request = GraphqlRequest::new(
            self.names.delete_document(),
            json!({ "filter": { ID_FIELD: id } }),
        );
        self.send(&self.names.delete, &request).await.map(Ack)
    }

    /// Run a search, selecting every field of the schema
    pub async fn search(&self, query: &Query) -> CrudResult<PageResult> {
        info!(schema = %self.schema.name, predicates = query.filter.len(), "Searching");
        let request = GraphqlRequest::new(
            self.names.search_document(&self.schema.field_names()),
            json!({ "query": to_wire_query(query) }),
        );
        let found = self.send(&self.names.find, &request).await?;
        if found.is_null() {
            return Err(CrudError::malformed(&self.names.find, "missing result"));
        }
        serde_json::from_value(found).map_err(|e| CrudError::malformed(&self.names.find, e.to_string()))
    }

    fn require_id(&self, record: &Record, operation: &'static str) -> CrudResult<Value> {
        record
            .id()
            .cloned()
            .ok_or_else(|| CrudError::missing_id(&self.schema.name, operation))
    }

    async fn send(&self, operation: &str, request: &GraphqlRequest) -> CrudResult<Value> {
        debug!(operation, variables = %request.variables, "Sending operation");
        let mut data = self.transport.post(request).await?;
        match data.get_mut(operation) {
            Some(value) => Ok(value.take()),
            None => Err(CrudError::malformed(operation, "operation missing from data")),
        }
    }
}

impl std::fmt::Debug for DataGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGateway")
            .field("schema", &self.schema.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use pretty_assertions::assert_eq;
    use smallcrud_core::{Operator, TypeDescriptor};
    use smallcrud_schema::{FieldDescriptor, PageSpec, Predicate, defaults_for};

    fn friend() -> Arc<Schema> {
        Arc::new(
            Schema::new("friend")
                .with_field(FieldDescriptor::new("_id", TypeDescriptor::Id))
                .with_field(FieldDescriptor::new("name", TypeDescriptor::String)),
        )
    }

    fn gateway(transport: &Arc<RecordingTransport>) -> DataGateway {
        DataGateway::new(friend(), transport.clone())
    }

    #[tokio::test]
    async fn test_create_sends_one_element_list() {
        let transport = Arc::new(RecordingTransport::replying(
            json!({"friend_create": [{"_id": "new-1"}]}),
        ));
        let record = Record::new().with("name", json!("Ann"));

        let id = gateway(&transport).create(&record).await.unwrap();

        assert_eq!(id, json!("new-1"));
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].variables, json!({"data": [{"name": "Ann"}]}));
        assert!(sent[0].query.contains("[FriendCreateInput!]!"));
    }

    #[tokio::test]
    async fn test_update_without_id_sends_nothing() {
        let transport = Arc::new(RecordingTransport::replying(json!({})));
        let err = gateway(&transport)
            .update(&Record::new().with("name", json!("x")))
            .await
            .unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_without_id_sends_nothing() {
        let transport = Arc::new(RecordingTransport::replying(json!({})));
        let err = gateway(&transport)
            .delete(&Record::new().with("_id", json!("")))
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::MissingId { operation: "delete", .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_strips_id_from_body() {
        let transport = Arc::new(RecordingTransport::replying(
            json!({"friend_update": true}),
        ));
        let record = Record::new()
            .with("_id", json!("abc"))
            .with("name", json!("Bo"));

        let ack = gateway(&transport).update(&record).await.unwrap();

        assert!(ack.is_ok());
        assert_eq!(
            transport.requests()[0].variables,
            json!({"filter": {"_id": "abc"}, "data": {"name": "Bo"}})
        );
    }

    #[tokio::test]
    async fn test_delete_targets_id() {
        let transport = Arc::new(RecordingTransport::replying(
            json!({"friend_delete": 1}),
        ));
        let record = Record::new().with("_id", json!("abc"));
        let ack = gateway(&transport).delete(&record).await.unwrap();
        assert_eq!(ack, Ack(json!(1)));
        assert_eq!(
            transport.requests()[0].variables,
            json!({"filter": {"_id": "abc"}})
        );
    }

    #[tokio::test]
    async fn test_search_selects_schema_fields() {
        let transport = Arc::new(RecordingTransport::replying(json!({
            "friend_find": {"count": 1, "data": [{"_id": "a", "name": "Ann"}]}
        })));
        let query = Query::new()
            .with_filter(vec![Predicate::new("name", Operator::Eq, json!("Ann"))])
            .with_page(PageSpec::for_page(1, 20));

        let page = gateway(&transport).search(&query).await.unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].get("name"), Some(&json!("Ann")));
        let sent = &transport.requests()[0];
        assert!(sent.query.contains("friend_find(query: $query) { count data { _id name } }"));
        assert_eq!(
            sent.variables,
            json!({"query": {"filter": {"name": "Ann"}, "limit": 20, "offset": 0}})
        );
    }

    #[tokio::test]
    async fn test_missing_operation_is_malformed() {
        let transport = Arc::new(RecordingTransport::replying(json!({"other": 1})));
        let err = gateway(&transport).search(&Query::new()).await.unwrap_err();
        assert!(matches!(err, CrudError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let transport = Arc::new(RecordingTransport::new(|_| {
            Err(CrudError::Remote(vec!["denied".to_string()]))
        }));
        let err = gateway(&transport)
            .create(&defaults_for(&friend().editable_fields()))
            .await
            .unwrap_err();
        assert!(err.is_remote());
    }

    #[test]
    fn test_ack_semantics() {
        assert!(Ack(json!(true)).is_ok());
        assert!(Ack(json!({"n": 1})).is_ok());
        assert!(!Ack(json!(false)).is_ok());
        assert!(!Ack(Value::Null).is_ok());
    }

    #[test]
    fn test_zero_count_is_not_acknowledged() {
        assert!(!Ack(json!(0)).is_ok());
        assert!(Ack(json!(1)).is_ok());
        assert!(Ack(json!(3)).is_ok());
    }
}
