//! Orchestrator callbacks
//!
//! `CrudProcessors` is the seam between the orchestrator and whatever
//! actually stores records. Every method has a no-op default, so a caller
//! only implements the operations it supports.

use async_trait::async_trait;
use serde_json::Value;
use smallcrud_core::CrudResult;
use smallcrud_gateway::{Ack, DataGateway};
use smallcrud_schema::{DEFINITION_SCHEMA, DefinitionTree, PageResult, Query, Record};
use std::sync::Arc;
use tracing::debug;

/// Callbacks driven by the orchestrator
#[async_trait]
pub trait CrudProcessors: Send + Sync {
    /// Run a search
    async fn process_search(&self, _query: &Query) -> CrudResult<PageResult> {
        Ok(PageResult::default())
    }

    /// Create a record, returning its id
    async fn process_create(&self, _record: &Record) -> CrudResult<Value> {
        Ok(Value::Null)
    }

    /// Update a record
    async fn process_update(&self, _record: &Record) -> CrudResult<Ack> {
        Ok(Ack(Value::Null))
    }

    /// Delete a record
    async fn process_delete(&self, _record: &Record) -> CrudResult<Ack> {
        Ok(Ack(Value::Null))
    }

    /// React to a row click
    async fn process_row_click(&self, _record: &Record) -> CrudResult<()> {
        Ok(())
    }
}

/// Processors that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProcessors;

impl CrudProcessors for NoopProcessors {}

// ============================================================================
// Gateway Processors
// ============================================================================

type RowClickHandler = Arc<dyn Fn(&Record) -> CrudResult<()> + Send + Sync>;

/// Processors backed by a `DataGateway`
#[derive(Clone)]
pub struct GatewayProcessors {
    gateway: DataGateway,
    row_click: Option<RowClickHandler>,
}

impl GatewayProcessors {
    /// Wrap a gateway
    pub fn new(gateway: DataGateway) -> Self {
        Self {
            gateway,
            row_click: None,
        }
    }

    /// Forward row clicks to `handler`
    pub fn with_row_click(
        mut self,
        handler: impl Fn(&Record) -> CrudResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.row_click = Some(Arc::new(handler));
        self
    }

    /// The wrapped gateway
    pub fn gateway(&self) -> &DataGateway {
        &self.gateway
    }
}

#[async_trait]
impl CrudProcessors for GatewayProcessors {
    async fn process_search(&self, query: &Query) -> CrudResult<PageResult> {
        self.gateway.search(query).await
    }

    async fn process_create(&self, record: &Record) -> CrudResult<Value> {
        self.gateway.create(record).await
    }

    async fn process_update(&self, record: &Record) -> CrudResult<Ack> {
        self.gateway.update(record).await
    }

    async fn process_delete(&self, record: &Record) -> CrudResult<Ack> {
        self.gateway.delete(record).await
    }

    async fn process_row_click(&self, record: &Record) -> CrudResult<()> {
        match &self.row_click {
            Some(handler) => handler(record),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Definition Processors
// ============================================================================

/// Gateway processors for the definition schema
///
/// Before create and update, `gql` is regenerated from `types` whenever
/// `types` holds at least one definition.
#[derive(Clone)]
pub struct DefinitionProcessors {
    inner: GatewayProcessors,
}

impl DefinitionProcessors {
    /// Wrap gateway processors bound to the definition schema
    pub fn new(inner: GatewayProcessors) -> Self {
        Self { inner }
    }

    /// Copy of `record` with `gql` regenerated
    pub fn with_generated_sdl(record: &Record) -> CrudResult<Record> {
        let mut record = record.clone();
        if let Some(types) = record.get("types") {
            let tree = DefinitionTree::from_value(types)?;
            if !tree.is_empty() {
                let sdl = tree.to_sdl();
                debug!(types = tree.len(), "Regenerated SDL");
                record.insert("gql", Value::String(sdl));
            }
        }
        Ok(record)
    }
}

#[async_trait]
impl CrudProcessors for DefinitionProcessors {
    async fn process_search(&self, query: &Query) -> CrudResult<PageResult> {
        self.inner.process_search(query).await
    }

    async fn process_create(&self, record: &Record) -> CrudResult<Value> {
        let record = Self::with_generated_sdl(record)?;
        self.inner.process_create(&record).await
    }

    async fn process_update(&self, record: &Record) -> CrudResult<Ack> {
        let record = Self::with_generated_sdl(record)?;
        self.inner.process_update(&record).await
    }

    async fn process_delete(&self, record: &Record) -> CrudResult<Ack> {
        self.inner.process_delete(record).await
    }

    async fn process_row_click(&self, record: &Record) -> CrudResult<()> {
        self.inner.process_row_click(record).await
    }
}

/// Processors for a gateway's schema; the definition schema regenerates SDL
pub fn processors_for(gateway: DataGateway) -> Arc<dyn CrudProcessors> {
    if gateway.schema().name == DEFINITION_SCHEMA {
        Arc::new(DefinitionProcessors::new(GatewayProcessors::new(gateway)))
    } else {
        Arc::new(GatewayProcessors::new(gateway))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use smallcrud_gateway::RecordingTransport;
    use smallcrud_schema::definition_schema;

    #[tokio::test]
    async fn test_noop_defaults() {
        let p = NoopProcessors;
        assert_eq!(p.process_search(&Query::new()).await.unwrap(), PageResult::default());
        assert_eq!(p.process_create(&Record::new()).await.unwrap(), Value::Null);
        assert!(p.process_row_click(&Record::new()).await.is_ok());
    }

    #[test]
    fn test_sdl_regenerated_from_types() {
        let record = Record::new().with("name", json!("blog")).with(
            "types",
            json!([{"name": "post", "fields": [{"name": "title", "type": {"name": "String"}}]}]),
        );
        let record = DefinitionProcessors::with_generated_sdl(&record).unwrap();
        assert_eq!(
            record.get("gql"),
            Some(&json!("type Post {\n  title: String\n}"))
        );
    }

    #[test]
    fn test_sdl_untouched_for_empty_types() {
        let record = Record::new()
            .with("types", json!(""))
            .with("gql", json!("keep"));
        let record = DefinitionProcessors::with_generated_sdl(&record).unwrap();
        assert_eq!(record.get("gql"), Some(&json!("keep")));
    }

    #[tokio::test]
    async fn test_definition_create_sends_generated_sdl() {
        let transport = Arc::new(RecordingTransport::replying(
            json!({"definition_create": [{"_id": "d1"}]}),
        ));
        let gateway = DataGateway::new(Arc::new(definition_schema()), transport.clone());
        let processors = DefinitionProcessors::new(GatewayProcessors::new(gateway));

        let record = Record::new().with(
            "types",
            json!([{"name": "tag", "fields": [{"name": "_id", "type": {"name": "ID"}}]}]),
        );
        let id = processors.process_create(&record).await.unwrap();

        assert_eq!(id, json!("d1"));
        let sent = &transport.requests()[0].variables;
        assert_eq!(sent["data"][0]["gql"], json!("type Tag {\n  _id: ID\n}"));
    }

    #[tokio::test]
    async fn test_row_click_handler() {
        let transport = Arc::new(RecordingTransport::replying(json!({})));
        let gateway = DataGateway::new(Arc::new(definition_schema()), transport);
        let processors = GatewayProcessors::new(gateway).with_row_click(|record| {
            if record.has_id() {
                Ok(())
            } else {
                Err(smallcrud_core::CrudError::internal("no id"))
            }
        });
        assert!(processors.process_row_click(&Record::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_processors_for_definition_schema() {
        let transport = Arc::new(RecordingTransport::replying(
            json!({"definition_update": true}),
        ));
        let gateway = DataGateway::new(Arc::new(definition_schema()), transport.clone());
        let processors = processors_for(gateway);

        let record = Record::new().with("_id", json!("d1")).with(
            "types",
            json!([{"name": "tag", "fields": []}]),
        );
        let ack = processors.process_update(&record).await.unwrap();

        assert!(ack.is_ok());
        let sent = &transport.requests()[0].variables;
        assert_eq!(sent["data"]["gql"], json!("type Tag {\n}"));
    }
}
