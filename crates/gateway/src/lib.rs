//! # smallcrud Gateway
//!
//! Talks to the GraphQL-style backend on behalf of one schema.
//!
//! ## Features
//!
//! - **Translate**: structured queries to the backend's filter/sort/page wire format
//! - **Operations**: `N_create` / `N_update` / `N_delete` / `N_find` naming and documents
//! - **Transport**: async `Transport` trait with an HTTP implementation over `reqwest`
//! - **Gateway**: `DataGateway` with the `_id` precondition on update and delete
//! - **Upload**: multipart image upload for `Image` fields
//!
//! ## Example
//!
//! ```rust,ignore
//! use smallcrud_gateway::{DataGateway, HttpTransport};
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HttpTransport::new("http://localhost:4002/graphql")?);
//! let gateway = DataGateway::new(schema, transport);
//! let page = gateway.search(&Query::new()).await?;
//! ```

pub mod gateway;
pub mod operations;
pub mod translate;
pub mod transport;
pub mod upload;

pub use gateway::{Ack, DataGateway};
pub use operations::OperationNames;
pub use translate::{to_wire_filter, to_wire_query, to_wire_sort};
pub use transport::{GraphqlRequest, GraphqlResponse, HttpTransport, Transport};
pub use upload::{ImageUploader, UploadSlot, resolve_action};

#[cfg(any(test, feature = "testing"))]
pub use transport::RecordingTransport;
