// headgate-core/src/infrastructure/api/client.rs
//
// The reqwest adapter behind the ControlPlane port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::domain::pipeline::{
    ConnectionSpec, DestinationSpec, DiscoveredStream, SourceSpec, SyncCatalog,
};
use crate::error::HeadgateError;
use crate::infrastructure::api::types::{
    CheckDestinationRequest, CheckRead, CheckSourceRequest, ConnectionCreateRequest,
    ConnectionListResponse, ConnectionRead, DestinationCreateRequest, DestinationListResponse,
    DestinationRead, DiscoverSchemaRequest, DiscoverSchemaResponse, SchemaFilter,
    SourceCreateRequest, SourceListResponse, SourceRead, WorkspaceScope,
};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::control_plane::{
    CheckOutcome, ConnectionSummary, ControlPlane, DiscoverFilter, ResourceSummary,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the control-plane REST API.
///
/// One request per operation; no retries, no batching. Auth is a bearer
/// token; every list/create call is scoped to a single workspace.
#[derive(Debug, Clone)]
pub struct ControlPlaneClient {
    base_url: String,
    api_token: String,
    workspace_id: String,
    http: Client,
}

impl ControlPlaneClient {
    pub fn new(
        base_url: &str,
        api_token: &str,
        workspace_id: &str,
    ) -> Result<Self, InfrastructureError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("headgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            workspace_id: workspace_id.to_string(),
            http,
        })
    }

    /// GET /connections/get?connectionId=<id> — the full connection JSON.
    pub async fn get_connection(&self, id: &str) -> Result<serde_json::Value, HeadgateError> {
        let path = "/connections/get";
        let url = format!("{}{}", self.base_url, path);
        debug!("control-plane GET {}", url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("connectionId", id)])
            .send()
            .await
            .map_err(InfrastructureError::Http)?;
        Ok(self.handle_response(response, path).await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, InfrastructureError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("control-plane POST {}", url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?;
        self.handle_response(response, path).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, InfrastructureError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| InfrastructureError::UnexpectedPayload {
                path: path.to_string(),
                detail: e.to_string(),
            })
        } else {
            // Servers wrap failures as {"message": "..."}; fall back to the raw body.
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        format!("HTTP {status}")
                    } else {
                        body.clone()
                    }
                });
            Err(InfrastructureError::ApiStatus {
                status: status.as_u16(),
                path: path.to_string(),
                message,
            })
        }
    }

    fn workspace_scope(&self) -> WorkspaceScope {
        WorkspaceScope {
            workspace_id: self.workspace_id.clone(),
        }
    }
}

#[async_trait]
impl ControlPlane for ControlPlaneClient {
    async fn find_source_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ResourceSummary>, HeadgateError> {
        // The API has no name filter; list the workspace and match exactly.
        let response: SourceListResponse =
            self.post("/sources/list", &self.workspace_scope()).await?;
        Ok(response
            .sources
            .into_iter()
            .find(|s| s.name == name)
            .map(ResourceSummary::from))
    }

    async fn create_source(&self, spec: &SourceSpec) -> Result<ResourceSummary, HeadgateError> {
        let request = SourceCreateRequest::from_spec(spec, &self.workspace_id);
        let read: SourceRead = self.post("/sources/create", &request).await?;
        Ok(read.into())
    }

    async fn check_source(&self, id: &str) -> Result<CheckOutcome, HeadgateError> {
        let request = CheckSourceRequest {
            source_id: id.to_string(),
        };
        let read: CheckRead = self.post("/sources/check_connection", &request).await?;
        Ok(CheckOutcome {
            succeeded: read.status == "succeeded",
            message: read.message,
        })
    }

    async fn find_destination_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ResourceSummary>, HeadgateError> {
        let response: DestinationListResponse = self
            .post("/destinations/list", &self.workspace_scope())
            .await?;
        Ok(response
            .destinations
            .into_iter()
            .find(|d| d.name == name)
            .map(ResourceSummary::from))
    }

    async fn create_destination(
        &self,
        spec: &DestinationSpec,
    ) -> Result<ResourceSummary, HeadgateError> {
        let request = DestinationCreateRequest::from_spec(spec, &self.workspace_id);
        let read: DestinationRead = self.post("/destinations/create", &request).await?;
        Ok(read.into())
    }

    async fn check_destination(&self, id: &str) -> Result<CheckOutcome, HeadgateError> {
        let request = CheckDestinationRequest {
            destination_id: id.to_string(),
        };
        let read: CheckRead = self.post("/destinations/check_connection", &request).await?;
        Ok(CheckOutcome {
            succeeded: read.status == "succeeded",
            message: read.message,
        })
    }

    async fn discover_streams(
        &self,
        source_id: &str,
        filter: &DiscoverFilter,
    ) -> Result<Vec<DiscoveredStream>, HeadgateError> {
        let schema = if filter.database.is_none()
            && filter.schema.is_none()
            && filter.tables.is_empty()
        {
            None
        } else {
            Some(SchemaFilter {
                database: filter.database.clone(),
                schema: filter.schema.clone(),
                tables: filter.tables.clone(),
            })
        };
        let request = DiscoverSchemaRequest {
            source_id: source_id.to_string(),
            schema,
        };
        let response: DiscoverSchemaResponse = self
            .post("/connections/discover_schema", &request)
            .await?;
        Ok(response
            .streams
            .into_iter()
            .map(|entry| entry.stream.into())
            .collect())
    }

    async fn find_connection_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ConnectionSummary>, HeadgateError> {
        let response: ConnectionListResponse = self
            .post("/connections/list", &self.workspace_scope())
            .await?;
        Ok(response
            .connections
            .into_iter()
            .find(|c| c.name == name)
            .map(ConnectionSummary::from))
    }

    async fn create_connection(
        &self,
        spec: &ConnectionSpec,
        source_id: &str,
        destination_id: &str,
        catalog: &SyncCatalog,
    ) -> Result<ConnectionSummary, HeadgateError> {
        let request =
            ConnectionCreateRequest::from_spec(spec, source_id, destination_id, catalog.clone());
        let read: ConnectionRead = self.post("/connections/create", &request).await?;
        Ok(read.into())
    }
}
