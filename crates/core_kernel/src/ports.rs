//! Port infrastructure shared by the domain crates
//!
//! Each domain declares its storage port as a trait bounded by
//! [`DomainPort`] and [`HealthCheckable`]. `infra_db` supplies the Postgres
//! adapters, and the domain crates ship in-memory mocks behind a `mock`
//! feature. Both report failures as [`PortError`].

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a port adapter
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The store rejected the input (bad role, expired token, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A uniqueness rule was hit
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Connection failures say nothing about the request itself
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// True when the missing entity is of the given type
    pub fn is_missing(&self, entity: &str) -> bool {
        matches!(self, PortError::NotFound { entity_type, .. } if entity_type == entity)
    }
}

/// Marker trait for all domain ports
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of checking an adapter's backing store
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency: Duration) -> Self {
        Self::with_status(adapter_id, AdapterHealth::Healthy, latency, None)
    }

    pub fn unhealthy(adapter_id: impl Into<String>, latency: Duration, reason: impl Into<String>) -> Self {
        Self::with_status(adapter_id, AdapterHealth::Unhealthy, latency, Some(reason.into()))
    }

    fn with_status(
        adapter_id: impl Into<String>,
        status: AdapterHealth,
        latency: Duration,
        message: Option<String>,
    ) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms: latency.as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Call context passed alongside every port operation
///
/// Adapters attach it to their log spans; it never changes what a call does.
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Log namespace of the calling service
    pub namespace: Option<String>,
    /// User the call is made on behalf of
    pub initiated_by: Option<String>,
}

impl OperationMetadata {
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    pub fn initiated_by(mut self, actor: impl Into<String>) -> Self {
        self.initiated_by = Some(actor.into());
        self
    }

    /// Actor for log fields, `-` when the call is anonymous
    pub fn actor(&self) -> &str {
        self.initiated_by.as_deref().unwrap_or("-")
    }
}
