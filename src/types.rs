use std::collections::HashMap;
use serde_json::Value;
use uuid::Uuid;

/// Backend primary key for every admin resource
pub type EntityId = i64;

/// Generic metadata container
pub type Metadata = HashMap<String, Value>;

/// Correlation ID for tracking related operations
pub type CorrelationId = Uuid;
