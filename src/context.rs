use std::fmt;
use std::sync::Arc;

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Correlation id attached to every request issued on behalf of a caller.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(Arc<str>);

impl RequestId {
    /// Generate a fresh id of the form `req-<uuid>`.
    pub fn generate() -> Self {
        Self(format!("req-{}", Uuid::new_v4()).into())
    }

    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Whether soft-deleted records are visible to a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadDeleted {
    #[default]
    No,
    Yes,
    Only,
}

/// Caller identity and request correlation data.
///
/// The client never inspects the context; it is handed to the transport as-is so it can travel
/// alongside the message.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct RequestContext {
    #[builder(default = RequestId::generate())]
    pub request_id: RequestId,

    pub user_id: Option<String>,

    pub project_id: Option<String>,

    #[builder(default)]
    pub is_admin: bool,

    #[builder(default)]
    pub roles: Vec<String>,

    #[builder(default)]
    pub read_deleted: ReadDeleted,
}

impl RequestContext {
    /// An administrative context with no user or project, for service-to-service calls.
    pub fn admin() -> Self {
        Self::builder()
            .is_admin(true)
            .roles(vec!["admin".to_string()])
            .build()
    }
}
