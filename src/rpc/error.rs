use thiserror::Error;

use crate::rpc::version::ApiVersion;

/// Errors surfaced by an RPC dispatch.
///
/// Apart from [`Serialization`](RpcError::Serialization) and
/// [`InvalidArguments`](RpcError::InvalidArguments), which happen while a message is being
/// built, every variant is produced by the transport and handed back to the caller untouched.
#[derive(Debug, Error)]
pub enum RpcError {
    /// No reply arrived for a request/reply call in time.
    #[error("timeout waiting for reply to '{method}' on topic '{topic}'")]
    Timeout { topic: String, method: String },

    /// The remote side raised while handling the message.
    #[error("remote error: {exc_type}: {message}")]
    RemoteError { exc_type: String, message: String },

    /// The server does not implement the version stamped on the message.
    #[error("server does not support version {version} required by '{method}'")]
    UnsupportedVersion { version: ApiVersion, method: String },

    /// Failed to turn an argument into a JSON value.
    #[error("message serialization error")]
    Serialization(#[from] serde_json::Error),

    /// A structured argument record did not serialize to a JSON object.
    #[error("invalid message arguments: {0}")]
    InvalidArguments(String),

    /// Nobody is consuming the destination topic.
    #[error("no consumers on topic '{0}'")]
    NoConsumers(String),

    /// The connection to the message bus was closed.
    #[error("message bus connection closed")]
    ConnectionClosed,

    /// Any other failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),
}
