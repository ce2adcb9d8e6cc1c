use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rpc::error::RpcError;
use crate::rpc::version::ApiVersion;

/// Keyword arguments of a remote procedure, keyed by argument name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the argument `key`, replacing any previous value under the same name.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Flatten a serializable record into keyword arguments, one per field.
    ///
    /// The record must serialize to a JSON object.
    pub fn from_serializable<T: Serialize + ?Sized>(record: &T) -> Result<Self, RpcError> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(RpcError::InvalidArguments(format!(
                "expected an object of keyword arguments, got {other}"
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// A named remote procedure invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    method: String,
    args: Args,
}

impl Message {
    pub fn new(method: impl Into<String>, args: Args) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// A message for a procedure that takes no arguments.
    pub fn without_args(method: impl Into<String>) -> Self {
        Self::new(method, Args::new())
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Shorthand for `self.args().get(key)`.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }
}

/// A [`Message`] stamped with the minimum API version the receiver must implement.
///
/// Serializes as `{"method": ..., "args": {...}, "version": "X.Y"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(flatten)]
    message: Message,
    version: ApiVersion,
}

impl Envelope {
    pub fn new(message: Message, version: ApiVersion) -> Self {
        Self { message, version }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn method(&self) -> &str {
        self.message.method()
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn into_parts(self) -> (Message, ApiVersion) {
        (self.message, self.version)
    }
}
