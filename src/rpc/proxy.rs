use serde_json::Value;
use tracing::debug;

use crate::context::RequestContext;
use crate::rpc::error::RpcError;
use crate::rpc::message::{Envelope, Message};
use crate::rpc::transport::RpcTransport;
use crate::rpc::version::ApiVersion;

/// Client-side helper that addresses messages for a single service topic.
///
/// The proxy fills in the default topic and default version for any message that does not
/// override them, then delegates to the wrapped [`RpcTransport`]. Transport errors are returned
/// unchanged.
///
/// # Example
///
/// ```ignore
/// use network_rpcapi::rpc::{ApiVersion, Args, Message, RpcProxy};
///
/// let proxy = RpcProxy::new(transport, "network", ApiVersion::new(1, 0));
///
/// let reply = proxy
///     .call(&ctx, Message::without_args("get_all_networks"), None, None)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RpcProxy<T> {
    transport: T,
    topic: String,
    default_version: ApiVersion,
}

impl<T: RpcTransport> RpcProxy<T> {
    pub fn new(transport: T, topic: impl Into<String>, default_version: ApiVersion) -> Self {
        Self {
            transport,
            topic: topic.into(),
            default_version,
        }
    }

    /// Request/reply dispatch.
    ///
    /// Blocks the calling task until the transport returns the reply or fails.
    pub async fn call(
        &self,
        ctx: &RequestContext,
        message: Message,
        topic: Option<&str>,
        version: Option<ApiVersion>,
    ) -> Result<Value, RpcError> {
        let topic = topic.unwrap_or(&self.topic);
        let envelope = self.stamp(message, version);

        debug!(
            request_id = %ctx.request_id,
            method = %envelope.method(),
            topic = %topic,
            version = %envelope.version(),
            "Calling remote procedure"
        );

        self.transport.call(ctx, topic, envelope).await
    }

    /// Fire-and-forget dispatch to a single consumer.
    pub async fn cast(
        &self,
        ctx: &RequestContext,
        message: Message,
        topic: Option<&str>,
        version: Option<ApiVersion>,
    ) -> Result<(), RpcError> {
        let topic = topic.unwrap_or(&self.topic);
        let envelope = self.stamp(message, version);

        debug!(
            request_id = %ctx.request_id,
            method = %envelope.method(),
            topic = %topic,
            version = %envelope.version(),
            "Casting message"
        );

        self.transport.cast(ctx, topic, envelope).await
    }

    /// Fire-and-forget dispatch to every consumer of the proxy's topic.
    pub async fn fanout_cast(
        &self,
        ctx: &RequestContext,
        message: Message,
        version: Option<ApiVersion>,
    ) -> Result<(), RpcError> {
        let envelope = self.stamp(message, version);

        debug!(
            request_id = %ctx.request_id,
            method = %envelope.method(),
            topic = %self.topic,
            version = %envelope.version(),
            "Fanning out message"
        );

        self.transport.fanout_cast(ctx, &self.topic, envelope).await
    }

    /// Resolve the topic for `host`, or the proxy's own topic when no host is given.
    ///
    /// An empty host counts as no host.
    pub fn host_topic(&self, ctx: &RequestContext, host: Option<&str>) -> String {
        match host.filter(|host| !host.is_empty()) {
            Some(host) => self.transport.host_topic(ctx, &self.topic, host),
            None => self.topic.clone(),
        }
    }

    /// The topic used when a dispatch does not name one.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The version stamped when a dispatch does not name one.
    pub fn default_version(&self) -> ApiVersion {
        self.default_version
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn stamp(&self, message: Message, version: Option<ApiVersion>) -> Envelope {
        Envelope::new(message, version.unwrap_or(self.default_version))
    }
}
