use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::context::RequestContext;
use crate::rpc::error::RpcError;
use crate::rpc::message::Envelope;

/// Build the topic that addresses a single host's consumer of `base_topic`.
///
/// An empty `host` addresses the base topic itself.
pub fn host_topic(base_topic: &str, host: &str) -> String {
    if host.is_empty() {
        return base_topic.to_string();
    }
    format!("{base_topic}.{host}")
}

/// The message bus primitives an [`RpcProxy`](crate::rpc::RpcProxy) dispatches through.
///
/// Implementations own the wire format, topic routing, timeouts and version negotiation. The
/// proxy resolves the destination topic and stamps the version before calling in, so every
/// method receives a fully addressed [`Envelope`].
pub trait RpcTransport: Send + Sync {
    /// Send `envelope` to one consumer of `topic` and wait for its reply.
    fn call(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send;

    /// Hand `envelope` to one consumer of `topic` without waiting for a reply.
    fn cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send;

    /// Deliver `envelope` to every consumer of `topic` without waiting for replies.
    fn fanout_cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send;

    /// Derive the topic served only by `host`.
    fn host_topic(&self, _ctx: &RequestContext, base_topic: &str, host: &str) -> String {
        host_topic(base_topic, host)
    }
}

impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    fn call(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        (**self).call(ctx, topic, envelope)
    }

    fn cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send {
        (**self).cast(ctx, topic, envelope)
    }

    fn fanout_cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send {
        (**self).fanout_cast(ctx, topic, envelope)
    }

    fn host_topic(&self, ctx: &RequestContext, base_topic: &str, host: &str) -> String {
        (**self).host_topic(ctx, base_topic, host)
    }
}

impl<T: RpcTransport + ?Sized> RpcTransport for &T {
    fn call(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        (**self).call(ctx, topic, envelope)
    }

    fn cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send {
        (**self).cast(ctx, topic, envelope)
    }

    fn fanout_cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> impl Future<Output = Result<(), RpcError>> + Send {
        (**self).fanout_cast(ctx, topic, envelope)
    }

    fn host_topic(&self, ctx: &RequestContext, base_topic: &str, host: &str) -> String {
        (**self).host_topic(ctx, base_topic, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_topic_format() {
        assert_eq!(host_topic("network", "compute-1"), "network.compute-1");
    }

    #[test]
    fn test_empty_host_is_base_topic() {
        assert_eq!(host_topic("network", ""), "network");
    }
}
