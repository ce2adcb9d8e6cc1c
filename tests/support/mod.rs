// Test transports. Each test binary uses a different subset.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use network_rpcapi::rpc::{Envelope, RpcError, RpcTransport};
use network_rpcapi::{RequestContext, RequestId};
use serde_json::Value;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Call,
    Cast,
    Fanout,
}

/// One message handed to the transport.
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub kind: Kind,
    pub request_id: RequestId,
    pub topic: String,
    pub envelope: Envelope,
}

type Responder = Box<dyn Fn(&Envelope) -> Result<Value, RpcError> + Send + Sync>;

/// Records every dispatch and answers calls with a configurable responder.
pub struct RecordingTransport {
    sent: Mutex<Vec<Dispatched>>,
    responder: Responder,
    host_separator: Option<&'static str>,
}

impl RecordingTransport {
    /// Replies to every call with `{"method": <name>}`.
    pub fn new() -> Self {
        Self::with_responder(|envelope| Ok(serde_json::json!({ "method": envelope.method() })))
    }

    pub fn with_responder(
        responder: impl Fn(&Envelope) -> Result<Value, RpcError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            host_separator: None,
        }
    }

    /// Derive host topics as `{topic}{separator}{host}` instead of the default.
    pub fn with_host_separator(mut self, separator: &'static str) -> Self {
        self.host_separator = Some(separator);
        self
    }

    pub fn sent(&self) -> Vec<Dispatched> {
        self.sent.lock().unwrap().clone()
    }

    /// The only dispatch recorded so far.
    pub fn single(&self) -> Dispatched {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one dispatch, got {sent:?}");
        sent.into_iter().next().unwrap()
    }

    fn record(&self, kind: Kind, ctx: &RequestContext, topic: &str, envelope: Envelope) {
        self.sent.lock().unwrap().push(Dispatched {
            kind,
            request_id: ctx.request_id.clone(),
            topic: topic.to_string(),
            envelope,
        });
    }
}

impl RpcTransport for RecordingTransport {
    async fn call(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<Value, RpcError> {
        let reply = (self.responder)(&envelope);
        self.record(Kind::Call, ctx, topic, envelope);
        tokio::task::yield_now().await;
        reply
    }

    async fn cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<(), RpcError> {
        self.record(Kind::Cast, ctx, topic, envelope);
        Ok(())
    }

    async fn fanout_cast(
        &self,
        ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<(), RpcError> {
        self.record(Kind::Fanout, ctx, topic, envelope);
        Ok(())
    }

    fn host_topic(&self, _ctx: &RequestContext, base_topic: &str, host: &str) -> String {
        match self.host_separator {
            Some(separator) => format!("{base_topic}{separator}{host}"),
            None => network_rpcapi::rpc::host_topic(base_topic, host),
        }
    }
}

/// A minimal in-memory bus: casts go to the first subscriber of a topic, fanouts to all of them.
#[derive(Default)]
pub struct LoopbackBus {
    subscribers: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<Envelope>>>>,
}

impl LoopbackBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: &str) -> mpsc::UnboundedReceiver<Envelope> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap()
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        rx
    }

    fn senders(&self, topic: &str) -> Result<Vec<mpsc::UnboundedSender<Envelope>>, RpcError> {
        self.subscribers
            .lock()
            .unwrap()
            .get(topic)
            .filter(|senders| !senders.is_empty())
            .cloned()
            .ok_or_else(|| RpcError::NoConsumers(topic.to_string()))
    }
}

impl RpcTransport for LoopbackBus {
    async fn call(
        &self,
        _ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<Value, RpcError> {
        Err(RpcError::Timeout {
            topic: topic.to_string(),
            method: envelope.method().to_string(),
        })
    }

    async fn cast(
        &self,
        _ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<(), RpcError> {
        let senders = self.senders(topic)?;
        senders[0]
            .send(envelope)
            .map_err(|_| RpcError::ConnectionClosed)
    }

    async fn fanout_cast(
        &self,
        _ctx: &RequestContext,
        topic: &str,
        envelope: Envelope,
    ) -> Result<(), RpcError> {
        for sender in self.senders(topic)? {
            sender
                .send(envelope.clone())
                .map_err(|_| RpcError::ConnectionClosed)?;
        }
        Ok(())
    }
}
