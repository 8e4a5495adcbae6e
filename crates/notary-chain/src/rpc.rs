//! JSON-RPC 2.0 sobre un transporte HTTP intercambiable.
//!
//! `RpcTransport` aísla la red: en producción `UreqTransport`, en tests un
//! transporte con respuestas guionadas.

use log::trace;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::RpcError;

pub trait RpcTransport: Send + Sync {
    /// POST de un cuerpo JSON; devuelve el cuerpo de la respuesta.
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, RpcError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for Box<T> {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, RpcError> {
        (**self).post_json(url, body)
    }
}

impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, RpcError> {
        (**self).post_json(url, body)
    }
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder().timeout_global(Some(timeout)).build();
        Self { agent: config.into() }
    }
}

impl RpcTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<Vec<u8>, RpcError> {
        let mut resp = self.agent
                           .post(url)
                           .header("Content-Type", "application/json")
                           .send(body)
                           .map_err(|e| RpcError::Transport(format!("POST {url}: {e}")))?;
        resp.body_mut()
            .read_to_vec()
            .map_err(|e| RpcError::Transport(format!("read body: {e}")))
    }
}

pub struct JsonRpcClient<T: RpcTransport> {
    url: String,
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcTransport> JsonRpcClient<T> {
    pub fn new(url: impl Into<String>, transport: T) -> Self {
        Self { url: url.into(),
               transport,
               next_id: AtomicU64::new(1) }
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn transport(&self) -> &T { &self.transport }

    /// Ejecuta `method` y devuelve el campo `result` (que puede ser `null`).
    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        let body_bytes = serde_json::to_vec(&body).map_err(|e| RpcError::Malformed(format!("serialize: {e}")))?;
        trace!("rpc -> {method} #{id}");

        let resp_bytes = self.transport.post_json(&self.url, &body_bytes)?;
        let mut resp: Value = serde_json::from_slice(&resp_bytes).map_err(|e| RpcError::Malformed(format!("json: {e}")))?;

        if let Some(error) = resp.get("error").filter(|e| !e.is_null()) {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error.get("message").and_then(Value::as_str).map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(RpcError::Remote { code, message });
        }
        match resp.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(RpcError::Malformed(format!("{method}: missing result"))),
        }
    }
}

/// `"0x1a"` → 26. Cantidades JSON-RPC: hex sin ceros a la izquierda.
pub fn parse_quantity(v: &Value) -> Result<u64, RpcError> {
    let s = v.as_str().ok_or_else(|| RpcError::Malformed(format!("expected hex quantity, got {v}")))?;
    let digits = s.strip_prefix("0x").ok_or_else(|| RpcError::Malformed(format!("quantity without 0x: {s}")))?;
    if digits.is_empty() {
        return Err(RpcError::Malformed("empty quantity".into()));
    }
    u64::from_str_radix(digits, 16).map_err(|e| RpcError::Malformed(format!("quantity {s}: {e}")))
}
