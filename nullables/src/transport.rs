//! Nullable transport: scripted JSON-RPC responses, recorded requests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use casperflow_rpc::{RpcError, RpcRequest, RpcResponse, RpcTransport};
use serde_json::Value;

#[derive(Clone, Debug)]
enum Reply {
    Response(RpcResponse),
    Failure(String),
}

/// A transport that answers from a per-method script instead of a network.
///
/// Replies for a method are consumed in order; the last one repeats for
/// every later call. A method with no script fails as unreachable.
pub struct NullTransport {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<RpcRequest>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, method: &str, reply: Reply) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a successful reply carrying `result`.
    pub fn respond(&self, method: &str, result: Value) -> &Self {
        self.push(method, Reply::Response(RpcResponse::success(0, result)))
    }

    /// Queue a JSON-RPC error object reply.
    pub fn respond_error(&self, method: &str, code: i64, message: &str) -> &Self {
        self.push(method, Reply::Response(RpcResponse::failure(0, code, message)))
    }

    /// Queue an arbitrary envelope (e.g. one with neither result nor error).
    pub fn respond_raw(&self, method: &str, response: RpcResponse) -> &Self {
        self.push(method, Reply::Response(response))
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, method: &str, reason: &str) -> &Self {
        self.push(method, Reply::Failure(reason.to_string()))
    }

    /// All requests sent so far, in order.
    pub fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Total number of requests sent.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests sent for `method`.
    pub fn calls_for(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Forget recorded requests; scripts are kept.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn next_reply(&self, method: &str) -> Option<Reply> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(method)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcTransport for NullTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        self.requests.lock().unwrap().push(request.clone());

        match self.next_reply(&request.method) {
            Some(Reply::Response(mut response)) => {
                response.id = Some(Value::from(request.id));
                Ok(response)
            }
            Some(Reply::Failure(reason)) => Err(RpcError::Transport(reason)),
            None => Err(RpcError::Unreachable(format!(
                "no scripted reply for {}",
                request.method
            ))),
        }
    }
}
