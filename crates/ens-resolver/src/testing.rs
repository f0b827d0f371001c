//! In-memory chain client for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy_primitives::Address;
use async_trait::async_trait;
use eth_rpc_client::{BlockId, CallRequest, ProviderConfig};

use crate::client::{ChainClient, ClientFactory};
use crate::codec::Selector;
use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub(crate) to: Address,
    pub(crate) selector: Selector,
    pub(crate) block: Option<BlockId>,
}

/// Answers calls from a fixed script and records everything it is asked
pub(crate) struct ScriptedClient {
    chain_id: Result<u64, String>,
    responses: HashMap<(Address, Selector), Result<String, String>>,
    chain_id_calls: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub(crate) fn new(chain_id: u64) -> Self {
        Self {
            chain_id: Ok(chain_id),
            responses: HashMap::new(),
            chain_id_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_chain_id(message: &str) -> Self {
        Self {
            chain_id: Err(message.to_string()),
            ..Self::new(0)
        }
    }

    pub(crate) fn respond(mut self, to: Address, selector: Selector, raw: impl Into<String>) -> Self {
        self.responses.insert((to, selector), Ok(raw.into()));
        self
    }

    pub(crate) fn fail(mut self, to: Address, selector: Selector, message: &str) -> Self {
        self.responses.insert((to, selector), Err(message.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn chain_id_calls(&self) -> usize {
        self.chain_id_calls.load(Ordering::SeqCst)
    }

    /// Chain id lookups plus contract calls
    pub(crate) fn total_calls(&self) -> usize {
        self.chain_id_calls() + self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for ScriptedClient {
    async fn chain_id(&self) -> Result<u64, TransportError> {
        self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        self.chain_id.clone().map_err(Into::into)
    }

    async fn call(
        &self,
        request: CallRequest,
        block: Option<BlockId>,
    ) -> Result<String, TransportError> {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&request.data[..4]);
        self.calls.lock().unwrap().push(RecordedCall {
            to: request.to,
            selector,
            block,
        });

        match self.responses.get(&(request.to, selector)) {
            Some(Ok(raw)) => Ok(raw.clone()),
            Some(Err(message)) => Err(message.clone().into()),
            None => Err(format!("unscripted call to {}", request.to).into()),
        }
    }
}

/// Factory that hands out fresh scripted clients and counts connections
#[derive(Default)]
pub(crate) struct CountingFactory {
    connects: AtomicUsize,
}

impl CountingFactory {
    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl ClientFactory for CountingFactory {
    fn connect(&self, _config: &ProviderConfig) -> Result<Arc<dyn ChainClient>, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ScriptedClient::new(1)))
    }
}

/// A 32-byte return word with `hex_value` right-aligned
pub(crate) fn word(hex_value: &str) -> String {
    format!("0x{hex_value:0>64}")
}
