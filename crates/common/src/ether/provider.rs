//! Create a custom data transport to use with a Provider.
use alloy::{
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, Bytes},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{TransactionInput, TransactionRequest},
};
use async_trait::async_trait;
use eyre::Result;
use tracing::trace;

/// A read-only `eth_call` transport.
///
/// The multicall core talks to the chain exclusively through this trait, which keeps it
/// independent of the concrete provider and lets tests substitute an in-process chain.
#[async_trait]
pub trait EthCall: Send + Sync {
    /// Execute a message call against `to` with the given `input`, without creating a
    /// transaction. `block` pins the state the call executes against; `None` means latest.
    async fn eth_call(&self, to: Address, input: Bytes, block: Option<BlockId>) -> Result<Bytes>;
}

/// [`MultiTransportProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
#[derive(Clone, Debug)]
pub struct MultiTransportProvider {
    provider: RootProvider<Ethereum>,
}

// We implement a convenience "constructor" method, to easily initialize the transport.
// This will connect to `Http` if the rpc_url contains 'http', to `Ws` if it contains 'ws',
// otherwise it'll default to `Ipc`.
impl MultiTransportProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new().connect(rpc_url).await?.root().clone();
        Ok(Self { provider })
    }

    /// Get the chain id.
    pub async fn get_chainid(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }
}

#[async_trait]
impl EthCall for MultiTransportProvider {
    async fn eth_call(&self, to: Address, input: Bytes, block: Option<BlockId>) -> Result<Bytes> {
        trace!("eth_call to {} with {} bytes of input", to, input.len());

        let request = TransactionRequest::default().to(to).input(TransactionInput::new(input));
        let call = self.provider.call(request);
        let output = match block {
            Some(block) => call.block(block).await?,
            None => call.await?,
        };

        Ok(output)
    }
}
