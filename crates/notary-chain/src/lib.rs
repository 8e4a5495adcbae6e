//! notary-chain: notarización sobre una cadena EVM.
//!
//! Implementa `NotarizationClient` enviando `notarizeData(fingerprint)` como
//! transacción legacy firmada (EIP-155) vía JSON-RPC. La codificación ABI,
//! la transacción y la firma vienen de alloy; la red queda detrás de
//! `RpcTransport`.
pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod rpc;
pub mod signer;
pub mod tx;

pub use client::{EvmNotarizationClient, ReceiptStatus};
pub use config::{ChainConfig, Credentials, PrivateKey};
pub use error::{ConfigError, RpcError};
pub use rpc::{JsonRpcClient, RpcTransport, UreqTransport};
pub use signer::{address_hex, parse_address, signer_from_hex};
pub use tx::{legacy_call, sign_legacy, SignedTransaction};
