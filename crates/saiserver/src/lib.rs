//! SAI RPC server.
//!
//! Exposes the switch abstraction interface of a vendor driver to remote
//! callers. Requests name an object verb and carry tagged attribute values;
//! the server converts them into the driver's native layout, makes one
//! driver call and converts the results back.
//!
//! # Architecture
//!
//! ```text
//! [client] ──JSON lines──> [server] ──> [rpc] ──> [codec] ──> [SaiDriver]
//!                                         │                       │
//!                                         └── [fdb cache] <── [notify]
//! ```
//!
//! # Key Components
//!
//! - [`schema::SchemaRegistry`]: attribute shape per object type
//! - [`codec::AttributeCodec`]: wire <-> native attribute conversion
//! - [`fdb::FdbEventCache`]: FDB entries learned from driver notifications
//! - [`context::SwitchContext`]: the bootstrapped switch and shared state
//! - [`rpc::SaiRpc`]: the handler surface, one method per operation
//! - [`server::RpcServer`]: JSON-lines transport

pub mod codec;
pub mod config;
pub mod context;
pub mod diag;
pub mod error;
pub mod fdb;
pub mod notify;
pub mod port_map;
pub mod profile;
pub mod rpc;
pub mod schema;
pub mod server;

pub use config::ServerConfig;
pub use context::SwitchContext;
pub use error::{Result, ServerError};
pub use rpc::SaiRpc;
pub use server::RpcServer;
