//! JSON-lines RPC transport over TCP.
//!
//! Each line a client sends is one [`Request`]; the server answers every
//! line with exactly one [`Response`] line, in order. Connections are
//! served concurrently and handler calls run on the blocking pool, since
//! driver calls may block.

use crate::error::Result;
use crate::notify::ShutdownSignal;
use crate::rpc::{dispatch, Request, Response, SaiRpc};
use log::{debug, error, info, warn};
use sai_native::SaiStatus;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// The bound listener and the handler surface it serves.
pub struct RpcServer {
    listener: TcpListener,
    rpc: SaiRpc,
}

impl RpcServer {
    pub async fn bind(address: &str, rpc: SaiRpc) -> Result<Self> {
        let listener = TcpListener::bind(address).await?;
        info!("RPC server listening on {}", listener.local_addr()?);
        Ok(Self { listener, rpc })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections until `shutdown` is requested.
    pub async fn run(self, shutdown: Arc<ShutdownSignal>) -> Result<()> {
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            debug!("Accepted connection from {}", peer);
                            let rpc = self.rpc.clone();
                            tokio::spawn(async move {
                                if let Err(e) = serve_connection(rpc, stream).await {
                                    warn!("Connection {} closed with error: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => error!("Failed to accept connection: {}", e),
                    }
                }
                _ = shutdown.wait() => {
                    info!("RPC server stopping");
                    return Ok(());
                }
            }
        }
    }
}

async fn serve_connection(rpc: SaiRpc, stream: TcpStream) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let rpc = rpc.clone();
                match tokio::task::spawn_blocking(move || dispatch(&rpc, &request)).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!("Handler task failed: {}", e);
                        Response {
                            status: SaiStatus::FAILURE.as_raw(),
                            result: json!({ "error": e.to_string() }),
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Malformed request: {}", e);
                Response {
                    status: SaiStatus::INVALID_PARAMETER.as_raw(),
                    result: json!({ "error": format!("malformed request: {}", e) }),
                }
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
    }
    Ok(())
}
