use std::net::SocketAddr;

use thiserror::Error;

/// Errors that can occur while serving or calling the greeter service
#[derive(Error, Debug)]
pub enum RpcError {
    /// The listening socket could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A configured address could not be parsed
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The client could not establish its connection
    #[error("connection failed: {0}")]
    Connect(#[source] tonic::transport::Error),

    /// The shared deadline expired before a reply arrived
    #[error("deadline exceeded")]
    Timeout,

    /// The call completed with a non-OK gRPC status
    #[error("rpc failed: {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    /// The server loop terminated with a transport error
    #[error("server error: {0}")]
    Serve(#[source] tonic::transport::Error),

    /// The reflection service could not be built from the descriptor set
    #[error("reflection setup failed: {0}")]
    Reflection(String),
}

/// Result type alias for greeter operations
pub type Result<T> = std::result::Result<T, RpcError>;
