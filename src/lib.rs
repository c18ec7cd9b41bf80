//! Greeter RPC over gRPC: two unary greetings and server reflection.
//!
//! The library carries everything both binaries need: the generated
//! `hello.Greeter` bindings, the server that answers `SayHello` and
//! `SayHelloAgain`, and a client that issues both under one shared deadline.
//! Framing, HTTP/2 and connection management are left to `tonic`.
//!

// Import all sub modules once...
mod macros;
#[allow(unused_imports)]
pub(crate) use macros::{log_debug, log_error, log_info, log_warn};

mod client;
mod domain;
mod server;

pub mod proto;

mod rpc_config;

mod correlation;
mod error;

// Re-export main types
pub use client::{greeted_name, Deadline, RpcClient};
pub use server::{GreeterService, RpcServer, ShutdownHandle};

pub use rpc_config::{
    //
    RpcConfig,
    DEFAULT_LISTEN_ADDR,
    DEFAULT_SERVER_ADDR,
    LISTEN_ADDR_ENV,
    SERVER_ADDR_ENV,
};

pub use correlation::{CorrelationId, CORRELATION_HEADER};
pub use domain::{Greeting, DEFAULT_NAME};
pub use error::{Result, RpcError};
