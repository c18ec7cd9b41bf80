// src/client/mod.rs
//! Greeter RPC client.
//!
//! [`RpcClient`] wraps the generated `GreeterClient` stub around one eagerly
//! established connection. Calls are issued under a caller-supplied
//! [`Deadline`]; the remaining budget is sent to the server as the gRPC
//! timeout and also bounds the local wait, so an expired deadline surfaces as
//! [`RpcError::Timeout`] no matter which side notices first.
//!
//! There is no retry: every error is returned to the caller as-is.

mod args;
mod deadline;

use tokio::time;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Status};

use crate::correlation::CorrelationId;
use crate::domain::Greeting;
use crate::proto::greeter_client::GreeterClient;
use crate::proto::HelloRequest;
use crate::{log_debug, Result, RpcConfig, RpcError};

pub use args::greeted_name;
pub use deadline::Deadline;

/// Connected greeter client.
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct RpcClient {
    // ---
    stub: GreeterClient<Channel>,
}

impl RpcClient {
    // ---
    /// Dial `config.server_addr` and wait for the connection to come up.
    ///
    /// # Errors
    ///
    /// - `RpcError::InvalidAddress` if the address is not a valid URI
    /// - `RpcError::Connect` if the server cannot be reached within
    ///   `config.connect_timeout`
    pub async fn connect(config: &RpcConfig) -> Result<Self> {
        // ---
        let server_uri = config.server_uri();

        let endpoint = Endpoint::from_shared(server_uri.clone())
            .map_err(|_| RpcError::InvalidAddress(server_uri.clone()))?
            .connect_timeout(config.connect_timeout);

        let channel = endpoint.connect().await.map_err(RpcError::Connect)?;

        log_debug!("connected to {server_uri}");

        Ok(Self {
            stub: GreeterClient::new(channel),
        })
    }

    /// Call `SayHello`; returns the reply message.
    pub async fn say_hello(&mut self, name: &str, deadline: &Deadline) -> Result<String> {
        self.greet(Greeting::Hello, name, deadline).await
    }

    /// Call `SayHelloAgain`; returns the reply message.
    pub async fn say_hello_again(&mut self, name: &str, deadline: &Deadline) -> Result<String> {
        self.greet(Greeting::HelloAgain, name, deadline).await
    }

    /// Issue one greeting call under `deadline`.
    ///
    /// # Errors
    ///
    /// - `RpcError::Timeout` if the deadline has passed before the call is
    ///   sent, expires while waiting, or the server reports
    ///   `DEADLINE_EXCEEDED`
    /// - `RpcError::Status` for any other non-OK status
    pub async fn greet(
        &mut self,
        greeting: Greeting,
        name: &str,
        deadline: &Deadline,
    ) -> Result<String> {
        // ---
        let remaining = deadline.remaining();
        if remaining.is_zero() {
            log_debug!("{greeting} not sent: deadline already expired");
            return Err(RpcError::Timeout);
        }

        let mut request = Request::new(HelloRequest {
            name: name.to_string(),
        });
        request.set_timeout(remaining);

        let correlation_id = CorrelationId::generate();
        correlation_id.inject(request.metadata_mut());

        log_debug!("calling {greeting} (correlation_id: {correlation_id}, budget: {remaining:?})");

        let stub = &mut self.stub;
        let call = async move {
            match greeting {
                Greeting::Hello => stub.say_hello(request).await,
                Greeting::HelloAgain => stub.say_hello_again(request).await,
            }
        };

        let reply = time::timeout_at(deadline.instant(), call)
            .await
            .map_err(|_| RpcError::Timeout)?
            .map_err(status_error)?;

        Ok(reply.into_inner().message)
    }
}

/// Fold a server-side deadline into the same error as a local one.
fn status_error(status: Status) -> RpcError {
    // ---
    match status.code() {
        Code::DeadlineExceeded => RpcError::Timeout,
        _ => RpcError::Status(status),
    }
}
