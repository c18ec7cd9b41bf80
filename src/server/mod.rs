//! Greeter RPC server.
//!
//! [`RpcServer`] owns a bound TCP listener and serves the `hello.Greeter`
//! service (plus reflection, unless disabled) on it until shut down. Binding
//! happens up front in [`RpcServer::bind`] so a failure to listen is reported
//! before anything is served, and so callers binding port `0` can learn the
//! real address through [`RpcServer::local_addr`].
//!
//! # Shutdown
//!
//! The serve loop runs until the process exits or a [`ShutdownHandle`]
//! obtained from [`RpcServer::shutdown_handle`] is triggered. Dropping every
//! handle without triggering it does **not** stop the server.

mod handler;
mod reflection;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::proto::greeter_server::GreeterServer;
use crate::{log_debug, log_info, Result, RpcConfig, RpcError};

pub use handler::GreeterService;

type ShutdownSlot = Arc<Mutex<Option<oneshot::Sender<()>>>>;

/// Acquire mutex guard, ignoring poisoning
fn lock_ignore_poison<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Cloneable trigger for a graceful server shutdown.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: ShutdownSlot,
}

impl ShutdownHandle {
    /// Stop accepting connections and let in-flight calls finish.
    ///
    /// Only the first call has an effect.
    pub fn shutdown(&self) {
        // ---
        let tx = lock_ignore_poison(&self.tx).take();
        if let Some(tx) = tx {
            let _ = tx.send(());
            log_info!("greeter server shutdown requested");
        }
    }
}

/// Bound, not yet serving, greeter server.
pub struct RpcServer {
    // ---
    listener: TcpListener,
    local_addr: SocketAddr,
    reflection: bool,
    shutdown_tx: ShutdownSlot,
    shutdown_rx: oneshot::Receiver<()>,
}

impl RpcServer {
    // ---
    /// Bind the listening socket described by `config.listen_addr`.
    ///
    /// # Errors
    ///
    /// - `RpcError::InvalidAddress` if `listen_addr` is not `ip:port`
    /// - `RpcError::Bind` if the socket cannot be bound (e.g. port in use)
    pub async fn bind(config: &RpcConfig) -> Result<Self> {
        // ---
        let addr = config.listen_socket_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RpcError::Bind { addr, source })?;

        let local_addr = listener
            .local_addr()
            .map_err(|source| RpcError::Bind { addr, source })?;

        log_debug!("greeter listener bound to {local_addr}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        Ok(Self {
            listener,
            local_addr,
            reflection: config.reflection,
            shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
            shutdown_rx,
        })
    }

    /// Address actually bound, with any ephemeral port resolved.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle that stops [`run`](Self::run) gracefully.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Serve until shutdown is requested.
    ///
    /// # Errors
    ///
    /// - `RpcError::Reflection` if the reflection service cannot be built
    /// - `RpcError::Serve` if the underlying transport fails
    pub async fn run(self) -> Result<()> {
        // ---
        let Self {
            listener,
            local_addr: _local_addr,
            reflection: with_reflection,
            shutdown_rx,
            ..
        } = self;

        let (reflection_v1, reflection_v1alpha) = if with_reflection {
            let v1 = reflection::builder()
                .build_v1()
                .map_err(|e| RpcError::Reflection(e.to_string()))?;
            let v1alpha = reflection::builder()
                .build_v1alpha()
                .map_err(|e| RpcError::Reflection(e.to_string()))?;
            (Some(v1), Some(v1alpha))
        } else {
            (None, None)
        };

        let signal = async move {
            // A dropped sender means nobody can ask for shutdown any more;
            // keep serving until the process is killed.
            if shutdown_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        log_debug!("serving hello.Greeter on {_local_addr} (reflection: {with_reflection})");

        Server::builder()
            .add_service(GreeterServer::new(GreeterService))
            .add_optional_service(reflection_v1)
            .add_optional_service(reflection_v1alpha)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
            .await
            .map_err(RpcError::Serve)?;

        log_debug!("greeter server on {_local_addr} stopped");
        Ok(())
    }

    /// Serve on a background task.
    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }
}
