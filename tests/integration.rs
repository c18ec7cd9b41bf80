use std::net::SocketAddr;
use std::time::Duration;

use tokio::task::JoinHandle;

use hello_rpc::{
    //
    greeted_name,
    Deadline,
    Greeting,
    Result,
    RpcClient,
    RpcConfig,
    RpcError,
    RpcServer,
    ShutdownHandle,
};

struct GreeterServer {
    // ---
    addr: SocketAddr,
    handle: JoinHandle<Result<()>>,
    shutdown: ShutdownHandle,
}

impl GreeterServer {
    // ---
    async fn start() -> Result<Self> {
        // ---
        let config = RpcConfig::default().with_listen_addr("127.0.0.1:0");
        let server = RpcServer::bind(&config).await?;
        let addr = server.local_addr();
        let shutdown = server.shutdown_handle();
        let handle = server.spawn();

        Ok(Self {
            addr,
            handle,
            shutdown,
        })
    }

    fn client_config(&self) -> RpcConfig {
        RpcConfig::default().with_server_addr(self.addr.to_string())
    }

    async fn shutdown(self) -> Result<()> {
        // ---
        self.shutdown.shutdown();

        // JoinError -> panic, inner Result -> ?
        self.handle.await.expect("server task panicked")?;

        Ok(())
    }
}

#[tokio::test]
async fn test_greets_ada() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;
    let config = server.client_config();
    let mut client = RpcClient::connect(&config).await?;

    let deadline = Deadline::after(config.request_timeout);
    let first = client.say_hello("Ada", &deadline).await?;
    let second = client.say_hello_again("Ada", &deadline).await?;

    assert_eq!(first, "Hello Ada");
    assert_eq!(second, "Hello again Ada");

    drop(client);
    server.shutdown().await
}

#[tokio::test]
async fn test_default_name_is_world() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;
    let mut client = RpcClient::connect(&server.client_config()).await?;

    let name = greeted_name(["greeter_client"]);
    let deadline = Deadline::after(Duration::from_secs(1));

    let mut messages = Vec::new();
    for greeting in Greeting::ALL {
        messages.push(client.greet(greeting, &name, &deadline).await?);
    }

    assert_eq!(messages, ["Hello world", "Hello again world"]);

    drop(client);
    server.shutdown().await
}

#[tokio::test]
async fn test_concurrent_clients() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;
    let client = RpcClient::connect(&server.client_config()).await?;

    let mut handles = Vec::new();

    for i in 0..10 {
        // ---
        let mut c = client.clone();

        handles.push(tokio::spawn(async move {
            let deadline = Deadline::after(Duration::from_secs(5));
            c.say_hello(&format!("caller-{i}"), &deadline).await
        }));
    }

    for (i, task) in handles.into_iter().enumerate() {
        // JoinError -> panic, inner Result -> ?
        let message = task.await.expect("client task panicked")?;
        assert_eq!(message, format!("Hello caller-{i}"));
    }

    drop(client);
    server.shutdown().await
}

#[tokio::test]
async fn test_unreachable_server_fails_to_connect() {
    // ---
    init_logging();

    // Reserve a free port, then release it so nothing is listening there.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let config = RpcConfig::default()
        .with_server_addr(addr.to_string())
        .with_connect_timeout(Duration::from_millis(500));

    let res = RpcClient::connect(&config).await;

    assert!(
        matches!(res, Err(RpcError::Connect(_))),
        "expected connect error, got {:?}",
        res.err()
    );
}

#[tokio::test]
async fn test_invalid_server_address() {
    // ---
    let config = RpcConfig::default().with_server_addr("not a uri");

    let res = RpcClient::connect(&config).await;

    assert!(matches!(res, Err(RpcError::InvalidAddress(_))));
}

#[tokio::test]
async fn test_shared_deadline_bars_second_call() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;
    let mut client = RpcClient::connect(&server.client_config()).await?;

    let deadline = Deadline::after(Duration::from_millis(300));

    let first = client.say_hello("Ada", &deadline).await?;
    assert_eq!(first, "Hello Ada");

    // Let the rest of the shared budget run out.
    tokio::time::sleep_until(deadline.instant() + Duration::from_millis(10)).await;

    let second = client.say_hello_again("Ada", &deadline).await;
    assert!(
        matches!(second, Err(RpcError::Timeout)),
        "expected timeout, got {second:?}"
    );

    drop(client);
    server.shutdown().await
}

#[tokio::test]
async fn test_deadline_expires_while_call_in_flight() -> Result<()> {
    // ---
    init_logging();

    // Accepts connections and holds them open without ever answering.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let config = RpcConfig::default()
        .with_server_addr(addr.to_string())
        .with_connect_timeout(Duration::from_millis(500));
    let mut client = RpcClient::connect(&config).await?;

    let deadline = Deadline::after(Duration::from_millis(200));
    let started = tokio::time::Instant::now();

    let res = client.say_hello("Ada", &deadline).await;

    assert!(
        matches!(res, Err(RpcError::Timeout)),
        "expected timeout, got {res:?}"
    );
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "call outlived its deadline: {:?}",
        started.elapsed()
    );

    silent.abort();
    Ok(())
}

#[tokio::test]
async fn test_bind_conflict_is_reported() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;

    let config = RpcConfig::default().with_listen_addr(server.addr.to_string());
    let res = RpcServer::bind(&config).await;

    match res {
        Err(RpcError::Bind { addr, .. }) => assert_eq!(addr, server.addr),
        Err(other) => panic!("expected bind error, got {other}"),
        Ok(_) => panic!("second bind on {} unexpectedly succeeded", server.addr),
    }

    server.shutdown().await
}

#[tokio::test]
async fn test_server_stops_on_shutdown() -> Result<()> {
    // ---
    init_logging();

    let server = GreeterServer::start().await?;
    let config = server
        .client_config()
        .with_connect_timeout(Duration::from_millis(500));

    server.shutdown().await?;

    let res = RpcClient::connect(&config).await;
    assert!(matches!(res, Err(RpcError::Connect(_))));

    Ok(())
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
