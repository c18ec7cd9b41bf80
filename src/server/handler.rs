use tonic::{Request, Response, Status};

use crate::correlation::CorrelationId;
use crate::domain::Greeting;
use crate::log_info;
use crate::proto::greeter_server::Greeter;
use crate::proto::{HelloReply, HelloRequest};

/// Stateless implementation of the generated `Greeter` service.
///
/// Every request is answered; the only failures a caller can see come from
/// the framework (transport errors, deadlines).
#[derive(Debug, Default, Clone, Copy)]
pub struct GreeterService;

impl GreeterService {
    // ---
    fn reply(greeting: Greeting, request: Request<HelloRequest>) -> Response<HelloReply> {
        // ---
        let correlation_id = CorrelationId::extract(request.metadata());
        let name = request.into_inner().name;

        match correlation_id {
            Some(_id) => {
                log_info!("{}: {name} (correlation_id: {_id})", greeting.received_label());
            }
            None => {
                log_info!("{}: {name}", greeting.received_label());
            }
        }

        Response::new(HelloReply {
            message: greeting.render(&name),
        })
    }
}

#[async_trait::async_trait]
impl Greeter for GreeterService {
    // ---
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> std::result::Result<Response<HelloReply>, Status> {
        Ok(Self::reply(Greeting::Hello, request))
    }

    async fn say_hello_again(
        &self,
        request: Request<HelloRequest>,
    ) -> std::result::Result<Response<HelloReply>, Status> {
        Ok(Self::reply(Greeting::HelloAgain, request))
    }
}
