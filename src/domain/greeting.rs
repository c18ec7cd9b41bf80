// src/domain/greeting.rs

//! The two greetings offered by the service.
//!
//! Each variant owns its reply template, its RPC method name and the log
//! labels both ends print around it, so the client and server cannot drift
//! apart on any of them.

use std::fmt;

/// Name greeted when the client is given no argument.
pub const DEFAULT_NAME: &str = "world";

/// One of the two unary greeter operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Greeting {
    /// `SayHello`: replies `"Hello {name}"`.
    Hello,

    /// `SayHelloAgain`: replies `"Hello again {name}"`.
    HelloAgain,
}

impl Greeting {
    /// Both greetings, in the order the client issues them.
    pub const ALL: [Greeting; 2] = [Greeting::Hello, Greeting::HelloAgain];

    /// Apply the reply template to `name`. No validation; an empty name is
    /// greeted as-is.
    pub fn render(self, name: &str) -> String {
        // ---
        match self {
            Greeting::Hello => format!("Hello {name}"),
            Greeting::HelloAgain => format!("Hello again {name}"),
        }
    }

    /// RPC method name on `hello.Greeter`.
    pub fn method(self) -> &'static str {
        match self {
            Greeting::Hello => "SayHello",
            Greeting::HelloAgain => "SayHelloAgain",
        }
    }

    /// Prefix of the client's reply log line.
    pub fn log_label(self) -> &'static str {
        match self {
            Greeting::Hello => "Greeting",
            Greeting::HelloAgain => "Greeting again",
        }
    }

    /// Prefix of the client's fatal log line when this call fails.
    pub fn failure_context(self) -> &'static str {
        match self {
            Greeting::Hello => "could not greet",
            Greeting::HelloAgain => "could not greet again",
        }
    }

    /// Prefix of the server's log line for an incoming request.
    pub fn received_label(self) -> &'static str {
        match self {
            Greeting::Hello => "Received",
            Greeting::HelloAgain => "Received again",
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
