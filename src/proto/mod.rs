//! Generated protobuf bindings for the `hello` package.
//!
//! Both message types and the `Greeter` client/server stubs are produced by
//! `build.rs`. The encoded file descriptor set feeds the reflection service.

#![allow(clippy::derive_partial_eq_without_eq)]

tonic::include_proto!("hello");

/// Encoded `FileDescriptorSet` for `proto/hello.proto`.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("hello_descriptor");

/// Fully qualified service name, as listed by reflection.
pub const GREETER_SERVICE_NAME: &str = "hello.Greeter";
