//! gRPC server reflection for ad-hoc tools such as `grpcurl`.
//!
//! Both protocol revisions are served; older tools still only speak
//! `grpc.reflection.v1alpha`.

use tonic_reflection::server::Builder;

use crate::proto::FILE_DESCRIPTOR_SET;

/// Reflection builder preloaded with the greeter descriptor set.
pub(super) fn builder() -> Builder<'static> {
    // ---
    Builder::configure().register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn descriptor_set_builds_both_revisions() {
        // ---
        assert!(builder().build_v1().is_ok());
        assert!(builder().build_v1alpha().is_ok());
    }
}
