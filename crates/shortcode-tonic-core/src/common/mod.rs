pub mod error;
pub mod types;

pub use error::*;
pub use types::*;

/// Generated protobuf and gRPC bindings for the `shortcode` package.
pub mod proto {
    tonic::include_proto!("shortcode");

    /// Encoded file descriptor set for gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("shortcode_descriptor");
}
