//! Builds the gRPC client and server code for the `shortcode.proto`
//! definition using `tonic-prost-build`.
//!
//! The build also emits a file descriptor set into `OUT_DIR` so the server
//! can register gRPC reflection for the service.

use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("shortcode_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/shortcode.proto"], &["proto"])
        .unwrap();
}
