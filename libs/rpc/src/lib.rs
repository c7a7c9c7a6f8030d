//! Wire types for the inventory service.
//!
//! The protobuf sources live under `proto/`; the prost/tonic output is
//! checked in under `src/gen/` so builds do not depend on protoc.

mod gen;

pub use gen::inventory;
