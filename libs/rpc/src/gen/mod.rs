// @generated
// This file wires up the prost-generated protobuf code.
// Note: The prost files already include!() the tonic files automatically

pub mod inventory {
    include!("inventory.v1.rs");
    // inventory.v1.tonic.rs is auto-included by inventory.v1.rs
}
