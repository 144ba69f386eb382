// src/platform/mod.rs - Transport abstraction

pub mod native;
pub mod network;

pub use native::NativeNetwork;
pub use network::{
    HttpMethod, MultipartFile, NetworkArc, NetworkProvider, NetworkRequest, NetworkResponse,
    RequestBody,
};
