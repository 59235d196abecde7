//! Client module - RPC connection setup and the SDK client handle.

pub mod connection;
pub mod sdk_client;

pub use connection::ConnectionManager;
pub use sdk_client::{ThreeiumClient, ThreeiumClientInit, Wallet};
