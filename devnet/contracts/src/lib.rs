#![warn(clippy::missing_docs_in_private_items)]

/// Deployment primitives for the dev chain.
pub mod deploy;
/// Crate errors.
pub mod errors;
/// Read-only contract interfaces built from ABI descriptors.
pub mod interface;
/// Named-contract ABI registry.
pub mod registry;
/// Solidity compiler shell-out.
pub mod solc;
