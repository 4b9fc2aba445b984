#![warn(clippy::missing_docs_in_private_items)]

/// Channel operations.
pub mod channels;
/// The Raiden node client.
pub mod client;
/// Field deserializers for the node's JSON.
pub mod deserializers;
/// Client errors.
pub mod errors;
/// Event queries.
pub mod events;
/// Field serializers for the node's JSON.
pub mod serializers;
/// Token registry operations.
pub mod tokens;
/// API payload types.
pub mod types;
/// URL helpers.
pub mod utils;
