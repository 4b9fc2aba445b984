use derive_more::Display;
use thiserror::Error;

/// Errors surfaced by the REST client. Each failure is local to the call
/// that triggered it; nothing is retried.
#[derive(Error, Display, Debug)]
pub enum ApiError {
	#[display(fmt = "Invalid Raiden node endpoint: {}", _0)]
	InvalidEndpoint(String),
	#[display(fmt = "Could not connect to Raiden node: {}", _0)]
	Connect(reqwest::Error),
	#[display(fmt = "Malformed response from Raiden node: {}", _0)]
	InvalidResponse(String),
	#[display(fmt = "Raiden node returned {}: {}", status, message)]
	Node { status: u16, message: String },
}
