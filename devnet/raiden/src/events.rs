use web3::types::Address;

use crate::{
	client::RaidenClient,
	errors::ApiError,
	utils::{
		address_hex,
		with_from_block,
	},
};

/// Queries over the node's event feeds. Event payloads vary by type, so
/// they stay raw JSON.
#[derive(Clone)]
pub struct EventsApi {
	client: RaidenClient,
}

impl EventsApi {
	pub(crate) fn new(client: RaidenClient) -> Self {
		Self { client }
	}

	/// Registry-level events, optionally starting from `from_block`.
	pub async fn network(&self, from_block: Option<u64>) -> Result<Vec<serde_json::Value>, ApiError> {
		let url = with_from_block(self.client.api_url("events/network"), from_block);
		self.client.get(url).await
	}

	/// Events concerning `token`'s channel manager.
	pub async fn token(
		&self,
		token: Address,
		from_block: Option<u64>,
	) -> Result<Vec<serde_json::Value>, ApiError> {
		let path = format!("events/tokens/{}", address_hex(&token));
		let url = with_from_block(self.client.api_url(&path), from_block);
		self.client.get(url).await
	}

	/// Events concerning a single channel.
	pub async fn channel(
		&self,
		channel: Address,
		from_block: Option<u64>,
	) -> Result<Vec<serde_json::Value>, ApiError> {
		let path = format!("events/channels/{}", address_hex(&channel));
		let url = with_from_block(self.client.api_url(&path), from_block);
		self.client.get(url).await
	}
}
