use reqwest::Method;
use web3::types::Address;

use crate::{
	client::RaidenClient,
	errors::ApiError,
	types::RegisteredToken,
	utils::address_hex,
};

/// Operations on the token registry.
#[derive(Clone)]
pub struct TokensApi {
	client: RaidenClient,
}

impl TokensApi {
	pub(crate) fn new(client: RaidenClient) -> Self {
		Self { client }
	}

	/// Addresses of all registered tokens.
	pub async fn list(&self) -> Result<Vec<Address>, ApiError> {
		self.client.get(self.client.api_url("tokens")).await
	}

	/// Register `token`, creating its channel manager.
	pub async fn register(&self, token: Address) -> Result<RegisteredToken, ApiError> {
		let url = self.client.api_url(&format!("tokens/{}", address_hex(&token)));
		self.client.request::<(), _>(Method::PUT, url, None).await
	}
}
