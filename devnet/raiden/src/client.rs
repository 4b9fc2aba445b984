use reqwest::{
	Method,
	Url,
};
use serde::{
	de::DeserializeOwned,
	Serialize,
};
use tracing::debug;
use web3::types::{
	Address,
	U256,
};

use crate::{
	channels::ChannelsApi,
	errors::ApiError,
	events::EventsApi,
	tokens::TokensApi,
	types::{
		NodeAddress,
		Transfer,
		TransferRequest,
	},
	utils::address_hex,
};

/// REST API version prefix shared by every endpoint.
pub(crate) const API_PREFIX: &str = "api/1";

/// Client for one Raiden node's REST API. Cloning is cheap; clones share
/// the connection pool.
#[derive(Clone)]
pub struct RaidenClient {
	inner: reqwest::Client,
	host: String,
}

impl RaidenClient {
	/// `endpoint` is the node's REST endpoint, e.g. `http://127.0.0.1:5001`.
	pub fn new(endpoint: &str) -> Result<Self, ApiError> {
		Url::parse(endpoint).map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
		Ok(Self {
			inner: reqwest::Client::new(),
			host: endpoint.trim_end_matches('/').to_string(),
		})
	}

	pub fn channels(&self) -> ChannelsApi {
		ChannelsApi::new(self.clone())
	}

	pub fn tokens(&self) -> TokensApi {
		TokensApi::new(self.clone())
	}

	pub fn events(&self) -> EventsApi {
		EventsApi::new(self.clone())
	}

	/// The Ethereum account the node runs under.
	pub async fn address(&self) -> Result<Address, ApiError> {
		let response: NodeAddress = self.get(self.api_url("address")).await?;
		Ok(response.our_address)
	}

	/// Pay `target` through the `token` network.
	pub async fn transfer(
		&self,
		token: Address,
		target: Address,
		amount: U256,
	) -> Result<Transfer, ApiError> {
		let path = format!("transfers/{}/{}", address_hex(&token), address_hex(&target));
		self.request(Method::POST, self.api_url(&path), Some(&TransferRequest { amount }))
			.await
	}

	pub(crate) fn api_url(&self, path: &str) -> String {
		format!("{}/{}/{}", self.host, API_PREFIX, path)
	}

	pub(crate) async fn get<R>(&self, url: String) -> Result<R, ApiError>
	where
		R: DeserializeOwned,
	{
		self.request::<(), R>(Method::GET, url, None).await
	}

	/// One request, one result; HTTP failures and node error responses both
	/// surface here and nowhere else.
	pub(crate) async fn request<B, R>(
		&self,
		method: Method,
		url: String,
		body: Option<&B>,
	) -> Result<R, ApiError>
	where
		B: Serialize,
		R: DeserializeOwned,
	{
		debug!("{} {}", method, url);
		let mut request = self.inner.request(method, &url);
		if let Some(body) = body {
			request = request.json(body);
		}
		let response = request.send().await.map_err(ApiError::Connect)?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(ApiError::Node { status: status.as_u16(), message: error_text(&body) })
		}
		response
			.json()
			.await
			.map_err(|e| ApiError::InvalidResponse(e.to_string()))
	}
}

/// The node wraps error descriptions as `{"errors": "..."}`; fall back to
/// the raw body when it does not.
pub(crate) fn error_text(body: &str) -> String {
	serde_json::from_str::<serde_json::Value>(body)
		.ok()
		.and_then(|value| {
			value
				.get("errors")
				.and_then(|errors| errors.as_str())
				.map(ToString::to_string)
		})
		.unwrap_or_else(|| body.to_string())
}
