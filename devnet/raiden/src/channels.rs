use reqwest::Method;
use web3::types::{
	Address,
	U256,
};

use crate::{
	client::RaidenClient,
	errors::ApiError,
	types::{
		BalancePatch,
		Channel,
		ChannelState,
		OpenChannelRequest,
		StatePatch,
	},
	utils::address_hex,
};

/// Operations on the node's payment channels. A channel is addressed by its
/// netting contract.
#[derive(Clone)]
pub struct ChannelsApi {
	client: RaidenClient,
}

impl ChannelsApi {
	pub(crate) fn new(client: RaidenClient) -> Self {
		Self { client }
	}

	/// All channels the node participates in which are not yet settled.
	pub async fn list(&self) -> Result<Vec<Channel>, ApiError> {
		self.client.get(self.client.api_url("channels")).await
	}

	pub async fn info(&self, channel: Address) -> Result<Channel, ApiError> {
		self.client.get(self.url(channel)).await
	}

	/// Our current balance in `channel`.
	pub async fn balance(&self, channel: Address) -> Result<U256, ApiError> {
		Ok(self.info(channel).await?.balance)
	}

	/// Open a channel with `partner` for `token`, depositing `balance`.
	pub async fn open(
		&self,
		partner: Address,
		token: Address,
		balance: U256,
		settle_timeout: u64,
	) -> Result<Channel, ApiError> {
		let body = OpenChannelRequest {
			partner_address: partner,
			token_address: token,
			balance,
			settle_timeout,
		};
		self.client
			.request(Method::PUT, self.client.api_url("channels"), Some(&body))
			.await
	}

	pub async fn close(&self, channel: Address) -> Result<Channel, ApiError> {
		self.patch_state(channel, ChannelState::Closed).await
	}

	pub async fn settle(&self, channel: Address) -> Result<Channel, ApiError> {
		self.patch_state(channel, ChannelState::Settled).await
	}

	/// Deposit further tokens into `channel`.
	pub async fn deposit(&self, channel: Address, amount: U256) -> Result<Channel, ApiError> {
		self.client
			.request(Method::PATCH, self.url(channel), Some(&BalancePatch { balance: amount }))
			.await
	}

	async fn patch_state(&self, channel: Address, state: ChannelState) -> Result<Channel, ApiError> {
		self.client
			.request(Method::PATCH, self.url(channel), Some(&StatePatch { state }))
			.await
	}

	fn url(&self, channel: Address) -> String {
		self.client.api_url(&format!("channels/{}", address_hex(&channel)))
	}
}
