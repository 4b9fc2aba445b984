use serde::{
	Deserialize,
	Serialize,
};
use web3::types::{
	Address,
	U256,
};

use crate::{
	deserializers::u256_from_number_or_str,
	serializers::u256_as_u64,
};

/// Lifecycle of a channel as the node reports it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelState {
	Open,
	Closed,
	Settled,
}

/// A channel as returned by the channels endpoints. The channel address is
/// the address of its netting contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Channel {
	pub channel_address: Address,
	pub partner_address: Address,
	pub token_address: Address,
	#[serde(deserialize_with = "u256_from_number_or_str", serialize_with = "u256_as_u64")]
	pub balance: U256,
	pub state: ChannelState,
	pub settle_timeout: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reveal_timeout: Option<u64>,
}

/// Body of `PUT /api/1/channels`.
#[derive(Clone, Debug, Serialize)]
pub struct OpenChannelRequest {
	pub partner_address: Address,
	pub token_address: Address,
	#[serde(serialize_with = "u256_as_u64")]
	pub balance: U256,
	pub settle_timeout: u64,
}

/// Body of the `PATCH` closing or settling a channel.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct StatePatch {
	pub state: ChannelState,
}

/// Body of the `PATCH` topping up a channel.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct BalancePatch {
	#[serde(serialize_with = "u256_as_u64")]
	pub balance: U256,
}

/// Body of `POST /api/1/transfers/{token}/{target}`.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct TransferRequest {
	#[serde(serialize_with = "u256_as_u64")]
	pub amount: U256,
}

/// A completed transfer as echoed back by the node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transfer {
	pub initiator_address: Address,
	pub target_address: Address,
	pub token_address: Address,
	#[serde(deserialize_with = "u256_from_number_or_str", serialize_with = "u256_as_u64")]
	pub amount: U256,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub identifier: Option<u64>,
}

/// Response of `GET /api/1/address`.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeAddress {
	pub our_address: Address,
}

/// Response of `PUT /api/1/tokens/{token}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisteredToken {
	pub channel_manager_address: Address,
}
