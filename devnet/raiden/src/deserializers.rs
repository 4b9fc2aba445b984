use serde::{
	de::Error,
	Deserialize,
	Deserializer,
};
use web3::types::U256;

/// The node sends token amounts as plain JSON numbers.
pub fn u256_from_u64<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
	D: Deserializer<'de>,
{
	let buf = u64::deserialize(deserializer)?;
	Ok(U256::from(buf))
}

/// Amounts which some node versions send as decimal strings instead.
pub fn u256_from_number_or_str<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	match value {
		serde_json::Value::Number(number) => {
			let number = number.as_u64().ok_or_else(|| D::Error::custom("Invalid amount"))?;
			Ok(U256::from(number))
		},
		serde_json::Value::String(text) =>
			U256::from_dec_str(&text).map_err(|_| D::Error::custom("Invalid amount")),
		_ => Err(D::Error::custom("Could not parse amount")),
	}
}
