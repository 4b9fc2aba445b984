use serde::Serializer;
use web3::types::U256;

/// The node expects token amounts as plain JSON numbers.
pub fn u256_as_u64<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_u64(value.low_u64())
}
