use web3::types::Address;

/// Full-length lowercase hex with a `0x` prefix, for URL paths. `Address`'s
/// `Display` truncates the middle, which a URL cannot tolerate.
pub fn address_hex(address: &Address) -> String {
	format!("0x{}", hex::encode(address))
}

/// Append the optional `from_block` query the event endpoints accept.
pub(crate) fn with_from_block(path: String, from_block: Option<u64>) -> String {
	match from_block {
		Some(block) => format!("{}?from_block={}", path, block),
		None => path,
	}
}
