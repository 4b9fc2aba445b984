use web3::types::Address;

use crate::utils::{
	address_hex,
	with_from_block,
};

#[test]
fn addresses_render_full_length_for_urls() {
	let address: Address = "9aab3f75489902f3a48495025729a0af77d4b11e".parse().unwrap();
	let rendered = address_hex(&address);
	assert_eq!(rendered, "0x9aab3f75489902f3a48495025729a0af77d4b11e");
	assert_eq!(rendered.len(), 42);
}

#[test]
fn from_block_is_an_optional_query() {
	let path = "http://localhost:5001/api/1/events/network".to_string();
	assert_eq!(with_from_block(path.clone(), None), path);
	assert_eq!(
		with_from_block(path, Some(1337)),
		"http://localhost:5001/api/1/events/network?from_block=1337"
	);
}
