use web3::{
	types::Address,
	Web3,
};

use super::transport::TestTransport;
use crate::{
	errors::InterfaceError,
	interface::{
		ContractInterfaceBuilder,
		Token,
	},
};

/// ABI of the demo Token contract, trimmed to the shapes that matter:
/// constant functions, a state-mutating function and an event.
const TOKEN_ABI: &str = r#"[
	{"constant": true, "inputs": [{"name": "_owner", "type": "address"}], "name": "balanceOf", "outputs": [{"name": "balance", "type": "uint256"}], "payable": false, "type": "function"},
	{"constant": true, "inputs": [], "name": "totalSupply", "outputs": [{"name": "", "type": "uint256"}], "payable": false, "type": "function"},
	{"constant": false, "inputs": [{"name": "_to", "type": "address"}, {"name": "_value", "type": "uint256"}], "name": "transfer", "outputs": [{"name": "success", "type": "bool"}], "payable": false, "type": "function"},
	{"anonymous": false, "inputs": [{"indexed": true, "name": "_from", "type": "address"}, {"indexed": true, "name": "_to", "type": "address"}, {"indexed": false, "name": "_value", "type": "uint256"}], "name": "Transfer", "type": "event"}
]"#;

fn builder(transport: &TestTransport, abi: &str) -> ContractInterfaceBuilder<TestTransport> {
	ContractInterfaceBuilder::load(abi.as_bytes(), Web3::new(transport.clone()))
		.expect("Should load ABI")
}

fn encoded_uint(value: u64) -> jsonrpc_core::Value {
	let encoded = ethabi::encode(&[Token::Uint(value.into())]);
	jsonrpc_core::Value::String(format!("0x{}", hex::encode(encoded)))
}

#[test]
fn constant_functions_become_dispatch_entries() {
	let transport = TestTransport::default();
	let builder = builder(&transport, TOKEN_ABI);

	let mut names: Vec<&str> = builder.functions().map(|spec| spec.name()).collect();
	names.sort_unstable();

	assert_eq!(names, vec!["balanceOf", "totalSupply"]);
}

#[test]
fn state_mutability_classifies_modern_abis() {
	let abi = r#"[
		{"inputs": [], "name": "decimals", "outputs": [{"name": "", "type": "uint8"}], "stateMutability": "view", "type": "function"},
		{"inputs": [], "name": "version", "outputs": [{"name": "", "type": "string"}], "stateMutability": "pure", "type": "function"},
		{"inputs": [{"name": "spender", "type": "address"}, {"name": "value", "type": "uint256"}], "name": "approve", "outputs": [{"name": "", "type": "bool"}], "stateMutability": "nonpayable", "type": "function"}
	]"#;
	let transport = TestTransport::default();
	let builder = builder(&transport, abi);

	let mut names: Vec<&str> = builder.functions().map(|spec| spec.name()).collect();
	names.sort_unstable();

	assert_eq!(names, vec!["decimals", "version"]);
}

#[tokio::test]
async fn balance_of_issues_a_single_read_only_call() {
	let transport = TestTransport::default();
	transport.add_response(encoded_uint(1000));
	let token = builder(&transport, TOKEN_ABI).at(Address::from_low_u64_be(0xa1));

	let owner = Address::from_low_u64_be(0xb2);
	let result = token
		.call("balanceOf", &[Token::Address(owner)])
		.await
		.expect("Should resolve balance");
	assert_eq!(result, vec![Token::Uint(1000.into())]);

	let requests = transport.requests();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].0, "eth_call");
	assert!(requests.iter().all(|(method, _)| method != "eth_sendTransaction"));

	let data = requests[0].1[0]["data"].as_str().expect("Should carry call data");
	assert!(data.starts_with("0x70a08231"));
	assert!(data.contains(&hex::encode(owner)));
}

#[tokio::test]
async fn call_resolves_to_mocked_value() {
	let transport = TestTransport::default();
	transport.add_response(encoded_uint(42));
	let token = builder(&transport, TOKEN_ABI).at(Address::from_low_u64_be(0xa1));

	let supply = token
		.call_single("totalSupply", &[])
		.await
		.expect("Should resolve supply");

	assert_eq!(supply, Token::Uint(42.into()));
}

#[tokio::test]
async fn overload_keeps_the_last_declaration() {
	let abi = r#"[
		{"constant": true, "inputs": [{"name": "key", "type": "uint256"}], "name": "getValue", "outputs": [{"name": "", "type": "uint256"}], "type": "function"},
		{"constant": true, "inputs": [{"name": "owner", "type": "address"}, {"name": "key", "type": "uint256"}], "name": "getValue", "outputs": [{"name": "", "type": "uint256"}], "type": "function"}
	]"#;
	let transport = TestTransport::default();
	transport.add_response(encoded_uint(7));
	let contract = builder(&transport, abi).at(Address::from_low_u64_be(0xa1));

	assert_eq!(builder(&transport, abi).functions().count(), 1);

	// The two-argument overload was declared last; it owns the slot.
	let result = contract
		.call(
			"getValue",
			&[Token::Address(Address::from_low_u64_be(0xb2)), Token::Uint(1.into())],
		)
		.await
		.expect("Should resolve through the overload declared last");
	assert_eq!(result, vec![Token::Uint(7.into())]);

	let single = contract.call("getValue", &[Token::Uint(1.into())]).await;
	assert!(matches!(single, Err(InterfaceError::Arity { expected: 2, got: 1, .. })));
}

#[tokio::test]
async fn overload_order_is_declaration_order() {
	let abi = r#"[
		{"constant": true, "inputs": [{"name": "owner", "type": "address"}, {"name": "key", "type": "uint256"}], "name": "getValue", "outputs": [{"name": "", "type": "uint256"}], "type": "function"},
		{"constant": true, "inputs": [{"name": "key", "type": "uint256"}], "name": "getValue", "outputs": [{"name": "", "type": "uint256"}], "type": "function"}
	]"#;
	let transport = TestTransport::default();
	transport.add_response(encoded_uint(7));
	let contract = builder(&transport, abi).at(Address::from_low_u64_be(0xa1));

	let result = contract.call("getValue", &[Token::Uint(1.into())]).await;
	assert!(result.is_ok());

	let double = contract
		.call(
			"getValue",
			&[Token::Address(Address::from_low_u64_be(0xb2)), Token::Uint(1.into())],
		)
		.await;
	assert!(matches!(double, Err(InterfaceError::Arity { expected: 1, got: 2, .. })));
}

#[tokio::test]
async fn transport_failure_fails_only_that_call() {
	let transport = TestTransport::default();
	transport.add_error(web3::error::Error::Unreachable);
	transport.add_response(encoded_uint(99));
	let token = builder(&transport, TOKEN_ABI).at(Address::from_low_u64_be(0xa1));

	let failed = token.call("totalSupply", &[]).await;
	assert!(matches!(failed, Err(InterfaceError::Web3(_))));

	let second = token
		.call("totalSupply", &[])
		.await
		.expect("Should resolve after an unrelated failure");
	assert_eq!(second, vec![Token::Uint(99.into())]);
}

#[tokio::test]
async fn interfaces_share_nothing_but_the_connection() {
	let transport = TestTransport::default();
	transport.add_response(encoded_uint(1));
	transport.add_response(encoded_uint(2));
	let builder = builder(&transport, TOKEN_ABI);

	let first = builder.at(Address::from_low_u64_be(0xa1));
	let second = builder.at(Address::from_low_u64_be(0xa2));

	assert_eq!(
		first.call("totalSupply", &[]).await.expect("Should resolve"),
		vec![Token::Uint(1.into())]
	);
	assert_eq!(
		second.call("totalSupply", &[]).await.expect("Should resolve"),
		vec![Token::Uint(2.into())]
	);

	let requests = transport.requests();
	assert_eq!(requests.len(), 2);
	let targets: Vec<&str> = requests
		.iter()
		.map(|(_, params)| params[0]["to"].as_str().expect("Should carry an address"))
		.collect();
	let expected = vec![
		format!("0x{}", hex::encode(first.address())),
		format!("0x{}", hex::encode(second.address())),
	];
	assert_eq!(targets, expected);
}

#[tokio::test]
async fn bad_invocations_never_reach_the_node() {
	let transport = TestTransport::default();
	let token = builder(&transport, TOKEN_ABI).at(Address::from_low_u64_be(0xa1));

	let unknown = token.call("transfer", &[]).await;
	assert!(matches!(unknown, Err(InterfaceError::UnknownFunction(_))));

	let missing = token.call("balanceOf", &[]).await;
	assert!(matches!(missing, Err(InterfaceError::Arity { .. })));

	let mistyped = token.call("balanceOf", &[Token::Uint(1.into())]).await;
	assert!(matches!(mistyped, Err(InterfaceError::ArgumentEncoding(_))));

	assert!(transport.requests().is_empty());
}

#[test]
fn malformed_abi_is_a_build_error() {
	let transport = TestTransport::default();
	let result = ContractInterfaceBuilder::load(b"not json", Web3::new(transport));
	assert!(result.is_err());
}
