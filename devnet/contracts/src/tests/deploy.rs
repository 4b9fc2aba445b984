use serde_json::json;
use web3::{
	types::{
		Address,
		U256,
	},
	Web3,
};

use super::transport::TestTransport;
use crate::{
	deploy::Deployer,
	errors::DeployError,
	solc::CompiledContract,
};

const HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn receipt(contract_address: Option<&str>) -> serde_json::Value {
	json!({
		"transactionHash": HASH,
		"transactionIndex": "0x0",
		"blockHash": "0x8e38b4dbf6b11fcc3b9dee84fb7986e29ca0a02cecd8977c161ff7333329681e",
		"blockNumber": "0x1",
		"from": "0x19e7e376e7c213b7e7e7e46cc70a5dd086daff2a",
		"to": null,
		"cumulativeGasUsed": "0x33bc",
		"gasUsed": "0x33bc",
		"contractAddress": contract_address,
		"logs": [],
		"status": "0x1",
		"logsBloom": format!("0x{}", "00".repeat(256)),
		"effectiveGasPrice": "0x1",
	})
}

fn compiled() -> CompiledContract {
	CompiledContract {
		name: "Token".to_string(),
		abi: b"[]".to_vec(),
		bytecode: "6060604052".to_string(),
	}
}

#[tokio::test]
async fn dev_account_is_the_first_unlocked_account() {
	let transport = TestTransport::default();
	transport.add_response(json!(["0x19e7e376e7c213b7e7e7e46cc70a5dd086daff2a"]));
	let web3 = Web3::new(transport);

	let account = Deployer::dev_account(&web3).await.expect("Should find the account");
	assert_eq!(account, "19e7e376e7c213b7e7e7e46cc70a5dd086daff2a".parse().unwrap());
}

#[tokio::test]
async fn a_node_without_accounts_is_an_error() {
	let transport = TestTransport::default();
	transport.add_response(json!([]));
	let web3 = Web3::new(transport);

	let result = Deployer::dev_account(&web3).await;
	assert!(matches!(result, Err(DeployError::NoAccounts)));
}

#[tokio::test]
async fn deploy_sends_bytecode_and_returns_the_contract_address() {
	let transport = TestTransport::default();
	transport.add_response(json!(HASH));
	transport.add_response(receipt(Some("0x600197b8b80e4bcb2a8f8014e046e92eb2bef219")));
	let web3 = Web3::new(transport.clone());

	let deployer = Deployer::new(web3, Address::from_low_u64_be(0x01));
	let address = deployer.deploy(&compiled()).await.expect("Should deploy");
	assert_eq!(address, "600197b8b80e4bcb2a8f8014e046e92eb2bef219".parse().unwrap());

	let requests = transport.requests();
	assert_eq!(requests[0].0, "eth_sendTransaction");
	assert_eq!(requests[0].1[0]["data"], "0x6060604052");
	assert_eq!(requests[0].1[0]["gas"], "0x2dc6c0");
	assert_eq!(requests[0].1[0]["to"], json!(null));
	assert_eq!(requests[1].0, "eth_getTransactionReceipt");
}

#[tokio::test]
async fn a_receipt_without_contract_address_is_an_error() {
	let transport = TestTransport::default();
	transport.add_response(json!(HASH));
	transport.add_response(receipt(None));
	let web3 = Web3::new(transport);

	let deployer = Deployer::new(web3, Address::from_low_u64_be(0x01));
	let result = deployer.deploy(&compiled()).await;
	assert!(matches!(result, Err(DeployError::NoContractAddress(_))));
}

#[tokio::test]
async fn transfer_ether_moves_value_with_plain_gas() {
	let transport = TestTransport::default();
	transport.add_response(json!(HASH));
	transport.add_response(receipt(None));
	let web3 = Web3::new(transport.clone());

	let deployer = Deployer::new(web3, Address::from_low_u64_be(0x01));
	let to = Address::from_low_u64_be(0x02);
	deployer
		.transfer_ether(to, U256::exp10(18))
		.await
		.expect("Should transfer");

	let requests = transport.requests();
	assert_eq!(requests[0].0, "eth_sendTransaction");
	assert_eq!(requests[0].1[0]["gas"], "0x5208");
	assert_eq!(requests[0].1[0]["value"], "0xde0b6b3a7640000");
	assert_eq!(requests[0].1[0]["to"], json!(format!("0x{}", hex::encode(to))));
}

#[tokio::test]
async fn invalid_bytecode_is_rejected_before_sending() {
	let transport = TestTransport::default();
	let web3 = Web3::new(transport.clone());

	let deployer = Deployer::new(web3, Address::from_low_u64_be(0x01));
	let broken = CompiledContract {
		name: "Token".to_string(),
		abi: b"[]".to_vec(),
		bytecode: "not-hex".to_string(),
	};

	let result = deployer.deploy(&broken).await;
	assert!(matches!(result, Err(DeployError::InvalidBytecode(_))));
	assert!(transport.requests().is_empty());
}
