use std::time::Duration;

use tracing::debug;
use web3::{
	types::{
		Address,
		Bytes,
		TransactionReceipt,
		TransactionRequest,
		H256,
		U256,
	},
	Transport,
	Web3,
};

use crate::{
	errors::DeployError,
	solc::CompiledContract,
};

/// Gas budget for a contract-creation transaction.
const DEPLOY_GAS: u64 = 3_000_000;
/// Gas for a plain value transfer.
const TRANSFER_GAS: u64 = 21_000;
/// How often to ask the node for a transaction receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// How many times to ask before giving up on a transaction.
const RECEIPT_POLL_ATTEMPTS: usize = 60;

/// Sends contract-creation and value-transfer transactions from the dev
/// node's unlocked account. The node signs; no key material lives here.
pub struct Deployer<T: Transport> {
	web3: Web3<T>,
	from: Address,
}

impl<T: Transport> Deployer<T> {
	/// `geth --dev` pre-configures and pre-funds exactly one unlocked
	/// account. Find it.
	pub async fn dev_account(web3: &Web3<T>) -> Result<Address, DeployError> {
		let accounts = web3.eth().accounts().await?;
		accounts.first().copied().ok_or(DeployError::NoAccounts)
	}

	pub fn new(web3: Web3<T>, from: Address) -> Self {
		Self { web3, from }
	}

	pub fn account(&self) -> Address {
		self.from
	}

	/// Deploy `contract`'s bytecode and return the new contract's address.
	pub async fn deploy(&self, contract: &CompiledContract) -> Result<Address, DeployError> {
		let data = hex::decode(contract.bytecode.trim()).map_err(DeployError::InvalidBytecode)?;

		let request = TransactionRequest {
			from: self.from,
			data: Some(Bytes(data)),
			gas: Some(DEPLOY_GAS.into()),
			..Default::default()
		};
		let transaction_hash = self.web3.eth().send_transaction(request).await?;
		debug!("Deployment of {} sent: {:?}", contract.name, transaction_hash);

		let receipt = self.wait_for_receipt(transaction_hash).await?;
		receipt
			.contract_address
			.ok_or(DeployError::NoContractAddress(transaction_hash))
	}

	/// Transfer `amount` wei from the dev account to `to`.
	pub async fn transfer_ether(&self, to: Address, amount: U256) -> Result<TransactionReceipt, DeployError> {
		debug!("Transferring {} wei from {:?} to {:?}", amount, self.from, to);

		let request = TransactionRequest {
			from: self.from,
			to: Some(to),
			value: Some(amount),
			gas: Some(TRANSFER_GAS.into()),
			..Default::default()
		};
		let transaction_hash = self.web3.eth().send_transaction(request).await?;

		self.wait_for_receipt(transaction_hash).await
	}

	pub async fn balance(&self, account: Address) -> Result<U256, DeployError> {
		self.web3.eth().balance(account, None).await.map_err(Into::into)
	}

	async fn wait_for_receipt(&self, transaction_hash: H256) -> Result<TransactionReceipt, DeployError> {
		for _ in 0..RECEIPT_POLL_ATTEMPTS {
			if let Some(receipt) = self.web3.eth().transaction_receipt(transaction_hash).await? {
				return Ok(receipt)
			}
			tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
		}
		Err(DeployError::ReceiptTimeout(transaction_hash))
	}
}
