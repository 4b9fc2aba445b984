use thiserror::Error;

/// Errors raised while loading a contract definition.
#[derive(Error, Debug)]
pub enum ContractDefError {
	#[error("Contract JSON invalid: `{0}`")]
	InvalidJson(serde_json::Error),
	#[error("ABI parsing error: `{0}`")]
	ABI(ethabi::Error),
	#[error("Function descriptor has no name")]
	UnnamedFunction,
	#[error("Could not read ABI file `{0}`: {1}")]
	AbiFile(String, std::io::Error),
	#[error("Contract with identifier not found")]
	SpecNotFound,
}

impl From<serde_json::Error> for ContractDefError {
	fn from(e: serde_json::Error) -> Self {
		Self::InvalidJson(e)
	}
}

impl From<ethabi::Error> for ContractDefError {
	fn from(e: ethabi::Error) -> Self {
		Self::ABI(e)
	}
}

/// Errors raised when invoking a function on a contract interface.
#[derive(Error, Debug)]
pub enum InterfaceError {
	#[error("Unknown constant function `{0}`")]
	UnknownFunction(String),
	#[error("`{function}` takes {expected} argument(s), got {got}")]
	Arity {
		function: String,
		expected: usize,
		got: usize,
	},
	#[error("Arguments to `{0}` do not match its declared inputs")]
	ArgumentEncoding(String),
	#[error("`{0}` returned {1} value(s), expected one")]
	OutputCount(String, usize),
	#[error("ABI error: `{0}`")]
	ABI(ethabi::Error),
	#[error("Blockchain error: `{0}`")]
	Web3(web3::Error),
}

impl From<ethabi::Error> for InterfaceError {
	fn from(e: ethabi::Error) -> Self {
		Self::ABI(e)
	}
}

impl From<web3::Error> for InterfaceError {
	fn from(e: web3::Error) -> Self {
		Self::Web3(e)
	}
}

/// Errors raised by the compiler shell-out.
#[derive(Error, Debug)]
pub enum CompileError {
	#[error("Could not run solc: `{0}`")]
	Exec(std::io::Error),
	#[error("solc failed for `{0}`: {1}")]
	Solc(String, String),
	#[error("Compiler output invalid: `{0}`")]
	InvalidOutput(serde_json::Error),
	#[error("Compiler output has no entry for `{0}`")]
	MissingContract(String),
	#[error("Could not write ABI file `{0}`: {1}")]
	AbiFile(String, std::io::Error),
}

/// Errors raised by the deployment primitives.
#[derive(Error, Debug)]
pub enum DeployError {
	#[error("Blockchain error: `{0}`")]
	Web3(web3::Error),
	#[error("Node has no unlocked accounts")]
	NoAccounts,
	#[error("Deployment bytecode is not valid hex: `{0}`")]
	InvalidBytecode(hex::FromHexError),
	#[error("Transaction `{0:?}` was not mined in time")]
	ReceiptTimeout(web3::types::H256),
	#[error("Transaction `{0:?}` produced no contract address")]
	NoContractAddress(web3::types::H256),
}

impl From<web3::Error> for DeployError {
	fn from(e: web3::Error) -> Self {
		Self::Web3(e)
	}
}
