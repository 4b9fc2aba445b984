use std::{
	collections::HashMap,
	fs,
	path::Path,
	sync::Arc,
};

pub use ethabi::Token;
use ethabi::{
	param_type::{
		Reader,
		Writer,
	},
	ParamType,
};
use serde::Deserialize;
use tiny_keccak::{
	Hasher,
	Keccak,
};
use web3::{
	types::{
		Address,
		Bytes,
		CallRequest,
	},
	Transport,
	Web3,
};

use crate::errors::{
	ContractDefError,
	InterfaceError,
};

/// A single entry of an ABI descriptor, as solc emits it. Non-function
/// entries (constructor, fallback, events) carry a different `type` tag and
/// are never turned into dispatch entries.
#[derive(Deserialize)]
struct AbiEntry {
	#[serde(rename = "type")]
	kind: Option<String>,
	name: Option<String>,
	#[serde(default)]
	constant: bool,
	#[serde(rename = "stateMutability")]
	state_mutability: Option<String>,
	#[serde(default)]
	inputs: Vec<AbiParam>,
	#[serde(default)]
	outputs: Vec<AbiParam>,
}

/// One parameter of a function descriptor. The name is optional in the ABI
/// and irrelevant here: arguments are positional.
#[derive(Deserialize)]
struct AbiParam {
	#[serde(rename = "type")]
	kind: String,
}

impl AbiEntry {
	/// Whether this entry describes a function which can be evaluated with a
	/// simulated call. Pre-0.4.16 solc marks these `constant`; later
	/// releases use `stateMutability`.
	fn is_constant_function(&self) -> bool {
		let is_function = matches!(self.kind.as_deref(), None | Some("function"));
		let read_only =
			self.constant || matches!(self.state_mutability.as_deref(), Some("view") | Some("pure"));
		is_function && read_only && self.name.is_some()
	}
}

/// Invocation descriptor for one read-only contract function: everything
/// needed to encode a call and decode its result.
#[derive(Clone)]
pub struct FunctionSpec {
	name: String,
	selector: [u8; 4],
	inputs: Vec<ParamType>,
	outputs: Vec<ParamType>,
}

impl FunctionSpec {
	fn from_entry(entry: &AbiEntry) -> Result<Self, ContractDefError> {
		let name = entry.name.clone().ok_or(ContractDefError::UnnamedFunction)?;
		let inputs = entry
			.inputs
			.iter()
			.map(|param| Reader::read(&param.kind))
			.collect::<Result<Vec<_>, _>>()?;
		let outputs = entry
			.outputs
			.iter()
			.map(|param| Reader::read(&param.kind))
			.collect::<Result<Vec<_>, _>>()?;

		let signature = format!(
			"{}({})",
			name,
			inputs.iter().map(Writer::write).collect::<Vec<_>>().join(",")
		);

		Ok(Self { name, selector: selector(&signature), inputs, outputs })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn arity(&self) -> usize {
		self.inputs.len()
	}

	/// Selector followed by the ABI-encoded arguments.
	fn encode_call(&self, params: &[Token]) -> Result<Vec<u8>, InterfaceError> {
		if params.len() != self.inputs.len() {
			return Err(InterfaceError::Arity {
				function: self.name.clone(),
				expected: self.inputs.len(),
				got: params.len(),
			})
		}
		if !Token::types_check(params, &self.inputs) {
			return Err(InterfaceError::ArgumentEncoding(self.name.clone()))
		}
		let mut data = self.selector.to_vec();
		data.extend(ethabi::encode(params));
		Ok(data)
	}

	fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, InterfaceError> {
		ethabi::decode(&self.outputs, data).map_err(Into::into)
	}
}

/// First four bytes of the keccak256 hash of a canonical function signature.
fn selector(signature: &str) -> [u8; 4] {
	let mut hasher = Keccak::v256();
	hasher.update(signature.as_bytes());
	let mut output = [0u8; 32];
	hasher.finalize(&mut output);
	let mut selector = [0u8; 4];
	selector.copy_from_slice(&output[..4]);
	selector
}

/// Builds [`ContractInterface`]s from an ABI descriptor.
///
/// The descriptor is parsed once into a dispatch table holding one
/// [`FunctionSpec`] per read-only function; state-mutating functions are not
/// exposed at all. Transactions belong on an explicit sending path, not
/// behind an interface whose whole point is gas-free querying.
///
/// Two read-only functions may share a name with different arities. The
/// table keeps a single slot per name, so the later declaration replaces the
/// earlier one.
pub struct ContractInterfaceBuilder<T: Transport> {
	web3: Web3<T>,
	functions: Arc<HashMap<String, FunctionSpec>>,
}

impl<T: Transport> ContractInterfaceBuilder<T> {
	pub fn load(abi: &[u8], web3: Web3<T>) -> Result<Self, ContractDefError> {
		let entries: Vec<AbiEntry> = serde_json::from_slice(abi)?;

		let mut functions = HashMap::new();
		for entry in entries.iter().filter(|entry| entry.is_constant_function()) {
			let spec = FunctionSpec::from_entry(entry)?;
			functions.insert(spec.name.clone(), spec);
		}

		Ok(Self { web3, functions: Arc::new(functions) })
	}

	pub fn from_file(path: impl AsRef<Path>, web3: Web3<T>) -> Result<Self, ContractDefError> {
		let path = path.as_ref();
		let abi = fs::read(path)
			.map_err(|e| ContractDefError::AbiFile(path.display().to_string(), e))?;
		Self::load(&abi, web3)
	}

	/// Bind the dispatch table to a deployed contract's address. Instances
	/// share the table and the underlying connection; nothing else.
	pub fn at(&self, address: Address) -> ContractInterface<T> {
		ContractInterface {
			address,
			web3: self.web3.clone(),
			functions: self.functions.clone(),
		}
	}

	pub fn functions(&self) -> impl Iterator<Item = &FunctionSpec> {
		self.functions.values()
	}
}

/// A contract interface bound to one address: a dispatch table of read-only
/// functions over a shared chain connection. It owns no other state.
#[derive(Clone)]
pub struct ContractInterface<T: Transport> {
	address: Address,
	web3: Web3<T>,
	functions: Arc<HashMap<String, FunctionSpec>>,
}

impl<T: Transport> ContractInterface<T> {
	pub fn address(&self) -> Address {
		self.address
	}

	/// Invoke a read-only function by name with positional arguments in
	/// ABI-declared order. Goes through the connection's `eth_call` path,
	/// never `eth_sendTransaction`, and decodes the returned words into
	/// tokens. Failures are local to this call.
	pub async fn call(&self, function: &str, params: &[Token]) -> Result<Vec<Token>, InterfaceError> {
		let spec = self
			.functions
			.get(function)
			.ok_or_else(|| InterfaceError::UnknownFunction(function.to_string()))?;
		let data = spec.encode_call(params)?;

		let request = CallRequest {
			to: Some(self.address),
			data: Some(Bytes(data)),
			..Default::default()
		};
		let output = self.web3.eth().call(request, None).await?;

		spec.decode_output(&output.0)
	}

	/// As [`call`](Self::call), for functions returning exactly one value.
	pub async fn call_single(&self, function: &str, params: &[Token]) -> Result<Token, InterfaceError> {
		let mut tokens = self.call(function, params).await?;
		if tokens.len() != 1 {
			return Err(InterfaceError::OutputCount(function.to_string(), tokens.len()))
		}
		Ok(tokens.remove(0))
	}
}
