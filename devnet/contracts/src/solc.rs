use std::{
	fmt,
	fs,
	path::{
		Path,
		PathBuf,
	},
	process::Command,
};

use serde_json::Value;
use tracing::debug;
use web3::types::Address;

use crate::errors::CompileError;

/// Link-time reference to an already deployed library contract, in solc's
/// `Name:0xaddress` form.
pub struct LibraryRef {
	name: String,
	address: Address,
}

impl LibraryRef {
	pub fn new(name: &str, address: Address) -> Self {
		Self { name: name.to_string(), address }
	}
}

impl fmt::Display for LibraryRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:0x{}", self.name, hex::encode(self.address))
	}
}

/// A contract compiled to deployable bytecode, with its ABI.
pub struct CompiledContract {
	pub name: String,
	/// The ABI descriptor as JSON, exactly as written to the ABI directory.
	pub abi: Vec<u8>,
	/// Hex bytecode, without a `0x` prefix, libraries already linked.
	pub bytecode: String,
}

/// Shells out to a `solc` binary and collects its combined JSON output.
pub struct Compiler {
	solc: PathBuf,
	abi_dir: PathBuf,
}

impl Compiler {
	/// Creates the ABI output directory if it does not exist yet.
	pub fn new(solc: PathBuf, abi_dir: PathBuf) -> Result<Self, CompileError> {
		fs::create_dir_all(&abi_dir)
			.map_err(|e| CompileError::AbiFile(abi_dir.display().to_string(), e))?;
		Ok(Self { solc, abi_dir })
	}

	/// Compile `<name>.sol` found in `source_dir`, linking `libraries`.
	/// Writes the contract's ABI to `<abi_dir>/<name>.json` as a side
	/// effect.
	pub fn compile(
		&self,
		source_dir: &Path,
		name: &str,
		libraries: &[LibraryRef],
	) -> Result<CompiledContract, CompileError> {
		let mut command = Command::new(&self.solc);
		command.current_dir(source_dir).arg("--combined-json").arg("bin,abi");
		if !libraries.is_empty() {
			let link_argument = link_argument(libraries);
			debug!("Linking {} with: {}", name, link_argument);
			command.arg("--libraries").arg(link_argument);
		}
		command.arg(format!("{}.sol", name));

		let output = command.output().map_err(CompileError::Exec)?;
		if !output.status.success() {
			return Err(CompileError::Solc(
				name.to_string(),
				String::from_utf8_lossy(&output.stderr).into_owned(),
			))
		}

		let contract = parse_combined_json(&output.stdout, name)?;

		let abi_file = self.abi_dir.join(format!("{}.json", name));
		fs::write(&abi_file, &contract.abi)
			.map_err(|e| CompileError::AbiFile(abi_file.display().to_string(), e))?;
		debug!("ABI for {}.sol written to {}", name, abi_file.display());

		Ok(contract)
	}
}

/// Space-separated list solc expects after `--libraries`.
pub(crate) fn link_argument(libraries: &[LibraryRef]) -> String {
	libraries.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Extract one contract's ABI and bytecode from solc's `--combined-json
/// bin,abi` output. Contracts are keyed `<Name>.sol:<Name>`; the ABI value
/// is a JSON string in older solc releases and an inline array in newer
/// ones.
pub(crate) fn parse_combined_json(stdout: &[u8], name: &str) -> Result<CompiledContract, CompileError> {
	let combined: Value = serde_json::from_slice(stdout).map_err(CompileError::InvalidOutput)?;
	let key = format!("{}.sol:{}", name, name);
	let entry = combined
		.get("contracts")
		.and_then(|contracts| contracts.get(key.as_str()))
		.ok_or_else(|| CompileError::MissingContract(key.clone()))?;

	let abi = match entry.get("abi") {
		Some(Value::String(abi)) => abi.clone().into_bytes(),
		Some(abi) => serde_json::to_vec(abi).map_err(CompileError::InvalidOutput)?,
		None => return Err(CompileError::MissingContract(key)),
	};
	let bytecode = entry
		.get("bin")
		.and_then(Value::as_str)
		.ok_or(CompileError::MissingContract(key.clone()))?
		.to_string();

	Ok(CompiledContract { name: name.to_string(), abi, bytecode })
}
