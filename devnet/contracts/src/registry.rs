use std::{
	collections::HashMap,
	fmt,
	path::Path,
};

use web3::{
	Transport,
	Web3,
};

use crate::{
	errors::ContractDefError,
	interface::ContractInterfaceBuilder,
};

/// The contracts making up a devnet deployment. EndpointRegistry doubles as
/// the discovery contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DevnetContract {
	Token,
	EndpointRegistry,
	Registry,
	ChannelManagerContract,
	NettingChannelContract,
}

impl DevnetContract {
	pub const ALL: [DevnetContract; 5] = [
		DevnetContract::Token,
		DevnetContract::EndpointRegistry,
		DevnetContract::Registry,
		DevnetContract::ChannelManagerContract,
		DevnetContract::NettingChannelContract,
	];

	/// The file the compile step writes this contract's ABI to.
	pub fn file_name(&self) -> String {
		format!("{}.json", self)
	}
}

impl fmt::Display for DevnetContract {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			DevnetContract::Token => "Token",
			DevnetContract::EndpointRegistry => "EndpointRegistry",
			DevnetContract::Registry => "Registry",
			DevnetContract::ChannelManagerContract => "ChannelManagerContract",
			DevnetContract::NettingChannelContract => "NettingChannelContract",
		};
		write!(f, "{}", name)
	}
}

/// Interface builders for the whole devnet contract set, loaded from the
/// ABI files a deployment run leaves behind.
pub struct InterfaceRegistry<T: Transport> {
	builders: HashMap<DevnetContract, ContractInterfaceBuilder<T>>,
}

impl<T: Transport> InterfaceRegistry<T> {
	pub fn from_dir(abi_dir: &Path, web3: Web3<T>) -> Result<Self, ContractDefError> {
		let mut builders = HashMap::new();
		for identifier in DevnetContract::ALL {
			let builder =
				ContractInterfaceBuilder::from_file(abi_dir.join(identifier.file_name()), web3.clone())?;
			builders.insert(identifier, builder);
		}
		Ok(Self { builders })
	}

	pub fn get(&self, identifier: DevnetContract) -> Result<&ContractInterfaceBuilder<T>, ContractDefError> {
		self.builders.get(&identifier).ok_or(ContractDefError::SpecNotFound)
	}
}
