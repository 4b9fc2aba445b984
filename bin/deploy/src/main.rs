use std::{
	error::Error,
	fs,
	path::{
		Path,
		PathBuf,
	},
	process,
};

use devnet_contracts::{
	deploy::Deployer,
	interface::Token,
	registry::{
		DevnetContract,
		InterfaceRegistry,
	},
	solc::{
		Compiler,
		LibraryRef,
	},
};
use futures::future::try_join_all;
use structopt::StructOpt;
use tracing::{
	debug,
	info,
};
use tracing_subscriber::EnvFilter;
use web3::{
	contract::{
		Contract,
		Options,
	},
	transports::Http,
	types::{
		Address,
		U256,
	},
	Web3,
};

/// Accounts pre-created for the devnet. Keystore files for these are in
/// ./keystore, passwords are "password". (They have passwords since Raiden
/// cannot cope with password-less accounts.)
const FUNDED_ACCOUNTS: [&str; 4] = [
	"0x19E7E376E7C213B7E7e7e46cc70A5dD086DAff2A",
	"0x1563915e194D8CfBA1943570603F7606A3115508",
	"0x5CbDd86a2FA8Dc4bDdd8a8f69dBa48572EeC07FB",
	"0x7564105E977516C53bE337314c7E53838967bDaC",
];

/// Ether transferred to each pre-created account.
const FUNDING_ETHER: u64 = 1000;

#[derive(StructOpt, Debug)]
#[structopt(name = "Devnet Deploy")]
pub struct Opt {
	/// Specify the RPC endpoint to interact with.
	#[structopt(long, default_value = "http://localhost:8545", takes_value = true)]
	pub eth_rpc_endpoint: String,

	/// Path to the Solidity compiler.
	#[structopt(long, parse(from_os_str), default_value = "/usr/local/bin/solc", takes_value = true)]
	pub solc_path: PathBuf,

	/// Directory holding the Raiden smart contract sources.
	#[structopt(
		long,
		parse(from_os_str),
		default_value = "raiden/raiden/smart_contracts",
		takes_value = true
	)]
	pub contracts_dir: PathBuf,

	/// Directory holding the Token contract source.
	#[structopt(long, parse(from_os_str), default_value = ".", takes_value = true)]
	pub token_dir: PathBuf,

	/// Directory to which the ABI files are written.
	#[structopt(long, parse(from_os_str), default_value = "abis", takes_value = true)]
	pub abi_dir: PathBuf,

	/// File to which the deployment environment variables are written.
	#[structopt(long, parse(from_os_str), default_value = "env.sh", takes_value = true)]
	pub env_file: PathBuf,
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let cli = Opt::from_args();

	let transport = match Http::new(&cli.eth_rpc_endpoint) {
		Ok(transport) => transport,
		Err(e) => {
			eprintln!("Could not connect to ETH's RPC endpoint: {}", e);
			process::exit(1);
		},
	};
	let web3 = Web3::new(transport);

	if let Err(e) = run(web3, cli).await {
		eprintln!("Error: {}", e);
		process::exit(1);
	}
}

async fn run(web3: Web3<Http>, cli: Opt) -> Result<(), Box<dyn Error>> {
	// One account is pre-configured and pre-funded by `geth --dev`.
	let account = Deployer::dev_account(&web3).await?;
	let deployer = Deployer::new(web3.clone(), account);
	info!(
		"Acct: 0x{} (balance: {})",
		hex::encode(account),
		deployer.balance(account).await?
	);

	// Transfer some of our Eth stash to the pre-configured accounts.
	let funded = FUNDED_ACCOUNTS
		.iter()
		.map(|address| parse_address(address))
		.collect::<Result<Vec<_>, _>>()?;
	let wei = U256::from(FUNDING_ETHER) * U256::exp10(18);
	try_join_all(funded.iter().map(|to| deployer.transfer_ether(*to, wei))).await?;
	info!("Value transfers succeeded.");

	// Some of the compilation requires the addresses of library contracts.
	let compiler = Compiler::new(cli.solc_path, cli.abi_dir.clone())?;
	let mut libraries: Vec<LibraryRef> = vec![];

	let discovery = deployer
		.deploy(&compiler.compile(&cli.contracts_dir, "EndpointRegistry", &libraries)?)
		.await?;
	debug!("Discovery contract: 0x{}", hex::encode(discovery));

	let netting_channel_library = deployer
		.deploy(&compiler.compile(&cli.contracts_dir, "NettingChannelLibrary", &libraries)?)
		.await?;
	libraries.push(LibraryRef::new("NettingChannelLibrary", netting_channel_library));

	let channel_manager_library = deployer
		.deploy(&compiler.compile(&cli.contracts_dir, "ChannelManagerLibrary", &libraries)?)
		.await?;
	libraries.push(LibraryRef::new("ChannelManagerLibrary", channel_manager_library));

	let registry = deployer
		.deploy(&compiler.compile(&cli.contracts_dir, "Registry", &libraries)?)
		.await?;
	debug!("Registry contract: 0x{}", hex::encode(registry));

	// ABIs Raiden needs at runtime; compiled but not deployed.
	compiler.compile(&cli.contracts_dir, "ChannelManagerContract", &libraries)?;
	compiler.compile(&cli.contracts_dir, "NettingChannelContract", &libraries)?;

	// Deploy the Token contract and split its supply equally between the
	// pre-configured accounts.
	let token_compiled = compiler.compile(&cli.token_dir, "Token", &[])?;
	let token = deployer.deploy(&token_compiled).await?;
	debug!("Token contract: 0x{}", hex::encode(token));

	let interfaces = InterfaceRegistry::from_dir(&cli.abi_dir, web3.clone())?;
	let token_interface = interfaces.get(DevnetContract::Token)?.at(token);
	let total_supply = uint_result(&token_interface.call_single("totalSupply", &[]).await?)?;
	info!("totalSupply: {}", total_supply);

	let share = total_supply / U256::from(FUNDED_ACCOUNTS.len());
	let token_contract = Contract::from_json(web3.eth(), token, &token_compiled.abi)?;
	try_join_all(
		funded
			.iter()
			.map(|to| token_contract.call("transfer", (*to, share), account, Options::default())),
	)
	.await?;
	info!("Token transfers succeeded.");

	// Summarise what we've done.
	println!("Deployment account: 0x{}", hex::encode(account));
	for (index, address) in funded.iter().enumerate() {
		let balance = deployer.balance(*address).await?;
		let tokens =
			uint_result(&token_interface.call_single("balanceOf", &[Token::Address(*address)]).await?)?;
		println!(
			"Account_{}: 0x{}\n  balance: {}\n  tokens:  {}",
			index + 1,
			hex::encode(address),
			balance,
			tokens
		);
	}
	println!("Discovery contract: 0x{}", hex::encode(discovery));
	println!("Registry contract:  0x{}", hex::encode(registry));
	println!("Token contract:     0x{}", hex::encode(token));
	println!(
		"Raiden flags: --registry-contract-address 0x{} --discovery-contract-address 0x{}",
		hex::encode(registry),
		hex::encode(discovery)
	);

	write_env_file(&cli.env_file, &funded, discovery, registry, token)?;
	println!("Environment variables written to {}", cli.env_file.display());

	Ok(())
}

fn parse_address(src: &str) -> Result<Address, String> {
	src.trim_start_matches("0x")
		.parse()
		.map_err(|_| format!("Invalid address: {}", src))
}

fn uint_result(token: &Token) -> Result<U256, String> {
	token
		.clone()
		.into_uint()
		.ok_or_else(|| format!("Expected a uint, got {:?}", token))
}

fn write_env_file(
	path: &Path,
	accounts: &[Address],
	discovery: Address,
	registry: Address,
	token: Address,
) -> std::io::Result<()> {
	let mut contents = String::new();
	for (index, account) in accounts.iter().enumerate() {
		contents.push_str(&format!("export RDN_ACCT{}=0x{}\n", index + 1, hex::encode(account)));
	}
	contents.push_str(&format!("export RDN_DISCOVERY=0x{}\n", hex::encode(discovery)));
	contents.push_str(&format!("export RDN_REGISTRY=0x{}\n", hex::encode(registry)));
	contents.push_str(&format!("export RDN_TOKEN=0x{}\n", hex::encode(token)));
	// For convenience within the docker-compose file:
	contents.push_str("export UID\n");
	fs::write(path, contents)
}
