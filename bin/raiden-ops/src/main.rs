use std::process;

use devnet_raiden::{
	client::RaidenClient,
	errors::ApiError,
	utils::address_hex,
};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use web3::types::Address;

fn parse_address(src: &str) -> Result<Address, String> {
	src.trim_start_matches("0x")
		.parse()
		.map_err(|_| format!("Invalid address: {}", src))
}

#[derive(StructOpt, Debug)]
#[structopt(name = "Raiden Ops")]
pub struct Opt {
	/// The Raiden node's REST endpoint.
	#[structopt(long, default_value = "http://127.0.0.1:5001", takes_value = true)]
	pub raiden_endpoint: String,

	#[structopt(subcommand)]
	cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
	/// Show the Ethereum address the node runs under.
	Address,
	/// Pay a target through a token network.
	Transfer {
		#[structopt(parse(try_from_str = parse_address))]
		token: Address,
		#[structopt(parse(try_from_str = parse_address))]
		target: Address,
		amount: u64,
	},
	/// Channel operations.
	Channels(ChannelsCommand),
	/// Token registry operations.
	Tokens(TokensCommand),
	/// Event queries.
	Events(EventsCommand),
}

#[derive(StructOpt, Debug)]
enum ChannelsCommand {
	/// List all non-settled channels.
	List,
	/// Show one channel.
	Info {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
	},
	/// Show our balance in one channel.
	Balance {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
	},
	/// Open a channel with a partner.
	Open {
		#[structopt(parse(try_from_str = parse_address))]
		partner: Address,
		#[structopt(parse(try_from_str = parse_address))]
		token: Address,
		balance: u64,
		#[structopt(default_value = "600")]
		settle_timeout: u64,
	},
	/// Close a channel.
	Close {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
	},
	/// Settle a closed channel.
	Settle {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
	},
	/// Deposit further tokens into a channel.
	Deposit {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
		amount: u64,
	},
}

#[derive(StructOpt, Debug)]
enum TokensCommand {
	/// List all registered tokens.
	List,
	/// Register a token with the network.
	Register {
		#[structopt(parse(try_from_str = parse_address))]
		token: Address,
	},
}

#[derive(StructOpt, Debug)]
enum EventsCommand {
	/// Registry-level events.
	Network {
		#[structopt(long, takes_value = true)]
		from_block: Option<u64>,
	},
	/// Events of a token's channel manager.
	Token {
		#[structopt(parse(try_from_str = parse_address))]
		token: Address,
		#[structopt(long, takes_value = true)]
		from_block: Option<u64>,
	},
	/// Events of a single channel.
	Channel {
		#[structopt(parse(try_from_str = parse_address))]
		channel: Address,
		#[structopt(long, takes_value = true)]
		from_block: Option<u64>,
	},
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let cli = Opt::from_args();

	let client = match RaidenClient::new(&cli.raiden_endpoint) {
		Ok(client) => client,
		Err(e) => {
			eprintln!("{}", e);
			process::exit(1);
		},
	};

	if let Err(e) = run(client, cli.cmd).await {
		eprintln!("Error: {}", e);
		process::exit(1);
	}
}

async fn run(client: RaidenClient, cmd: Command) -> Result<(), ApiError> {
	match cmd {
		Command::Address => {
			let address = client.address().await?;
			println!("{}", address_hex(&address));
		},
		Command::Transfer { token, target, amount } =>
			print_json(&client.transfer(token, target, amount.into()).await?),
		Command::Channels(cmd) => {
			let channels = client.channels();
			match cmd {
				ChannelsCommand::List => print_json(&channels.list().await?),
				ChannelsCommand::Info { channel } => print_json(&channels.info(channel).await?),
				ChannelsCommand::Balance { channel } =>
					println!("{}", channels.balance(channel).await?),
				ChannelsCommand::Open { partner, token, balance, settle_timeout } => print_json(
					&channels.open(partner, token, balance.into(), settle_timeout).await?,
				),
				ChannelsCommand::Close { channel } => print_json(&channels.close(channel).await?),
				ChannelsCommand::Settle { channel } => print_json(&channels.settle(channel).await?),
				ChannelsCommand::Deposit { channel, amount } =>
					print_json(&channels.deposit(channel, amount.into()).await?),
			}
		},
		Command::Tokens(cmd) => {
			let tokens = client.tokens();
			match cmd {
				TokensCommand::List => {
					for token in tokens.list().await? {
						println!("{}", address_hex(&token));
					}
				},
				TokensCommand::Register { token } => print_json(&tokens.register(token).await?),
			}
		},
		Command::Events(cmd) => {
			let events = client.events();
			match cmd {
				EventsCommand::Network { from_block } =>
					print_json(&events.network(from_block).await?),
				EventsCommand::Token { token, from_block } =>
					print_json(&events.token(token, from_block).await?),
				EventsCommand::Channel { channel, from_block } =>
					print_json(&events.channel(channel, from_block).await?),
			}
		},
	}
	Ok(())
}

fn print_json<T: Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{}", text),
		Err(e) => {
			eprintln!("Could not render response: {}", e);
			process::exit(1);
		},
	}
}
