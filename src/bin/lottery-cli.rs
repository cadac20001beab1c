use clap::{Parser, Subcommand};
use lottery_gateway::blockchain::{Chain, Wallet};
use lottery_gateway::lottery::{CLOSE_LOTTERY_MESSAGE, START_LOTTERY_MESSAGE};
use lottery_sdk::{LotteryClient, DEFAULT_BASE_URL};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "lottery-cli")]
#[command(about = "Command-line client for the lottery gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Signing key for start/close/sign. Never printed.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    #[arg(long, default_value = "hardhat", global = true)]
    chain: Chain,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show lottery state for an account
    Info { lottery: String, address: String },
    /// Open betting until the given closing time
    Start {
        lottery: String,
        /// Value passed to the contract's startLottery
        #[arg(long)]
        closing_time: u64,
        /// Pre-computed signature of "start lottery"; signed locally when omitted
        #[arg(long)]
        signature: Option<String>,
        /// Owner address; defaults to the signing key's address
        #[arg(long)]
        address: Option<String>,
    },
    /// Close betting
    Close {
        lottery: String,
        /// Pre-computed signature of "close lottery"; signed locally when omitted
        #[arg(long)]
        signature: Option<String>,
        /// Owner address; defaults to the signing key's address
        #[arg(long)]
        address: Option<String>,
    },
    /// Print the personal-sign signature of a message
    Sign { message: String },
    /// Check gateway and RPC health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = LotteryClient::new(&cli.url);

    match cli.command {
        Commands::Info { lottery, address } => {
            print_json(&client.lottery_info(&lottery, &address).await?)?;
        }
        Commands::Start {
            lottery,
            closing_time,
            signature,
            address,
        } => {
            let (address, signature) =
                credentials(cli.private_key.as_deref(), cli.chain, address, signature, START_LOTTERY_MESSAGE)
                    .await?;
            let outcome = client
                .start_lottery(&lottery, &address, closing_time, &signature)
                .await?;
            print_json(&outcome)?;
        }
        Commands::Close {
            lottery,
            signature,
            address,
        } => {
            let (address, signature) =
                credentials(cli.private_key.as_deref(), cli.chain, address, signature, CLOSE_LOTTERY_MESSAGE)
                    .await?;
            print_json(&client.close_lottery(&lottery, &address, &signature).await?)?;
        }
        Commands::Sign { message } => {
            let wallet = wallet(cli.private_key.as_deref(), cli.chain)?;
            println!("{}", wallet.sign_message_hex(&message).await?);
        }
        Commands::Health => {
            print_json(&client.health().await?)?;
        }
    }

    Ok(())
}

fn wallet(private_key: Option<&str>, chain: Chain) -> Result<Wallet, Box<dyn std::error::Error>> {
    let key = private_key.ok_or("a signing key is required (--private-key or PRIVATE_KEY)")?;
    Ok(Wallet::from_private_key(key, chain.id())?)
}

/// Resolve the address and signature for a write route, signing
/// `message` locally when no signature was given.
async fn credentials(
    private_key: Option<&str>,
    chain: Chain,
    address: Option<String>,
    signature: Option<String>,
    message: &str,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    match (address, signature) {
        (Some(address), Some(signature)) => Ok((address, signature)),
        (address, signature) => {
            let wallet = wallet(private_key, chain)?;
            let address = address.unwrap_or_else(|| wallet.address().to_string());
            let signature = match signature {
                Some(signature) => signature,
                None => wallet.sign_message_hex(message).await?,
            };
            Ok((address, signature))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
