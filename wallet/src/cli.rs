//! # CLI Interface
//!
//! Command-line structure for `lndr-wallet`, using `clap` derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lndr_protocol::config::{BASE_UNIT, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, ETHER_DECIMALS};

/// Inspect lndr pending transactions and build outgoing transfers.
#[derive(Parser, Debug)]
#[command(
    name = "lndr-wallet",
    about = "lndr pending-transaction inspector and transfer builder",
    version,
    propagate_version = true
)]
pub struct WalletCli {
    /// Log format: "pretty" or "json".
    #[arg(long, global = true, env = "LNDR_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a pending transaction (JSON file) from the local user's side.
    Inspect(InspectArgs),
    /// Print the transfer that settles a pending transaction.
    Settle(SettleArgs),
    /// Build a transfer descriptor from a decimal amount.
    Transfer(TransferArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to the pending transaction, in wire format.
    pub file: PathBuf,

    /// Address of the local user.
    #[arg(long, env = "LNDR_USER_ADDRESS")]
    pub user: String,

    /// Currency of a UCAC, as `UCAC=CODE`. Repeatable.
    #[arg(long = "currency", value_name = "UCAC=CODE")]
    pub currencies: Vec<String>,
}

/// Arguments for the `settle` subcommand.
#[derive(Parser, Debug)]
pub struct SettleArgs {
    /// Path to the pending transaction, in wire format.
    pub file: PathBuf,

    /// Base units per unit of the record amount.
    #[arg(long, default_value_t = BASE_UNIT)]
    pub amount_per_base_unit: u128,

    #[arg(long, default_value_t = DEFAULT_GAS_PRICE)]
    pub gas_price: u64,

    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas: u64,
}

/// Arguments for the `transfer` subcommand.
#[derive(Parser, Debug)]
pub struct TransferArgs {
    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub to: String,

    /// Decimal amount in whole units, e.g. "0.25".
    #[arg(long)]
    pub amount: String,

    /// Decimal places of the currency.
    #[arg(long, default_value_t = ETHER_DECIMALS)]
    pub decimals: u32,

    #[arg(long, default_value_t = DEFAULT_GAS_PRICE)]
    pub gas_price: u64,

    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas: u64,
}
