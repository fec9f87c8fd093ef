// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # lndr Wallet Tool
//!
//! Entry point for the `lndr-wallet` binary. Reads pending transactions in
//! wire format and prints, as JSON on stdout:
//!
//! - `inspect` : the detail view for the local user
//! - `settle`  : the on-chain transfer that pays the debt
//! - `transfer`: a transfer descriptor from a decimal amount

mod cli;
mod directory;
mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use lndr_protocol::detail::PendingDetail;
use lndr_protocol::pending::{PendingEntry, PendingEntryData};
use lndr_protocol::transfer::OutgoingTransfer;

use cli::{Commands, WalletCli};
use directory::StaticDirectory;
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = WalletCli::parse();
    logging::init_logging(
        "lndr_wallet=info,lndr_protocol=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Inspect(args) => inspect(args),
        Commands::Settle(args) => settle(args),
        Commands::Transfer(args) => transfer(args),
    }
}

fn inspect(args: cli::InspectArgs) -> Result<()> {
    let entry = read_entry(&args.file)?;
    let directory = StaticDirectory::new(&args.user, &args.currencies)?;
    let detail = PendingDetail::resolve(&entry, &directory);
    tracing::info!(hash = %detail.hash, direction = ?detail.direction, "resolved pending transaction");
    print_json(&detail)
}

fn settle(args: cli::SettleArgs) -> Result<()> {
    let entry = read_entry(&args.file)?;
    let transfer = entry
        .parent()
        .settlement_transfer(args.amount_per_base_unit, args.gas_price, args.gas)
        .context("failed to build settlement transfer")?;
    print_json(&transfer)
}

fn transfer(args: cli::TransferArgs) -> Result<()> {
    let transfer = OutgoingTransfer::from_decimal(
        &args.from,
        &args.to,
        &args.amount,
        args.decimals,
        args.gas_price,
        args.gas,
    )
    .with_context(|| format!("invalid amount {:?}", args.amount))?;
    tracing::info!(amount = %transfer.amount, max_fee = %transfer.max_fee(), "built transfer");
    print_json(&transfer)
}

/// Reads and validates a pending entry from a JSON file.
fn read_entry(path: &Path) -> Result<PendingEntry> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data: PendingEntryData = serde_json::from_str(&raw)
        .with_context(|| format!("failed to decode pending transaction in {}", path.display()))?;
    PendingEntry::from_wire(&data)
        .with_context(|| format!("invalid pending transaction in {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
