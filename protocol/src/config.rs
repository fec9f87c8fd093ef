//! # Wallet Constants
//!
//! Unit scales, default network-fee parameters, and display fallbacks shared
//! by the transfer builder and the confirmation workflow.

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Prefix that wallets and RPC nodes put in front of hex addresses.
/// Canonical addresses never carry it.
pub const ADDRESS_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Decimal places between one ether and one wei.
pub const ETHER_DECIMALS: u32 = 18;

/// Base units (wei) per whole ether. Multiply a whole-ether amount by this
/// to get the amount a transfer expects.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Multiplier for amounts that are already in base units.
pub const BASE_UNIT: u128 = 1;

// ---------------------------------------------------------------------------
// Network Fees
// ---------------------------------------------------------------------------

/// Gas price used when the caller has no quote of its own (wei per gas).
pub const DEFAULT_GAS_PRICE: u64 = 20_000_000_000;

/// Gas limit for a plain value transfer.
pub const DEFAULT_GAS_LIMIT: u64 = 21_000;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Label shown when the local user is neither party of a pending transaction.
pub const UNKNOWN_TRANSACTION_LABEL: &str = "Unknown Transaction";
