//! # Outgoing Transfers
//!
//! Turns a human-scale amount into the base-unit amount an on-chain transfer
//! expects, and packages it with the two parties and the fee parameters.
//!
//! All arithmetic is integer and checked. A whole-ether amount multiplied by
//! 10^18 overflows `u64` quickly, so base-unit amounts are `u128`.

use serde::Serialize;
use thiserror::Error;

use crate::address::normalize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while converting an amount into base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The amount string is not a non-negative decimal number.
    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    /// The amount has more fractional digits than the currency supports.
    #[error("amount {amount:?} has more than {decimals} fractional digits")]
    TooPrecise {
        /// The amount as given.
        amount: String,
        /// Decimal places of the currency.
        decimals: u32,
    },

    /// The base-unit amount does not fit in 128 bits.
    #[error("amount overflow: result exceeds the largest representable base-unit amount")]
    Overflow,
}

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

/// Multiplies `amount` by the number of base units per unit it is
/// denominated in.
pub fn to_base_units(amount: u64, amount_per_base_unit: u128) -> Result<u128, TransferError> {
    u128::from(amount)
        .checked_mul(amount_per_base_unit)
        .ok_or(TransferError::Overflow)
}

/// Parses a decimal string such as `"1.25"` into base units of a currency
/// with `decimals` decimal places. Exact: no floating point is involved.
pub fn parse_decimal(amount: &str, decimals: u32) -> Result<u128, TransferError> {
    let trimmed = amount.trim();
    let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
        return Err(TransferError::MalformedAmount(amount.to_string()));
    }

    let frac_len = frac.len() as u32;
    if frac_len > decimals {
        return Err(TransferError::TooPrecise {
            amount: amount.to_string(),
            decimals,
        });
    }

    let scale = 10u128
        .checked_pow(decimals)
        .ok_or(TransferError::Overflow)?;

    // Only digits remain, so a parse failure can only mean overflow.
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| TransferError::Overflow)?
    };
    let frac_units = if frac.is_empty() {
        0
    } else {
        let raw = frac.parse::<u128>().map_err(|_| TransferError::Overflow)?;
        let pad = 10u128
            .checked_pow(decimals - frac_len)
            .ok_or(TransferError::Overflow)?;
        raw.checked_mul(pad).ok_or(TransferError::Overflow)?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or(TransferError::Overflow)
}

// ---------------------------------------------------------------------------
// OutgoingTransfer
// ---------------------------------------------------------------------------

/// A transfer descriptor ready to hand to a transfer-capable collaborator.
///
/// Pure function of its constructor inputs; never persisted. Addresses are
/// canonical and `amount` is in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingTransfer {
    /// Sender address, without `0x`.
    pub from: String,
    /// Receiver address, without `0x`.
    pub to: String,
    /// Amount in the smallest unit of the currency.
    pub amount: u128,
    /// Price per unit of gas, passed through unchanged.
    pub gas_price: u64,
    /// Gas limit, passed through unchanged.
    pub gas: u64,
}

impl OutgoingTransfer {
    /// Builds a transfer of `amount * amount_per_base_unit` base units.
    ///
    /// Use [`crate::config::WEI_PER_ETHER`] when `amount` is in whole ether
    /// and [`crate::config::BASE_UNIT`] when it is already in wei.
    pub fn new(
        from: &str,
        to: &str,
        amount: u64,
        amount_per_base_unit: u128,
        gas_price: u64,
        gas: u64,
    ) -> Result<Self, TransferError> {
        Ok(Self::from_base_units(
            from,
            to,
            to_base_units(amount, amount_per_base_unit)?,
            gas_price,
            gas,
        ))
    }

    /// Builds a transfer from a decimal amount string, e.g. `"0.5"` ether
    /// with `decimals = 18`.
    pub fn from_decimal(
        from: &str,
        to: &str,
        amount: &str,
        decimals: u32,
        gas_price: u64,
        gas: u64,
    ) -> Result<Self, TransferError> {
        Ok(Self::from_base_units(
            from,
            to,
            parse_decimal(amount, decimals)?,
            gas_price,
            gas,
        ))
    }

    fn from_base_units(from: &str, to: &str, amount: u128, gas_price: u64, gas: u64) -> Self {
        Self {
            from: normalize(from).to_string(),
            to: normalize(to).to_string(),
            amount,
            gas_price,
            gas,
        }
    }

    /// Upper bound on the fee this transfer can pay, in base units.
    pub fn max_fee(&self) -> u128 {
        u128::from(self.gas_price) * u128::from(self.gas)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_UNIT, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, ETHER_DECIMALS, WEI_PER_ETHER};

    #[test]
    fn five_ether_is_exact() {
        let tx = OutgoingTransfer::new("0xAA", "0xBB", 5, WEI_PER_ETHER, 7, 21_000).unwrap();
        assert_eq!(tx.from, "AA");
        assert_eq!(tx.to, "BB");
        assert_eq!(tx.amount, 5_000_000_000_000_000_000);
        assert_eq!(tx.gas_price, 7);
        assert_eq!(tx.gas, 21_000);
    }

    #[test]
    fn base_unit_amount_passes_through() {
        let tx = OutgoingTransfer::new("AA", "BB", 123, BASE_UNIT, 1, 1).unwrap();
        assert_eq!(tx.amount, 123);
    }

    #[test]
    fn max_u64_ether_does_not_overflow() {
        let units = to_base_units(u64::MAX, WEI_PER_ETHER).unwrap();
        assert_eq!(units, u128::from(u64::MAX) * WEI_PER_ETHER);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(to_base_units(2, u128::MAX), Err(TransferError::Overflow));
    }

    #[test]
    fn decimal_amounts_convert_exactly() {
        assert_eq!(parse_decimal("1.25", ETHER_DECIMALS).unwrap(), 1_250_000_000_000_000_000);
        assert_eq!(parse_decimal("0.000000000000000001", 18).unwrap(), 1);
        assert_eq!(parse_decimal(".5", 2).unwrap(), 50);
        assert_eq!(parse_decimal("3.", 2).unwrap(), 300);
        assert_eq!(parse_decimal(" 42 ", 0).unwrap(), 42);
    }

    #[test]
    fn malformed_decimals_are_rejected() {
        for bad in ["", ".", "-1", "1.2.3", "abc", "1e18", "+3"] {
            assert!(
                matches!(parse_decimal(bad, 18), Err(TransferError::MalformedAmount(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn too_many_fraction_digits() {
        let err = parse_decimal("0.001", 2).unwrap_err();
        assert!(matches!(err, TransferError::TooPrecise { decimals: 2, .. }));
    }

    #[test]
    fn from_decimal_normalizes_addresses() {
        let tx = OutgoingTransfer::from_decimal(
            "0xAA",
            "BB",
            "0.5",
            ETHER_DECIMALS,
            DEFAULT_GAS_PRICE,
            DEFAULT_GAS_LIMIT,
        )
        .unwrap();
        assert_eq!(tx.from, "AA");
        assert_eq!(tx.to, "BB");
        assert_eq!(tx.amount, WEI_PER_ETHER / 2);
    }

    #[test]
    fn max_fee_is_price_times_limit() {
        let tx = OutgoingTransfer::new("AA", "BB", 1, BASE_UNIT, 10, 21_000).unwrap();
        assert_eq!(tx.max_fee(), 210_000);
    }

    #[test]
    fn serializes_wire_field_names() {
        let tx = OutgoingTransfer::new("AA", "BB", 1, BASE_UNIT, 2, 3).unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["from"], "AA");
        assert_eq!(json["gasPrice"], 2);
        assert_eq!(json["gas"], 3);
    }
}
