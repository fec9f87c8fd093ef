//! The credit record: creditor, debtor, amount, memo, nonce.

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing a [`CreditRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditRecordError {
    /// A required address field was empty.
    #[error("missing {field} address")]
    MissingAddress {
        /// Which field was empty (`ucac`, `creditor` or `debtor`).
        field: &'static str,
    },

    /// An address contained something other than hex digits.
    #[error("malformed {field} address: {value:?}")]
    MalformedAddress {
        /// Which field was malformed.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A debt needs two distinct parties.
    #[error("creditor and debtor are the same address: {0}")]
    SameParty(String),
}

// ---------------------------------------------------------------------------
// CreditRecord
// ---------------------------------------------------------------------------

/// A single debt assertion: `debtor` owes `creditor` `amount` base units
/// under the contract at `ucac_address`.
///
/// Fields are private; the accessors are the only way to read them, so a
/// record can never be edited after validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    ucac_address: String,
    creditor_address: String,
    debtor_address: String,
    amount: u64,
    memo: String,
    nonce: u64,
}

impl CreditRecord {
    /// Builds a record after validating the three addresses.
    ///
    /// Addresses must be non-empty hex strings without a `0x` prefix, and
    /// creditor and debtor must differ.
    pub fn new(
        ucac_address: &str,
        creditor_address: &str,
        debtor_address: &str,
        amount: u64,
        memo: &str,
        nonce: u64,
    ) -> Result<Self, CreditRecordError> {
        validate_address("ucac", ucac_address)?;
        validate_address("creditor", creditor_address)?;
        validate_address("debtor", debtor_address)?;

        if creditor_address == debtor_address {
            return Err(CreditRecordError::SameParty(creditor_address.to_string()));
        }

        Ok(Self {
            ucac_address: ucac_address.to_string(),
            creditor_address: creditor_address.to_string(),
            debtor_address: debtor_address.to_string(),
            amount,
            memo: memo.to_string(),
            nonce,
        })
    }

    /// Address of the contract governing this debt type.
    pub fn ucac_address(&self) -> &str {
        &self.ucac_address
    }

    /// The party that is owed.
    pub fn creditor_address(&self) -> &str {
        &self.creditor_address
    }

    /// The party that owes.
    pub fn debtor_address(&self) -> &str {
        &self.debtor_address
    }

    /// Debt amount in base units of the UCAC's currency.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Ordering token. Zero for records that have not been finalized.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns `true` if `address` is either party of this record.
    pub fn involves(&self, address: &str) -> bool {
        self.creditor_address == address || self.debtor_address == address
    }
}

fn validate_address(field: &'static str, value: &str) -> Result<(), CreditRecordError> {
    if value.is_empty() {
        return Err(CreditRecordError::MissingAddress { field });
    }
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CreditRecordError::MalformedAddress {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
