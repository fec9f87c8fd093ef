//! A [`WalletDirectory`] answered from command-line arguments.

use std::collections::HashMap;

use anyhow::{bail, Result};

use lndr_protocol::address::normalize;
use lndr_protocol::workflow::{LocalUser, WalletDirectory};

/// Currency code reported for a UCAC nobody mapped.
const UNKNOWN_CURRENCY: &str = "???";

pub struct StaticDirectory {
    user: LocalUser,
    currencies: HashMap<String, String>,
}

impl StaticDirectory {
    /// `mappings` are `UCAC=CODE` pairs; UCACs are canonicalized.
    pub fn new(user: &str, mappings: &[String]) -> Result<Self> {
        let mut currencies = HashMap::new();
        for mapping in mappings {
            let Some((ucac, code)) = mapping.split_once('=') else {
                bail!("currency mapping {mapping:?} is not UCAC=CODE");
            };
            currencies.insert(normalize(ucac.trim()).to_string(), code.trim().to_string());
        }
        Ok(Self {
            user: LocalUser::new(normalize(user)),
            currencies,
        })
    }
}

impl WalletDirectory for StaticDirectory {
    fn local_user(&self) -> LocalUser {
        self.user.clone()
    }

    fn currency_for_contract(&self, ucac: &str) -> String {
        self.currencies
            .get(normalize(ucac))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CURRENCY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_prefixed_ucacs() {
        let dir = StaticDirectory::new("0xA1", &["0xC3=USD".to_string()]).unwrap();
        assert_eq!(dir.local_user().address, "A1");
        assert_eq!(dir.currency_for_contract("C3"), "USD");
        assert_eq!(dir.currency_for_contract("0xD4"), UNKNOWN_CURRENCY);
    }

    #[test]
    fn rejects_bad_mapping() {
        assert!(StaticDirectory::new("A1", &["USD".to_string()]).is_err());
    }
}
