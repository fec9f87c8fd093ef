//! # Credit Protocol Primitives
//!
//! The value types shared by every lndr client. A [`CreditRecord`] is one
//! debt assertion between two parties under a UCAC (Universal Credit
//! Agreement Contract), which determines the currency of the debt.
//!
//! Records are immutable once built. Addresses handed to this crate must
//! already be canonical (hex digits, no `0x` prefix); canonicalization is
//! the caller's job.

pub mod record;

pub use record::{CreditRecord, CreditRecordError};
