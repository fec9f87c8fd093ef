// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # lndr Protocol: Core Library
//!
//! The transaction domain of an lndr wallet: peer-to-peer credit records,
//! the pending proposals that carry them, and the lifecycle that turns a
//! proposal into a confirmed or rejected debt.
//!
//! ## Modules
//!
//! - **address**: Canonical `0x`-free addresses. Every constructor routes
//!   through here.
//! - **transfer**: Unit conversion and the outgoing transfer descriptor.
//! - **pending**: Pending transactions, atomic batches, and the pool that
//!   holds them until they resolve.
//! - **workflow**: The confirm/reject state machine and the collaborator
//!   traits it calls out to.
//! - **detail**: Counterpart, direction and allowed actions for display.
//! - **config**: Unit scales, fee defaults, display fallbacks.
//!
//! Credit records themselves come from the `credit-protocol` crate.
//! Rendering, transport, key management and persistence are out of scope;
//! they plug in through [`workflow::SubmissionService`] and
//! [`workflow::WalletDirectory`].

pub mod address;
pub mod config;
pub mod detail;
pub mod pending;
pub mod transfer;
pub mod workflow;

pub use credit_protocol::{CreditRecord, CreditRecordError};
