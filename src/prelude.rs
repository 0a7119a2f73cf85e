//! Prelude module for Faraid
//!
//! Re-exports the structs, traits and enums needed for typical usage.
//!
//! # Usage
//!
//! ```rust
//! use faraid::prelude::*;
//! ```

pub use crate::config::{FaraidConfig, Gender, JurisdictionMode};
pub use crate::engine::compute_distribution;
pub use crate::estate::{EstateInputs, NetEstate};
pub use crate::heirs::{HeirSet, IndividualHeir, KinshipCategory};
pub use crate::inputs::IntoFaraidDecimal;
pub use crate::resolver::resolve_distribution;
pub use crate::shares::assign_base_shares;
pub use crate::types::{
    BalanceState, DistributionResult, DistributionStatus, FaraidError, HeirShare, JuristicStatus,
    Reconciliation, ShareRecord,
};
