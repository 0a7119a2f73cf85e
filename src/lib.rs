//! # Faraid
//!
//! A Fiqh-compliant Islamic inheritance (Faraid) distribution engine: fixed
//! doctrinal shares, blocking (Hujub), 'Aul and Radd resolution, and a
//! step-by-step narrative justifying every heir's outcome. Two rule sets are
//! supported: classical doctrine and a statutory civil-code variant with heir
//! substitution and the Wasiat Wajibah for adopted children.
//!
//! The engine is a pure function of its inputs: no I/O, no shared state, no
//! async. Heirs are flat records of kinship category; the caller owns all
//! persistence, formatting and presentation.

pub mod config;
pub mod engine;
pub mod estate;
pub mod heirs;
pub mod inputs;
pub mod prelude;
pub mod resolver;
pub mod shares;
pub mod types;

pub use config::{FaraidConfig, Gender, JurisdictionMode};
pub use engine::compute_distribution;
pub use estate::{EstateInputs, NetEstate};
pub use heirs::{IndividualHeir, KinshipCategory};
pub use types::{DistributionResult, DistributionStatus, FaraidError, JuristicStatus};
