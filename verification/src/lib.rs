//! Contour verification.
//!
//! Parcel tokens carry polygon contours; two tokens whose footprints (and,
//! for rooms, height ranges) overlap cannot both be legitimate. Any party may
//! report such a conflict, or a token lacking the minimal deposit, and on
//! success the offending token is burned and its deposit paid to the reporter.
//!
//! - [`VerificationSession`]: enable/disable, grace period, minimal deposit.
//! - [`ReportProcessor`]: the three report kinds and their precedence rules.
//! - [`TokenRegistry`], [`Escrow`], [`Clock`]: the collaborators the processor
//!   reads token data from, burns through, pays out through, and takes time from.

pub mod clock;
pub mod error;
pub mod escrow;
pub mod outcome;
pub mod proof;
pub mod registry;
pub mod report;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use error::VerificationError;
pub use escrow::{Escrow, EscrowError};
pub use outcome::{ReportKind, ReportOutcome};
pub use proof::{InclusionProof, IntersectionProof};
pub use registry::{RegistryError, TokenRegistry};
pub use report::ReportProcessor;
pub use session::{SessionPhase, VerificationSession};
