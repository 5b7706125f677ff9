//! Results of successful reports.

use parcel_types::{AccountAddress, DepositAmount, RegistryId, Timestamp, TokenId};
use std::fmt;

/// Which report burned the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Deposit below the session minimum.
    NoDeposit,
    /// Contour segments cross.
    Intersection,
    /// A contour vertex lies inside the other contour.
    Inclusion,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeposit => f.write_str("no_deposit"),
            Self::Intersection => f.write_str("intersection"),
            Self::Inclusion => f.write_str("inclusion"),
        }
    }
}

/// A report that burned a token and paid its deposit out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub registry: RegistryId,
    /// The token that was burned.
    pub burned: TokenId,
    /// The token the report upheld; `None` for no-deposit reports.
    pub valid: Option<TokenId>,
    /// Who submitted the report and received the deposit.
    pub reporter: AccountAddress,
    /// Deposit paid to the reporter.
    pub payout: DepositAmount,
    pub reported_at: Timestamp,
}
