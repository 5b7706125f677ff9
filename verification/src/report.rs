//! Report processing: judges conflict and no-deposit claims, slashes the offender.
//!
//! A report names a "valid" and an "invalid" token. The invalid one must be
//! of the same type and modified no earlier than the valid one, so the older
//! claim always wins; an exact tie goes to the lower token id. Proof points
//! are checked against the stored contours before any geometry runs.

use parcel_geometry::{
    check_vertical_intersection, contour_segments_intersects, lowest_elevation,
    point_inside_contour, GeometryError, InclusionType,
};
use parcel_types::{AccountAddress, Contour, Point, Timestamp, TokenId, TokenType};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::VerificationError;
use crate::escrow::Escrow;
use crate::outcome::{ReportKind, ReportOutcome};
use crate::proof::{InclusionProof, IntersectionProof};
use crate::registry::TokenRegistry;
use crate::session::VerificationSession;

/// One side of a conflict report, as read from the registry.
struct Claim {
    id: TokenId,
    token_type: TokenType,
    contour: Contour,
}

/// Evaluates reports against one registry.
///
/// The session is passed into every call rather than owned, so several
/// sessions can share a processor type without sharing state.
pub struct ReportProcessor<R, E, C> {
    registry: R,
    escrow: E,
    clock: C,
}

impl<R: TokenRegistry, E: Escrow, C: Clock> ReportProcessor<R, E, C> {
    pub fn new(registry: R, escrow: E, clock: C) -> Self {
        Self {
            registry,
            escrow,
            clock,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn escrow(&self) -> &E {
        &self.escrow
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Burn a token whose deposit is below the session minimum.
    ///
    /// Rooms that do not claim uniqueness are exempt. Tokens modified less
    /// than the session's new-token timeout ago cannot be reported yet.
    pub fn report_no_deposit(
        &self,
        session: &VerificationSession,
        reporter: &AccountAddress,
        token: TokenId,
    ) -> Result<ReportOutcome, VerificationError> {
        let now = self.clock.now();
        self.check_no_deposit(session, token, now)
            .and_then(|()| self.slash(ReportKind::NoDeposit, None, token, reporter, now))
            .inspect_err(|e| {
                debug!(token = %token, reporter = %reporter, "no-deposit report rejected: {e}")
            })
    }

    /// Burn `proof.invalid` if the named segments of the two contours intersect.
    pub fn report_intersection(
        &self,
        session: &VerificationSession,
        reporter: &AccountAddress,
        proof: &IntersectionProof,
    ) -> Result<ReportOutcome, VerificationError> {
        let now = self.clock.now();
        self.check_intersection(session, proof, now)
            .and_then(|()| {
                self.slash(
                    ReportKind::Intersection,
                    Some(proof.valid),
                    proof.invalid,
                    reporter,
                    now,
                )
            })
            .inspect_err(|e| {
                debug!(
                    valid = %proof.valid,
                    invalid = %proof.invalid,
                    reporter = %reporter,
                    "intersection report rejected: {e}"
                )
            })
    }

    /// Burn `proof.invalid` if the named vertex lies inside the other contour.
    pub fn report_inclusion(
        &self,
        session: &VerificationSession,
        reporter: &AccountAddress,
        proof: &InclusionProof,
    ) -> Result<ReportOutcome, VerificationError> {
        let now = self.clock.now();
        self.check_inclusion(session, proof, now)
            .and_then(|()| {
                self.slash(
                    ReportKind::Inclusion,
                    Some(proof.valid),
                    proof.invalid,
                    reporter,
                    now,
                )
            })
            .inspect_err(|e| {
                debug!(
                    valid = %proof.valid,
                    invalid = %proof.invalid,
                    reporter = %reporter,
                    "inclusion report rejected: {e}"
                )
            })
    }

    fn check_no_deposit(
        &self,
        session: &VerificationSession,
        token: TokenId,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        session.ensure_reportable(now)?;
        let latest = self.registry.latest_timestamp(token)?;

        let balance = self
            .escrow
            .deposit_balance_of(self.registry.registry_id(), token)?;
        let minimum = session.minimal_deposit();
        if balance >= minimum {
            return Err(VerificationError::InsufficientDeposit {
                token,
                balance,
                minimum,
            });
        }

        if !session.is_burn_eligible(latest, now) {
            return Err(VerificationError::TokenTooNew {
                token,
                eligible_at: session.burn_eligible_at(latest),
            });
        }

        if self.registry.token_type(token)? == TokenType::Room
            && !self.registry.claims_uniqueness(token)?
        {
            return Err(VerificationError::DoesNotClaimUniqueness(token));
        }
        Ok(())
    }

    fn check_intersection(
        &self,
        session: &VerificationSession,
        proof: &IntersectionProof,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        let (valid, invalid) = self.load_pair(session, proof.valid, proof.invalid, now)?;
        expect_segment(
            &valid,
            proof.valid_segment,
            &proof.valid_start,
            &proof.valid_end,
        )?;
        expect_segment(
            &invalid,
            proof.invalid_segment,
            &proof.invalid_start,
            &proof.invalid_end,
        )?;

        let crosses = contour_segments_intersects(
            &valid.contour,
            &invalid.contour,
            proof.valid_segment,
            proof.invalid_segment,
            proof.exclude_collinear,
        )?;
        if !crosses {
            return Err(VerificationError::NoIntersectionFound);
        }
        self.check_heights(&valid, &invalid)
    }

    fn check_inclusion(
        &self,
        session: &VerificationSession,
        proof: &InclusionProof,
        now: Timestamp,
    ) -> Result<(), VerificationError> {
        let (valid, invalid) = self.load_pair(session, proof.valid, proof.invalid, now)?;
        let inner = match proof.inclusion {
            InclusionType::AInsideB => &valid,
            InclusionType::BInsideA => &invalid,
        };
        expect_point(inner, proof.point_index, &proof.point)?;

        let inside = point_inside_contour(
            &valid.contour,
            &invalid.contour,
            proof.inclusion,
            proof.point_index,
        )?;
        if !inside {
            return Err(VerificationError::InclusionNotFound);
        }
        self.check_heights(&valid, &invalid)?;
        self.check_address_claims(&valid, &invalid)
    }

    /// Shared preconditions of conflict reports: reportable session, distinct
    /// tokens, matching types, and the invalid token being the newer claim.
    fn load_pair(
        &self,
        session: &VerificationSession,
        valid: TokenId,
        invalid: TokenId,
        now: Timestamp,
    ) -> Result<(Claim, Claim), VerificationError> {
        session.ensure_reportable(now)?;
        if valid == invalid {
            return Err(VerificationError::SameToken(valid));
        }

        let valid_type = self.registry.token_type(valid)?;
        let invalid_type = self.registry.token_type(invalid)?;
        if valid_type != invalid_type {
            return Err(VerificationError::TypeMismatch {
                valid: valid_type,
                invalid: invalid_type,
            });
        }

        let valid_latest = self.registry.latest_timestamp(valid)?;
        let invalid_latest = self.registry.latest_timestamp(invalid)?;
        // On an exact tie the earlier-minted token is the valid one.
        if invalid_latest < valid_latest || (invalid_latest == valid_latest && invalid < valid) {
            return Err(VerificationError::StaleOrdering {
                valid: valid_latest,
                invalid: invalid_latest,
            });
        }

        Ok((
            self.claim(valid, valid_type)?,
            self.claim(invalid, invalid_type)?,
        ))
    }

    fn claim(&self, id: TokenId, token_type: TokenType) -> Result<Claim, VerificationError> {
        let contour = self
            .registry
            .contour(id)?
            .ok_or(VerificationError::ContourNotSet(id))?;
        Ok(Claim {
            id,
            token_type,
            contour,
        })
    }

    /// Indoor units only conflict when their height ranges overlap as well.
    fn check_heights(&self, valid: &Claim, invalid: &Claim) -> Result<(), VerificationError> {
        if !valid.token_type.is_indoor() {
            return Ok(());
        }
        let overlap = check_vertical_intersection(
            self.registry.highest_point(valid.id)?,
            lowest_elevation(&valid.contour),
            self.registry.highest_point(invalid.id)?,
            lowest_elevation(&invalid.contour),
        )?;
        if !overlap {
            return Err(VerificationError::HeightsDoNotOverlap);
        }
        Ok(())
    }

    /// Two rooms both claiming uniqueness under different addresses are left to governance.
    fn check_address_claims(&self, valid: &Claim, invalid: &Claim) -> Result<(), VerificationError> {
        if !valid.token_type.is_indoor() {
            return Ok(());
        }
        if self.registry.claims_uniqueness(valid.id)?
            && self.registry.claims_uniqueness(invalid.id)?
            && self.registry.human_address(valid.id)? != self.registry.human_address(invalid.id)?
        {
            return Err(VerificationError::AmbiguousUniquenessClaim);
        }
        Ok(())
    }

    /// Pay the deposit of `invalid` to `reporter`, then burn `invalid`.
    ///
    /// A failed payout leaves the token in place.
    fn slash(
        &self,
        kind: ReportKind,
        valid: Option<TokenId>,
        invalid: TokenId,
        reporter: &AccountAddress,
        now: Timestamp,
    ) -> Result<ReportOutcome, VerificationError> {
        let registry = self.registry.registry_id();
        let payout = self.escrow.payout(registry, invalid, reporter)?;
        self.registry.burn(invalid)?;

        info!(
            kind = %kind,
            registry = %registry,
            burned = %invalid,
            reporter = %reporter,
            payout = %payout,
            "token slashed"
        );
        Ok(ReportOutcome {
            kind,
            registry,
            burned: invalid,
            valid,
            reporter: reporter.clone(),
            payout,
            reported_at: now,
        })
    }
}

fn expect_point(claim: &Claim, index: usize, claimed: &Point) -> Result<(), VerificationError> {
    let stored = claim
        .contour
        .point(index)
        .ok_or(GeometryError::IndexOutOfRange {
            index,
            len: claim.contour.len(),
        })?;
    if stored != claimed {
        return Err(VerificationError::PointMismatch {
            token: claim.id,
            index,
        });
    }
    Ok(())
}

fn expect_segment(
    claim: &Claim,
    index: usize,
    start: &Point,
    end: &Point,
) -> Result<(), VerificationError> {
    expect_point(claim, index, start)?;
    expect_point(claim, (index + 1) % claim.contour.len(), end)
}
