//! End-to-end report flows against the nullable registry and escrow.

use parcel_geometry::InclusionType;
use parcel_nullables::{NullClock, NullEscrow, NullRegistry, TokenDetails};
use parcel_types::{
    AccountAddress, Contour, DepositAmount, Height, Point, RegistryId, Timestamp, TokenId, TokenType,
    VerificationParams,
};
use parcel_verification::{
    Clock, EscrowError, InclusionProof, IntersectionProof, RegistryError, ReportKind,
    ReportProcessor, TokenRegistry, VerificationError, VerificationSession,
};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const START: u64 = 1_600_000_000;
const MINIMAL_DEPOSIT: u128 = 50;

fn contour1() -> Contour {
    Contour::from_geohashes(&["dr5qvnpd300r", "dr5qvnp655pq", "dr5qvnp3g3w0", "dr5qvnp9cnpt"])
        .unwrap()
}

fn contour2() -> Contour {
    Contour::from_geohashes(&["dr5qvnpd0eqs", "dr5qvnpd5npy", "dr5qvnp9grz7", "dr5qvnpd100z"])
        .unwrap()
}

fn contour3() -> Contour {
    Contour::from_geohashes(&["dr5qvnp9c7b2", "dr5qvnp3ewcv", "dr5qvnp37vs4", "dr5qvnp99ddh"])
        .unwrap()
}

/// Two squares sharing their first edge.
fn contour6() -> Contour {
    Contour::from_geohashes(&["dr5qvnpdd9gb", "dr5qvnpdd9gv", "dr5qvnpdd9gt", "dr5qvnpdd9g2"])
        .unwrap()
}

fn contour7() -> Contour {
    Contour::from_geohashes(&["dr5qvnpdd9gu", "dr5qvnpdd9gf", "dr5qvnpdd9g3", "dr5qvnpdd9g5"])
        .unwrap()
}

/// `contour` with every vertex tagged at a coarser geohash `precision`.
fn coarsened(contour: &Contour, precision: u8) -> Contour {
    let points = contour
        .points()
        .iter()
        .map(|p| Point::with_precision(p.lat(), p.lon(), p.height(), precision).unwrap())
        .collect();
    Contour::new(points).unwrap()
}

fn room_details(contour: Contour, floor: Height, ceiling: Height) -> TokenDetails {
    TokenDetails::new(TokenType::Room, contour.with_height(floor).unwrap())
        .with_highest_point(ceiling)
}

struct Harness {
    clock: Arc<NullClock>,
    registry: Arc<NullRegistry>,
    escrow: NullEscrow,
    session: VerificationSession,
    owner: AccountAddress,
    reporter: AccountAddress,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(NullClock::new(START));
        let registry = Arc::new(NullRegistry::new(RegistryId::new(1), Arc::clone(&clock)));
        let escrow = NullEscrow::new();
        escrow.bind(Arc::clone(&registry));
        Self {
            clock,
            registry,
            escrow,
            session: VerificationSession::new(VerificationParams::default()),
            owner: AccountAddress::from_seed(1),
            reporter: AccountAddress::from_seed(9),
        }
    }

    fn processor(&self) -> ReportProcessor<&NullRegistry, &NullEscrow, &NullClock> {
        ReportProcessor::new(&*self.registry, &self.escrow, &*self.clock)
    }

    fn token(&self, details: TokenDetails, deposit: u128) -> TokenId {
        let token = self.registry.mint(self.owner.clone());
        self.registry.set_initial_details(token, details).unwrap();
        if deposit > 0 {
            self.escrow
                .deposit(
                    self.registry.registry_id(),
                    token,
                    &self.owner,
                    DepositAmount::new(deposit),
                )
                .unwrap();
        }
        token
    }

    fn land_plot(&self, contour: Contour) -> TokenId {
        self.token(TokenDetails::new(TokenType::LandPlot, contour), 42)
    }

    fn room(&self, contour: Contour, floor: Height, ceiling: Height) -> TokenId {
        self.token(room_details(contour, floor, ceiling), 42)
    }

    fn unique_room(&self, contour: Contour, address: &str) -> TokenId {
        self.token(room_details(contour, 0, 300).claiming_uniqueness(address), 42)
    }

    /// Enable verification and let the grace period run out.
    fn activate(&mut self) {
        self.session
            .enable(DepositAmount::new(MINIMAL_DEPOSIT), 3600, self.clock.now())
            .unwrap();
        self.clock.advance(3600);
    }

    fn intersection_proof(
        &self,
        valid: TokenId,
        valid_segment: usize,
        invalid: TokenId,
        invalid_segment: usize,
    ) -> IntersectionProof {
        let (valid_start, valid_end) = self.stored(valid).segment(valid_segment).unwrap();
        let (invalid_start, invalid_end) = self.stored(invalid).segment(invalid_segment).unwrap();
        IntersectionProof {
            valid,
            invalid,
            valid_segment,
            valid_start,
            valid_end,
            invalid_segment,
            invalid_start,
            invalid_end,
            exclude_collinear: true,
        }
    }

    fn inclusion_proof(
        &self,
        valid: TokenId,
        invalid: TokenId,
        inclusion: InclusionType,
        point_index: usize,
    ) -> InclusionProof {
        let owner = match inclusion {
            InclusionType::AInsideB => valid,
            InclusionType::BInsideA => invalid,
        };
        let point = *self.stored(owner).point(point_index).unwrap();
        InclusionProof {
            valid,
            invalid,
            inclusion,
            point_index,
            point,
        }
    }

    fn stored(&self, token: TokenId) -> Contour {
        self.registry.contour(token).unwrap().unwrap()
    }

    fn reporter_balance(&self) -> DepositAmount {
        self.escrow.balance_of_account(&self.reporter)
    }
}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

#[test]
fn intersecting_land_plot_is_burned_and_deposit_paid() {
    let mut h = Harness::new();
    let older = h.land_plot(contour1());
    h.clock.advance(10);
    let newer = h.land_plot(contour2());
    h.activate();

    let proof = h.intersection_proof(older, 3, newer, 0);
    let outcome = h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap();

    assert_eq!(outcome.kind, ReportKind::Intersection);
    assert_eq!(outcome.burned, newer);
    assert_eq!(outcome.valid, Some(older));
    assert_eq!(outcome.payout, DepositAmount::new(42));
    assert!(!h.registry.exists(newer));
    assert!(h.registry.exists(older));
    assert_eq!(h.reporter_balance(), DepositAmount::new(42));
}

#[test]
fn older_token_cannot_be_reported_as_invalid() {
    let mut h = Harness::new();
    let older = h.land_plot(contour1());
    h.clock.advance(10);
    let newer = h.land_plot(contour2());
    h.activate();

    let proof = h.intersection_proof(newer, 0, older, 3);
    let err = h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap_err();

    assert_eq!(
        err,
        VerificationError::StaleOrdering {
            valid: Timestamp::new(START + 10),
            invalid: Timestamp::new(START),
        }
    );
    assert!(h.registry.exists(older));
    assert!(h.registry.exists(newer));
    assert_eq!(h.reporter_balance(), DepositAmount::ZERO);
}

#[test]
fn equal_timestamps_favour_the_earlier_minted_token() {
    let mut h = Harness::new();
    let first = h.land_plot(contour1());
    let second = h.land_plot(contour2());
    h.activate();

    let reversed = h.intersection_proof(second, 0, first, 3);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &reversed),
        Err(VerificationError::StaleOrdering {
            valid: Timestamp::new(START),
            invalid: Timestamp::new(START),
        })
    );

    let proof = h.intersection_proof(first, 3, second, 0);
    let outcome = h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, second);
}

#[test]
fn shared_edge_counts_only_when_collinear_overlap_is_allowed() {
    let mut h = Harness::new();
    let older = h.land_plot(contour6());
    h.clock.advance(10);
    let newer = h.land_plot(contour7());
    h.activate();

    let mut proof = h.intersection_proof(older, 0, newer, 0);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::NoIntersectionFound)
    );
    assert!(h.registry.exists(newer));

    proof.exclude_collinear = false;
    let outcome = h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, newer);
    assert_eq!(h.reporter_balance(), DepositAmount::new(42));
}

#[test]
fn separated_contours_are_not_an_intersection() {
    let mut h = Harness::new();
    let a = h.land_plot(contour1());
    let b = h.land_plot(contour3());
    h.activate();

    let proof = h.intersection_proof(a, 3, b, 3);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::NoIntersectionFound)
    );
}

#[test]
fn different_token_types_never_conflict() {
    let mut h = Harness::new();
    let plot = h.land_plot(contour1());
    let building = h.token(TokenDetails::new(TokenType::Building, contour2()), 42);
    h.activate();

    let proof = h.intersection_proof(plot, 3, building, 0);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::TypeMismatch {
            valid: TokenType::LandPlot,
            invalid: TokenType::Building,
        })
    );
}

#[test]
fn burned_token_cannot_be_burned_twice() {
    let mut h = Harness::new();
    let older = h.land_plot(contour1());
    h.clock.advance(10);
    let newer = h.land_plot(contour2());
    h.activate();

    let proof = h.intersection_proof(older, 3, newer, 0);
    h.processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::Registry(RegistryError::TokenNotFound(
            newer
        )))
    );
    assert_eq!(h.reporter_balance(), DepositAmount::new(42));
}

#[test]
fn unbound_escrow_leaves_token_intact() {
    let mut h = Harness::new();
    let older = h.land_plot(contour1());
    h.clock.advance(10);
    let newer = h.land_plot(contour2());
    h.activate();

    let detached = NullEscrow::new();
    let processor = ReportProcessor::new(&*h.registry, &detached, &*h.clock);
    let proof = h.intersection_proof(older, 3, newer, 0);

    assert_eq!(
        processor.report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::Escrow(EscrowError::UnknownRegistry(
            RegistryId::new(1)
        )))
    );
    assert!(h.registry.exists(newer));
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[test]
fn rooms_with_disjoint_heights_do_not_conflict() {
    let mut h = Harness::new();
    let lower = h.room(contour1(), 20, 30);
    h.clock.advance(10);
    let upper = h.room(contour2(), 35, 40);
    h.activate();

    let proof = h.intersection_proof(lower, 3, upper, 0);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::HeightsDoNotOverlap)
    );
    assert!(h.registry.exists(upper));
}

#[test]
fn rooms_with_overlapping_heights_conflict() {
    let mut h = Harness::new();
    let lower = h.room(contour1(), 20, 30);
    h.clock.advance(10);
    let upper = h.room(contour2(), 25, 40);
    h.activate();

    let proof = h.intersection_proof(lower, 3, upper, 0);
    let outcome = h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, upper);
}

// ---------------------------------------------------------------------------
// Inclusion
// ---------------------------------------------------------------------------

#[test]
fn included_vertex_burns_the_newer_token() {
    let mut h = Harness::new();
    let outer = h.land_plot(contour1());
    h.clock.advance(10);
    let inner = h.land_plot(contour2());
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    let outcome = h
        .processor()
        .report_inclusion(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.kind, ReportKind::Inclusion);
    assert_eq!(outcome.burned, inner);
}

#[test]
fn coarse_vertex_tags_do_not_shield_an_included_token() {
    let mut h = Harness::new();
    let outer = h.land_plot(contour1());
    h.clock.advance(10);
    let inner = h.land_plot(coarsened(&contour2(), 8));
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    assert_eq!(proof.point.precision(), 8);
    let outcome = h
        .processor()
        .report_inclusion(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, inner);
}

#[test]
fn included_room_on_another_floor_is_not_a_conflict() {
    let mut h = Harness::new();
    let outer = h.room(contour1(), 20, 30);
    h.clock.advance(10);
    let inner = h.room(contour2(), 35, 40);
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    assert_eq!(
        h.processor().report_inclusion(&h.session, &h.reporter, &proof),
        Err(VerificationError::HeightsDoNotOverlap)
    );
    assert!(h.registry.exists(inner));
}

#[test]
fn uniqueness_claimed_by_one_room_does_not_block_the_report() {
    let mut h = Harness::new();
    let outer = h.unique_room(contour1(), "Main St 1, flat 4");
    h.clock.advance(10);
    let inner = h.room(contour2(), 0, 300);
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    let outcome = h
        .processor()
        .report_inclusion(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, inner);
}

#[test]
fn rooms_claiming_the_same_address_still_conflict() {
    let mut h = Harness::new();
    let outer = h.unique_room(contour1(), "Main St 1, flat 4");
    h.clock.advance(10);
    let inner = h.unique_room(contour2(), "Main St 1, flat 4");
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    let outcome = h
        .processor()
        .report_inclusion(&h.session, &h.reporter, &proof)
        .unwrap();
    assert_eq!(outcome.burned, inner);
}

#[test]
fn rooms_claiming_different_addresses_are_left_alone() {
    let mut h = Harness::new();
    let outer = h.unique_room(contour1(), "Main St 1, flat 4");
    h.clock.advance(10);
    let inner = h.unique_room(contour2(), "Main St 1, flat 5");
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 3);
    assert_eq!(
        h.processor().report_inclusion(&h.session, &h.reporter, &proof),
        Err(VerificationError::AmbiguousUniquenessClaim)
    );
    assert!(h.registry.exists(inner));
    assert_eq!(h.reporter_balance(), DepositAmount::ZERO);
}

#[test]
fn vertex_outside_is_not_an_inclusion() {
    let mut h = Harness::new();
    let outer = h.land_plot(contour1());
    let inner = h.land_plot(contour2());
    h.activate();

    let proof = h.inclusion_proof(outer, inner, InclusionType::BInsideA, 2);
    assert_eq!(
        h.processor().report_inclusion(&h.session, &h.reporter, &proof),
        Err(VerificationError::InclusionNotFound)
    );
}

// ---------------------------------------------------------------------------
// Session gating
// ---------------------------------------------------------------------------

#[test]
fn reports_wait_for_the_grace_period() {
    let mut h = Harness::new();
    let older = h.land_plot(contour1());
    h.clock.advance(10);
    let newer = h.land_plot(contour2());
    let proof = h.intersection_proof(older, 3, newer, 0);

    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::VerificationDisabled)
    );

    h.session
        .enable(DepositAmount::new(MINIMAL_DEPOSIT), 3600, h.clock.now())
        .unwrap();
    h.clock.advance(3599);
    assert_eq!(
        h.processor()
            .report_intersection(&h.session, &h.reporter, &proof),
        Err(VerificationError::VerificationDisabled)
    );

    h.clock.advance(1);
    assert!(h
        .processor()
        .report_intersection(&h.session, &h.reporter, &proof)
        .is_ok());
}

#[test]
fn disabling_stops_reports() {
    let mut h = Harness::new();
    let token = h.token(TokenDetails::new(TokenType::LandPlot, contour1()), 0);
    h.activate();
    h.session.disable().unwrap();
    h.clock.advance(10_000);

    assert_eq!(
        h.processor()
            .report_no_deposit(&h.session, &h.reporter, token),
        Err(VerificationError::VerificationDisabled)
    );
}

// ---------------------------------------------------------------------------
// No deposit
// ---------------------------------------------------------------------------

#[test]
fn underfunded_token_is_burned_once_old_enough() {
    let mut h = Harness::new();
    h.activate();
    let token = h.token(TokenDetails::new(TokenType::LandPlot, contour1()), 10);

    assert_eq!(
        h.processor().report_no_deposit(&h.session, &h.reporter, token),
        Err(VerificationError::TokenTooNew {
            token,
            eligible_at: Timestamp::new(START + 3600 + 3600),
        })
    );

    h.clock.advance(3600);
    let outcome = h
        .processor()
        .report_no_deposit(&h.session, &h.reporter, token)
        .unwrap();
    assert_eq!(outcome.kind, ReportKind::NoDeposit);
    assert_eq!(outcome.valid, None);
    assert_eq!(outcome.payout, DepositAmount::new(10));
    assert!(!h.registry.exists(token));
}

#[test]
fn sufficient_deposit_protects_the_token() {
    let mut h = Harness::new();
    let token = h.token(
        TokenDetails::new(TokenType::LandPlot, contour1()),
        MINIMAL_DEPOSIT,
    );
    h.activate();

    assert_eq!(
        h.processor().report_no_deposit(&h.session, &h.reporter, token),
        Err(VerificationError::InsufficientDeposit {
            token,
            balance: DepositAmount::new(MINIMAL_DEPOSIT),
            minimum: DepositAmount::new(MINIMAL_DEPOSIT),
        })
    );
}

#[test]
fn rooms_without_uniqueness_claim_need_no_deposit() {
    let mut h = Harness::new();
    let plain = h.token(TokenDetails::new(TokenType::Room, contour1()), 0);
    let unique = h.token(
        TokenDetails::new(TokenType::Room, contour2()).claiming_uniqueness("Main St 1, flat 4"),
        0,
    );
    h.activate();

    assert_eq!(
        h.processor().report_no_deposit(&h.session, &h.reporter, plain),
        Err(VerificationError::DoesNotClaimUniqueness(plain))
    );
    assert!(h
        .processor()
        .report_no_deposit(&h.session, &h.reporter, unique)
        .is_ok());
}

#[test]
fn unknown_token_is_rejected() {
    let mut h = Harness::new();
    h.activate();
    let missing = TokenId::new(404);
    assert_eq!(
        h.processor()
            .report_no_deposit(&h.session, &h.reporter, missing),
        Err(VerificationError::Registry(RegistryError::TokenNotFound(
            missing
        )))
    );
}
