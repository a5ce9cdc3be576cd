use crate::external::{AuctionSettings, InitParams};
use crate::pricing;
use crate::rating::{self, Rating};
use commons::{CustomContractError, LandId, Roles};
use concordium_std::*;

/// A standing application on a parcel. Both amounts are captured at
/// application time and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Application {
    pub bidder: AccountAddress,
    /// Escrowed with the application; refunded or forfeited, never partially.
    pub deposit: Amount,
    /// Price the bidder pays if they win.
    pub price: Amount,
}

/// Ledger record of a single parcel under auction. `min_price` and
/// `claim_period` are snapshots of the settings at opening time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct LandAuction {
    /// Moment bidding closes.
    pub end_time: Timestamp,
    pub min_price: Amount,
    pub claim_period: Duration,
    /// Cleared once the auction expires with a standing winner.
    pub is_active: bool,
    /// Applications since the last winner selection.
    pub applicants: Vec<Application>,
    /// The winner's full application, so the escrowed deposit follows the
    /// record until claim or fine.
    pub winner: Option<Application>,
}

/// One participant's standing position on a parcel, as reported by
/// `getUserApplications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct UserApplication {
    pub land: LandId,
    /// Escrowed deposit.
    pub deposit: Amount,
    /// Price captured at application time.
    pub price: Amount,
    /// Whether the participant currently stands as the parcel's winner.
    pub is_winner: bool,
}

/// A deposit to pay back once all ledger mutations are committed.
#[derive(Debug, PartialEq, Eq)]
pub struct Refund {
    pub account: AccountAddress,
    pub amount: Amount,
}

/// The auction contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Owner, admin and oracle role assignments.
    pub roles: Roles,
    /// Policy applied to auctions opened from now on.
    pub settings: AuctionSettings,
    /// Land registry contract holding parcel custody.
    pub registry: ContractAddress,
    /// Ledger record per parcel in a non-terminal state.
    pub auctions: StateMap<LandId, LandAuction, S>,
    /// Parcels currently accepting applications.
    pub for_sale: StateSet<LandId, S>,
    /// Parcels awaiting the winner's claim.
    pub for_transfer: StateSet<LandId, S>,
    /// Parcels claimed for good. Never re-enter bidding.
    pub sold: StateSet<LandId, S>,
    /// Reputation vectors, overwritten wholesale by the oracle.
    pub ratings: StateMap<AccountAddress, Rating, S>,
    /// Accumulated fines per participant. Never decremented.
    pub fines: StateMap<AccountAddress, u64, S>,
    /// Applications whose deposit is currently escrowed, per participant.
    pub pending_bids: StateMap<AccountAddress, u64, S>,
    /// Standing plus claimed wins, per participant.
    pub wins: StateMap<AccountAddress, u64, S>,
    /// Withdrawable funds: claim payments, forfeited deposits and direct
    /// top-ups. Escrowed deposits are not part of the treasury.
    pub treasury: Amount,
}

impl<S: HasStateApi> State<S> {
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        params: InitParams,
        origin: AccountAddress,
    ) -> Self {
        Self {
            roles: Roles::new(origin),
            settings: params.settings,
            registry: params.registry,
            auctions: state_builder.new_map(),
            for_sale: state_builder.new_set(),
            for_transfer: state_builder.new_set(),
            sold: state_builder.new_set(),
            ratings: state_builder.new_map(),
            fines: state_builder.new_map(),
            pending_bids: state_builder.new_map(),
            wins: state_builder.new_map(),
            treasury: Amount::zero(),
        }
    }

    pub fn rating_score(&self, account: &AccountAddress) -> u64 {
        self.ratings
            .get(account)
            .map(|rating| rating::score(&rating))
            .unwrap_or(0)
    }

    pub fn fines_of(&self, account: &AccountAddress) -> u64 {
        self.fines.get(account).map(|count| *count).unwrap_or(0)
    }

    pub fn pending_bids_of(&self, account: &AccountAddress) -> u64 {
        self.pending_bids
            .get(account)
            .map(|count| *count)
            .unwrap_or(0)
    }

    pub fn wins_of(&self, account: &AccountAddress) -> u64 {
        self.wins.get(account).map(|count| *count).unwrap_or(0)
    }

    /// Deposit the participant must escrow with their next application.
    pub fn required_deposit_for(&self, account: &AccountAddress) -> Amount {
        pricing::required_deposit(
            self.settings.min_deposit,
            self.pending_bids_of(account),
            self.fines_of(account),
        )
    }

    /// Every position one participant holds across the ledger: applications
    /// awaiting selection and standing wins awaiting their claim. Refunded,
    /// claimed and fined positions no longer appear.
    pub fn applications_of(&self, account: &AccountAddress) -> Vec<UserApplication> {
        let mut applications = Vec::new();
        for (id, auction) in self.auctions.iter() {
            for application in auction.applicants.iter() {
                if application.bidder == *account {
                    applications.push(UserApplication {
                        land: *id,
                        deposit: application.deposit,
                        price: application.price,
                        is_winner: false,
                    });
                }
            }
            if let Some(winner) = auction.winner.as_ref() {
                if winner.bidder == *account {
                    applications.push(UserApplication {
                        land: *id,
                        deposit: winner.deposit,
                        price: winner.price,
                        is_winner: true,
                    });
                }
            }
        }
        applications
    }

    /// Open a parcel for bidding unless it is already in play or sold.
    /// Returns whether a record was created.
    pub fn open_auction(&mut self, id: LandId, end_time: Timestamp) -> bool {
        if self.sold.contains(&id) || self.auctions.get(&id).is_some() {
            return false;
        }
        self.auctions.insert(
            id,
            LandAuction {
                end_time,
                min_price: self.settings.min_price,
                claim_period: self.settings.claim_period,
                is_active: true,
                applicants: Vec::new(),
                winner: None,
            },
        );
        self.for_sale.insert(id);
        true
    }

    /// Record an application with its escrowed deposit. The price is captured
    /// now, against the parcel snapshot and the bidder's standing.
    pub fn apply_for_land(
        &mut self,
        id: &LandId,
        bidder: AccountAddress,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), CustomContractError> {
        let (min_price, applicant_count) = {
            let auction = self
                .auctions
                .get(id)
                .ok_or(CustomContractError::AuctionNotExists)?;
            ensure!(
                auction.is_active && now < auction.end_time,
                CustomContractError::AuctionHasEnded
            );
            let already_in = auction
                .applicants
                .iter()
                .any(|application| application.bidder == bidder)
                || auction
                    .winner
                    .as_ref()
                    .map(|winner| winner.bidder == bidder)
                    .unwrap_or(false);
            ensure!(!already_in, CustomContractError::AlreadyApplied);
            (auction.min_price, auction.applicants.len() as u64)
        };

        ensure!(
            amount >= self.required_deposit_for(&bidder),
            CustomContractError::InsufficientFunds
        );
        let price = pricing::required_price(min_price, self.wins_of(&bidder), applicant_count);

        let mut auction = self
            .auctions
            .get_mut(id)
            .ok_or(CustomContractError::AuctionNotExists)?;
        auction.applicants.push(Application {
            bidder,
            deposit: amount,
            price,
        });
        Self::increment(&mut self.pending_bids, &bidder);
        Ok(())
    }

    /// Sweep every parcel still accepting applications: promote the best
    /// rated applicant, queue refunds for the rest, and move expired auctions
    /// to the claim stage (or drop them when nobody ever applied). Refunds
    /// are returned so transfers happen only after all mutations committed.
    pub fn resolve_auctions(&mut self, now: Timestamp) -> Vec<Refund> {
        let ids: Vec<LandId> = self.for_sale.iter().map(|id| *id).collect();
        let mut refunds = Vec::new();

        for id in ids {
            let mut auction = match self.auctions.get(&id).map(|auction| auction.clone()) {
                Some(auction) => auction,
                None => continue,
            };

            if !auction.applicants.is_empty() {
                let index = self.winner_index(&auction.applicants);
                let chosen = auction.applicants.remove(index);
                for application in auction.applicants.drain(..) {
                    Self::decrement(&mut self.pending_bids, &application.bidder);
                    refunds.push(Refund {
                        account: application.bidder,
                        amount: application.deposit,
                    });
                }
                if let Some(displaced) = auction.winner.take() {
                    Self::decrement(&mut self.wins, &displaced.bidder);
                    Self::decrement(&mut self.pending_bids, &displaced.bidder);
                    refunds.push(Refund {
                        account: displaced.bidder,
                        amount: displaced.deposit,
                    });
                }
                Self::increment(&mut self.wins, &chosen.bidder);
                auction.winner = Some(chosen);
            }

            if auction.end_time <= now {
                if auction.winner.is_some() {
                    auction.is_active = false;
                    self.for_sale.remove(&id);
                    self.for_transfer.insert(id);
                    self.auctions.insert(id, auction);
                } else {
                    // Nobody ever applied. Drop the record so the parcel can
                    // be opened again later.
                    self.auctions.remove(&id);
                    self.for_sale.remove(&id);
                }
            } else {
                self.auctions.insert(id, auction);
            }
        }

        refunds
    }

    /// Settle a winner's claim payment. Credits exactly the captured price to
    /// the treasury and returns the amount to send back to the winner: their
    /// escrowed deposit plus any overpayment.
    pub fn settle_claim(
        &mut self,
        id: &LandId,
        caller: AccountAddress,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, CustomContractError> {
        ensure!(!self.sold.contains(id), CustomContractError::AlreadySold);
        let auction = self
            .auctions
            .get(id)
            .map(|auction| auction.clone())
            .ok_or(CustomContractError::AuctionNotExists)?;
        ensure!(!auction.is_active, CustomContractError::AuctionIsActive);
        let winner = auction
            .winner
            .ok_or(CustomContractError::AuctionNotExists)?;
        ensure!(winner.bidder == caller, CustomContractError::NotWinner);
        if let Some(deadline) = auction.end_time.checked_add(auction.claim_period) {
            ensure!(now <= deadline, CustomContractError::ClaimExpired);
        }
        ensure!(amount >= winner.price, CustomContractError::BidTooLow);

        self.treasury += winner.price;
        self.auctions.remove(id);
        self.for_transfer.remove(id);
        self.sold.insert(*id);
        Self::decrement(&mut self.pending_bids, &caller);

        Ok(winner.deposit + (amount - winner.price))
    }

    /// Fine every winner whose claim window has lapsed: forfeit their deposit
    /// to the treasury, bump their fine counter, void the win and drop the
    /// record. Returns the fined accounts.
    pub fn sweep_fines(&mut self, now: Timestamp) -> Vec<AccountAddress> {
        let ids: Vec<LandId> = self.for_transfer.iter().map(|id| *id).collect();
        let mut fined = Vec::new();

        for id in ids {
            let auction = match self.auctions.get(&id).map(|auction| auction.clone()) {
                Some(auction) => auction,
                None => continue,
            };
            let expired = auction
                .end_time
                .checked_add(auction.claim_period)
                .map(|deadline| deadline < now)
                .unwrap_or(false);
            if !expired {
                continue;
            }

            if let Some(winner) = auction.winner {
                Self::increment(&mut self.fines, &winner.bidder);
                Self::decrement(&mut self.wins, &winner.bidder);
                Self::decrement(&mut self.pending_bids, &winner.bidder);
                self.treasury += winner.deposit;
                fined.push(winner.bidder);
            }
            self.auctions.remove(&id);
            self.for_transfer.remove(&id);
        }

        fined
    }

    /// Index of the applicant with the highest reputation score. Exact ties
    /// break toward the earliest application.
    fn winner_index(&self, applicants: &[Application]) -> usize {
        let mut best = 0;
        let mut best_score = self.rating_score(&applicants[0].bidder);
        for (index, application) in applicants.iter().enumerate().skip(1) {
            let score = self.rating_score(&application.bidder);
            if score > best_score {
                best = index;
                best_score = score;
            }
        }
        best
    }

    fn increment(map: &mut StateMap<AccountAddress, u64, S>, account: &AccountAddress) {
        let current = map.get(account).map(|count| *count).unwrap_or(0);
        map.insert(*account, current + 1);
    }

    fn decrement(map: &mut StateMap<AccountAddress, u64, S>, account: &AccountAddress) {
        let current = map.get(account).map(|count| *count).unwrap_or(0);
        map.insert(*account, current.saturating_sub(1));
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([1; 32]);
    const ALICE: AccountAddress = AccountAddress([4; 32]);
    const BOB: AccountAddress = AccountAddress([5; 32]);
    const CAROL: AccountAddress = AccountAddress([6; 32]);

    const REGISTRY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const LAND_1: LandId = TokenIdU64(1);
    const LAND_2: LandId = TokenIdU64(2);

    fn ts(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    fn fresh_state(state_builder: &mut TestStateBuilder) -> State<TestStateApi> {
        State::new(
            state_builder,
            InitParams {
                registry: REGISTRY,
                settings: AuctionSettings::default_settings(),
            },
            OWNER,
        )
    }

    #[concordium_test]
    fn test_open_auction_guards() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);

        claim!(state.open_auction(LAND_1, ts(100)));
        // Re-opening an in-play parcel is a silent no-op.
        claim!(!state.open_auction(LAND_1, ts(200)));
        claim!(state.for_sale.contains(&LAND_1));

        // Sold parcels never re-enter.
        state.sold.insert(LAND_2);
        claim!(!state.open_auction(LAND_2, ts(100)));
    }

    #[concordium_test]
    fn test_apply_checks() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));

        let result = state.apply_for_land(&LAND_2, ALICE, Amount::from_ccd(1), ts(10));
        claim_eq!(result, Err(CustomContractError::AuctionNotExists));

        let result = state.apply_for_land(&LAND_1, ALICE, Amount::from_micro_ccd(1), ts(10));
        claim_eq!(result, Err(CustomContractError::InsufficientFunds));

        let result = state.apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10));
        claim_eq!(result, Ok(()));
        claim_eq!(state.pending_bids_of(&ALICE), 1);

        let result = state.apply_for_land(&LAND_1, ALICE, Amount::from_ccd(2), ts(20));
        claim_eq!(result, Err(CustomContractError::AlreadyApplied));

        let result = state.apply_for_land(&LAND_1, BOB, Amount::from_ccd(1), ts(100));
        claim_eq!(result, Err(CustomContractError::AuctionHasEnded));
    }

    #[concordium_test]
    fn test_captured_price_counts_crowd_and_wins() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));

        // Fresh bidder, empty list: 10 + 1 + 0.
        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        // Second in line pays the crowd term: 10 + 1 + 1.
        state
            .apply_for_land(&LAND_1, BOB, Amount::from_ccd(1), ts(11))
            .expect_report("Apply failed");
        // A standing win doubles the win term: 10 + 2 + 2.
        state.wins.insert(CAROL, 1);
        state
            .apply_for_land(&LAND_1, CAROL, Amount::from_ccd(1), ts(12))
            .expect_report("Apply failed");

        let auction = state.auctions.get(&LAND_1).expect_report("Missing record");
        claim_eq!(auction.applicants[0].price, Amount::from_ccd(11));
        claim_eq!(auction.applicants[1].price, Amount::from_ccd(12));
        claim_eq!(auction.applicants[2].price, Amount::from_ccd(14));
    }

    #[concordium_test]
    fn test_resolve_ties_break_to_earliest() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));

        // Neither bidder is rated, so scores tie at zero.
        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        state
            .apply_for_land(&LAND_1, BOB, Amount::from_ccd(1), ts(11))
            .expect_report("Apply failed");

        let refunds = state.resolve_auctions(ts(50));

        let auction = state.auctions.get(&LAND_1).expect_report("Missing record");
        let winner = auction.winner.as_ref().expect_report("No winner");
        claim_eq!(winner.bidder, ALICE);
        // Bidding continues until the end time.
        claim!(auction.is_active);
        claim!(state.for_sale.contains(&LAND_1));
        claim_eq!(
            refunds,
            vec![Refund {
                account: BOB,
                amount: Amount::from_ccd(1),
            }]
        );
        claim_eq!(state.pending_bids_of(&ALICE), 1);
        claim_eq!(state.pending_bids_of(&BOB), 0);
        claim_eq!(state.wins_of(&ALICE), 1);
    }

    #[concordium_test]
    fn test_resolve_picks_best_rated() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));
        state.ratings.insert(
            BOB,
            Rating {
                deals_completed: 30,
                turnover: 920,
                holdings: 250,
                tenure: 4,
                references: 2,
                checks_passed: 1,
                endorsements: 8,
            },
        );

        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        state
            .apply_for_land(&LAND_1, BOB, Amount::from_ccd(1), ts(11))
            .expect_report("Apply failed");

        state.resolve_auctions(ts(50));

        let auction = state.auctions.get(&LAND_1).expect_report("Missing record");
        claim_eq!(
            auction.winner.as_ref().map(|winner| winner.bidder),
            Some(BOB)
        );
    }

    #[concordium_test]
    fn test_resolve_displaces_provisional_winner() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));

        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        state.resolve_auctions(ts(20));
        claim_eq!(state.wins_of(&ALICE), 1);

        // A better rated bidder shows up before the end time.
        state.ratings.insert(
            BOB,
            Rating {
                deals_completed: 10,
                turnover: 0,
                holdings: 0,
                tenure: 0,
                references: 0,
                checks_passed: 0,
                endorsements: 0,
            },
        );
        state
            .apply_for_land(&LAND_1, BOB, Amount::from_ccd(1), ts(30))
            .expect_report("Apply failed");
        let refunds = state.resolve_auctions(ts(40));

        let auction = state.auctions.get(&LAND_1).expect_report("Missing record");
        claim_eq!(
            auction.winner.as_ref().map(|winner| winner.bidder),
            Some(BOB)
        );
        // The displaced winner got their escrow back and the win voided.
        claim_eq!(
            refunds,
            vec![Refund {
                account: ALICE,
                amount: Amount::from_ccd(1),
            }]
        );
        claim_eq!(state.wins_of(&ALICE), 0);
        claim_eq!(state.pending_bids_of(&ALICE), 0);
        claim_eq!(state.wins_of(&BOB), 1);
    }

    #[concordium_test]
    fn test_resolve_expired_transitions() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));
        state.open_auction(LAND_2, ts(100));

        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");

        state.resolve_auctions(ts(100));

        // Land 1 moved to the claim stage.
        let auction = state.auctions.get(&LAND_1).expect_report("Missing record");
        claim!(!auction.is_active);
        claim!(!state.for_sale.contains(&LAND_1));
        claim!(state.for_transfer.contains(&LAND_1));

        // Land 2 never saw an applicant and was dropped.
        claim!(state.auctions.get(&LAND_2).is_none());
        claim!(!state.for_sale.contains(&LAND_2));
        claim!(state.open_auction(LAND_2, ts(200)));
    }

    #[concordium_test]
    fn test_settle_claim() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));
        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        state.resolve_auctions(ts(100));

        // Still pending checks.
        let result = state.settle_claim(&LAND_1, BOB, Amount::from_ccd(11), ts(150));
        claim_eq!(result, Err(CustomContractError::NotWinner));
        let result = state.settle_claim(&LAND_1, ALICE, Amount::from_ccd(10), ts(150));
        claim_eq!(result, Err(CustomContractError::BidTooLow));

        // Payment of 12 against a price of 11: deposit 1 + overpayment 1 back.
        let refund = state
            .settle_claim(&LAND_1, ALICE, Amount::from_ccd(12), ts(150))
            .expect_report("Claim failed");
        claim_eq!(refund, Amount::from_ccd(2));
        claim_eq!(state.treasury, Amount::from_ccd(11));
        claim!(state.sold.contains(&LAND_1));
        claim!(!state.for_transfer.contains(&LAND_1));
        claim!(state.auctions.get(&LAND_1).is_none());
        claim_eq!(state.pending_bids_of(&ALICE), 0);
        // The claimed win keeps pricing future bids.
        claim_eq!(state.wins_of(&ALICE), 1);

        let result = state.settle_claim(&LAND_1, ALICE, Amount::from_ccd(12), ts(150));
        claim_eq!(result, Err(CustomContractError::AlreadySold));
    }

    #[concordium_test]
    fn test_settle_claim_window() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));
        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");

        // Claiming while bidding is still open is rejected.
        state.resolve_auctions(ts(50));
        let result = state.settle_claim(&LAND_1, ALICE, Amount::from_ccd(11), ts(60));
        claim_eq!(result, Err(CustomContractError::AuctionIsActive));

        state.resolve_auctions(ts(100));
        let deadline = ts(100)
            .checked_add(Duration::from_days(7))
            .expect_report("Deadline overflow");
        let result = state.settle_claim(
            &LAND_1,
            ALICE,
            Amount::from_ccd(11),
            deadline.checked_add(Duration::from_millis(1)).expect_report("Overflow"),
        );
        claim_eq!(result, Err(CustomContractError::ClaimExpired));
    }

    #[concordium_test]
    fn test_sweep_fines() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = fresh_state(&mut state_builder);
        state.open_auction(LAND_1, ts(100));
        state
            .apply_for_land(&LAND_1, ALICE, Amount::from_ccd(1), ts(10))
            .expect_report("Apply failed");
        state.resolve_auctions(ts(100));

        // Window still open: nothing happens.
        claim_eq!(state.sweep_fines(ts(200)), Vec::new());
        claim!(state.for_transfer.contains(&LAND_1));

        let past_deadline = ts(100)
            .checked_add(Duration::from_days(8))
            .expect_report("Deadline overflow");
        let fined = state.sweep_fines(past_deadline);
        claim_eq!(fined, vec![ALICE]);
        claim_eq!(state.fines_of(&ALICE), 1);
        claim_eq!(state.wins_of(&ALICE), 0);
        claim_eq!(state.pending_bids_of(&ALICE), 0);
        // The forfeited deposit landed in the treasury.
        claim_eq!(state.treasury, Amount::from_ccd(1));
        claim!(state.auctions.get(&LAND_1).is_none());
        claim!(!state.for_transfer.contains(&LAND_1));

        // The parcel can be auctioned again, and the fine now prices Alice's
        // next deposit.
        claim!(state.open_auction(LAND_1, ts(1000)));
        claim_eq!(state.required_deposit_for(&ALICE), Amount::from_ccd(2));
    }
}
