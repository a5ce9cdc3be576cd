use crate::{events::*, external::*, pricing, registry, state::*};
use commons::{Capability, CustomContractError, LandId, NULL_ADDRESS};
use concordium_std::*;

type ContractResult<A> = Result<A, CustomContractError>;

fn account_sender(ctx: &impl HasReceiveContext) -> ContractResult<AccountAddress> {
    match ctx.sender() {
        Address::Account(account) => Ok(account),
        Address::Contract(_) => Err(CustomContractError::InvalidAddress),
    }
}

/// Initialize the auction with the registry address and the starting policy.
/// The instantiating account becomes owner, admin and oracle.
#[init(contract = "land-auction", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;
    Ok(State::new(state_builder, params, ctx.init_origin()))
}

/// Open a batch of parcels for bidding until `end_time` and pull their
/// custody into this contract via the registry. Parcels already in play or
/// sold are silently skipped, so the batch is idempotent.
///
/// It rejects if:
/// - The sender holds neither the owner nor the admin role.
/// - It fails to parse the parameter.
/// - The end time is not in the future.
/// - A registry invocation fails.
#[receive(
    contract = "land-auction",
    name = "startReceivingApplications",
    parameter = "OpenParams",
    mutable
)]
fn start_receiving_applications<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params: OpenParams = ctx.parameter_cursor().get()?;
    let now = ctx.metadata().slot_time();
    ensure!(
        host.state()
            .roles
            .has_capability(&ctx.sender(), Capability::Admin),
        CustomContractError::NotAuthorized
    );
    ensure!(params.end_time > now, CustomContractError::InvalidEndTime);

    let registry_address = host.state().registry;
    let custodian = Address::Contract(ctx.self_address());

    let mut opened = Vec::new();
    {
        let state = host.state_mut();
        for id in params.lands {
            if state.open_auction(id, params.end_time) {
                opened.push(id);
            }
        }
    }

    // Ledger records are committed. Pull custody of every newly opened
    // parcel.
    for id in opened {
        registry::mint_if_absent(host, &registry_address, id, custodian)?;
        let holder = registry::owner_of(host, &registry_address, id)?;
        if holder != custodian {
            registry::transfer(host, &registry_address, id, holder, custodian)?;
        }
    }

    Ok(())
}

/// Apply for a parcel, escrowing the attached amount as the deposit. The
/// price the applicant would pay on winning is captured now.
///
/// It rejects if:
/// - The sender is a contract.
/// - It fails to parse the parameter.
/// - No auction record exists for the parcel.
/// - Bidding has ended.
/// - The sender already stands in this auction.
/// - The attached amount is below the required deposit.
#[receive(
    contract = "land-auction",
    name = "applicationNFT",
    parameter = "LandParams",
    mutable,
    payable
)]
fn application_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
) -> ContractResult<()> {
    let params: LandParams = ctx.parameter_cursor().get()?;
    let bidder = account_sender(ctx)?;
    let now = ctx.metadata().slot_time();

    host.state_mut()
        .apply_for_land(&params.land, bidder, amount, now)
}

/// Deposit the sender would have to escrow with their next application.
#[receive(
    contract = "land-auction",
    name = "depositForSender",
    return_value = "Amount"
)]
fn deposit_for_sender<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let sender = account_sender(ctx)?;
    Ok(host.state().required_deposit_for(&sender))
}

/// Price the sender would capture by applying for the given parcel now.
///
/// It rejects if no auction record exists for the parcel.
#[receive(
    contract = "land-auction",
    name = "priceForSender",
    parameter = "LandParams",
    return_value = "Amount"
)]
fn price_for_sender<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let params: LandParams = ctx.parameter_cursor().get()?;
    let sender = account_sender(ctx)?;
    let state = host.state();
    let auction = state
        .auctions
        .get(&params.land)
        .ok_or(CustomContractError::AuctionNotExists)?;
    Ok(pricing::required_price(
        auction.min_price,
        state.wins_of(&sender),
        auction.applicants.len() as u64,
    ))
}

/// Sweep every open auction: promote the best rated applicant per parcel,
/// refund everyone else, and move expired auctions to the claim stage.
/// Idempotent and safe to call at any time.
///
/// It rejects if:
/// - The sender holds neither the oracle nor the admin role.
/// - A refund transfer fails.
#[receive(contract = "land-auction", name = "setWinner", mutable)]
fn set_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        host.state()
            .roles
            .has_capability(&ctx.sender(), Capability::Oracle),
        CustomContractError::NotAuthorized
    );
    let now = ctx.metadata().slot_time();

    let refunds = host.state_mut().resolve_auctions(now);
    for refund in refunds {
        host.invoke_transfer(&refund.account, refund.amount)?;
    }

    Ok(())
}

/// Pay for a won parcel. Credits the captured price to the treasury, hands
/// the parcel over via the registry, and sends the winner their escrowed
/// deposit plus any overpayment.
///
/// It rejects if:
/// - The sender is a contract.
/// - It fails to parse the parameter.
/// - The parcel was already sold, has no record, or is still accepting bids.
/// - The sender is not the recorded winner.
/// - The claim window has lapsed.
/// - The attached amount is below the captured price.
/// - A registry invocation or the refund transfer fails.
#[receive(
    contract = "land-auction",
    name = "transferLandToWinner",
    parameter = "LandParams",
    mutable,
    payable
)]
fn transfer_land_to_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
) -> ContractResult<()> {
    let params: LandParams = ctx.parameter_cursor().get()?;
    let caller = account_sender(ctx)?;
    let now = ctx.metadata().slot_time();
    let registry_address = host.state().registry;

    let refund = host
        .state_mut()
        .settle_claim(&params.land, caller, amount, now)?;

    registry::transfer(
        host,
        &registry_address,
        params.land,
        Address::Contract(ctx.self_address()),
        Address::Account(caller),
    )?;
    if refund > Amount::zero() {
        host.invoke_transfer(&caller, refund)?;
    }

    Ok(())
}

/// Fine every winner whose claim window has lapsed: their deposit is
/// forfeited to the treasury and the parcel becomes re-openable. Returns the
/// fined accounts, empty when there was nothing to do.
///
/// It rejects if:
/// - The sender holds neither the oracle nor the admin role.
#[receive(
    contract = "land-auction",
    name = "setFines",
    mutable,
    return_value = "Vec<AccountAddress>"
)]
fn set_fines<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<AccountAddress>> {
    ensure!(
        host.state()
            .roles
            .has_capability(&ctx.sender(), Capability::Oracle),
        CustomContractError::NotAuthorized
    );
    let now = ctx.metadata().slot_time();
    Ok(host.state_mut().sweep_fines(now))
}

/// Overwrite a participant's reputation vector.
///
/// It rejects if:
/// - The sender holds neither the oracle nor the admin role.
/// - It fails to parse the parameter.
#[receive(
    contract = "land-auction",
    name = "setRating",
    parameter = "RatingParams",
    mutable
)]
fn set_rating<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        host.state()
            .roles
            .has_capability(&ctx.sender(), Capability::Oracle),
        CustomContractError::NotAuthorized
    );
    let params: RatingParams = ctx.parameter_cursor().get()?;
    host.state_mut().ratings.insert(params.account, params.rating);
    Ok(())
}

/// Reputation score per queried participant, zero for unrated accounts.
#[receive(
    contract = "land-auction",
    name = "getRatings",
    parameter = "AccountsParams",
    return_value = "Vec<u64>"
)]
fn get_ratings<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<u64>> {
    let params: AccountsParams = ctx.parameter_cursor().get()?;
    let state = host.state();
    Ok(params
        .accounts
        .iter()
        .map(|account| state.rating_score(account))
        .collect())
}

/// Standing winner of a parcel, `None` while nobody has been promoted.
///
/// It rejects if no auction record exists for the parcel.
#[receive(
    contract = "land-auction",
    name = "getWinner",
    parameter = "LandParams",
    return_value = "WinnerResponse"
)]
fn get_winner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<WinnerResponse> {
    let params: LandParams = ctx.parameter_cursor().get()?;
    let auction = host
        .state()
        .auctions
        .get(&params.land)
        .ok_or(CustomContractError::AuctionNotExists)?;
    Ok(WinnerResponse {
        winner: auction.winner.as_ref().map(|winner| WinnerInfo {
            account: winner.bidder,
            price: winner.price,
        }),
    })
}

/// Applications standing on a parcel since the last winner selection.
///
/// It rejects if no auction record exists for the parcel.
#[receive(
    contract = "land-auction",
    name = "getApplicantsByLand",
    parameter = "LandParams",
    return_value = "ApplicantsResponse"
)]
fn get_applicants_by_land<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ApplicantsResponse> {
    let params: LandParams = ctx.parameter_cursor().get()?;
    let auction = host
        .state()
        .auctions
        .get(&params.land)
        .ok_or(CustomContractError::AuctionNotExists)?;
    Ok(ApplicantsResponse {
        applicants: auction.applicants.clone(),
    })
}

/// Parcels currently accepting applications.
#[receive(
    contract = "land-auction",
    name = "getAllLandsForSale",
    return_value = "Vec<LandId>"
)]
fn get_all_lands_for_sale<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<LandId>> {
    Ok(host.state().for_sale.iter().map(|id| *id).collect())
}

/// Parcels awaiting their winner's claim payment.
#[receive(
    contract = "land-auction",
    name = "getAllLandsForTransfer",
    return_value = "Vec<LandId>"
)]
fn get_all_lands_for_transfer<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<LandId>> {
    Ok(host.state().for_transfer.iter().map(|id| *id).collect())
}

/// Accumulated fine counter per queried participant.
#[receive(
    contract = "land-auction",
    name = "getFines",
    parameter = "AccountsParams",
    return_value = "Vec<u64>"
)]
fn get_fines<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<u64>> {
    let params: AccountsParams = ctx.parameter_cursor().get()?;
    let state = host.state();
    Ok(params
        .accounts
        .iter()
        .map(|account| state.fines_of(account))
        .collect())
}

/// Every position a participant holds across the ledger: applications
/// awaiting selection and standing wins awaiting their claim.
#[receive(
    contract = "land-auction",
    name = "getUserApplications",
    parameter = "AccountParams",
    return_value = "UserApplicationsResponse"
)]
fn get_user_applications<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<UserApplicationsResponse> {
    let params: AccountParams = ctx.parameter_cursor().get()?;
    Ok(UserApplicationsResponse {
        applications: host.state().applications_of(&params.account),
    })
}

/// Current roles, policy, treasury and parcel counts.
#[receive(
    contract = "land-auction",
    name = "getContractStatus",
    return_value = "ContractStatusResponse"
)]
fn get_contract_status<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractStatusResponse> {
    let state = host.state();
    Ok(ContractStatusResponse {
        roles: state.roles.clone(),
        settings: state.settings,
        treasury: state.treasury,
        lands_for_sale: state.for_sale.iter().count() as u64,
        lands_for_transfer: state.for_transfer.iter().count() as u64,
        lands_sold: state.sold.iter().count() as u64,
    })
}

/// Pay out treasury funds. Escrowed deposits are not part of the treasury
/// and can never be withdrawn.
///
/// It rejects if:
/// - The sender is not the owner.
/// - It fails to parse the parameter.
/// - The requested amount exceeds the treasury.
/// - It fails to log the event or the transfer fails.
#[receive(
    contract = "land-auction",
    name = "withdrawTokens",
    parameter = "WithdrawParams",
    mutable,
    enable_logger
)]
fn withdraw_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: WithdrawParams = ctx.parameter_cursor().get()?;
    let by = account_sender(ctx)?;

    let state = host.state_mut();
    ensure!(
        state.roles.has_capability(&ctx.sender(), Capability::Owner),
        CustomContractError::NotAuthorized
    );
    ensure!(
        params.amount <= state.treasury,
        CustomContractError::InsufficientBalance
    );
    state.treasury -= params.amount;

    logger.log(&AuctionEvent::FundsWithdrawn {
        by,
        to: params.to,
        amount: params.amount,
    })?;
    host.invoke_transfer(&params.to, params.amount)?;

    Ok(())
}

/// Top the treasury up directly.
#[receive(
    contract = "land-auction",
    name = "fund",
    mutable,
    payable,
    enable_logger
)]
fn fund<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let from = account_sender(ctx)?;
    host.state_mut().treasury += amount;
    logger.log(&AuctionEvent::FundsReceived { from, amount })?;
    Ok(())
}

/// Appoint a new admin. Owner or current admin.
#[receive(
    contract = "land-auction",
    name = "changeAdmin",
    parameter = "NewAdminParams",
    mutable,
    enable_logger
)]
fn change_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: NewAdminParams = ctx.parameter_cursor().get()?;
    host.state_mut()
        .roles
        .change_admin(&ctx.sender(), params.admin)?;
    logger.log(&AuctionEvent::AdminChanged {
        by: ctx.sender(),
        new_admin: params.admin,
    })?;
    Ok(())
}

/// Appoint a new oracle. Owner or admin.
#[receive(
    contract = "land-auction",
    name = "changeOracle",
    parameter = "NewOracleParams",
    mutable,
    enable_logger
)]
fn change_oracle<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: NewOracleParams = ctx.parameter_cursor().get()?;
    host.state_mut()
        .roles
        .change_oracle(&ctx.sender(), params.oracle)?;
    logger.log(&AuctionEvent::OracleChanged {
        by: ctx.sender(),
        new_oracle: params.oracle,
    })?;
    Ok(())
}

/// Hand the ownership over. Owner only.
#[receive(
    contract = "land-auction",
    name = "transferOwnership",
    parameter = "NewOwnerParams",
    mutable,
    enable_logger
)]
fn transfer_ownership<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: NewOwnerParams = ctx.parameter_cursor().get()?;
    let previous = account_sender(ctx)?;
    host.state_mut()
        .roles
        .transfer_ownership(&ctx.sender(), params.owner)?;
    logger.log(&AuctionEvent::OwnershipTransferred {
        previous,
        new_owner: params.owner,
    })?;
    Ok(())
}

/// Revoke the ownership permanently. Owner only. Treasury withdrawal and
/// ownership transfer become impossible afterwards.
#[receive(
    contract = "land-auction",
    name = "renounceOwnership",
    mutable,
    enable_logger
)]
fn renounce_ownership<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let previous = account_sender(ctx)?;
    host.state_mut().roles.renounce_ownership(&ctx.sender())?;
    logger.log(&AuctionEvent::OwnershipTransferred {
        previous,
        new_owner: NULL_ADDRESS,
    })?;
    Ok(())
}

/// Change the deposit and price policy. Auctions already open keep the
/// snapshot they were created with.
///
/// It rejects if:
/// - The sender holds neither the owner nor the admin role.
/// - It fails to parse the parameter.
/// - It fails to log the event.
#[receive(
    contract = "land-auction",
    name = "changeAuctionSettings",
    parameter = "AuctionSettings",
    mutable,
    enable_logger
)]
fn change_auction_settings<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure!(
        host.state()
            .roles
            .has_capability(&ctx.sender(), Capability::Admin),
        CustomContractError::NotAuthorized
    );
    let settings: AuctionSettings = ctx.parameter_cursor().get()?;
    host.state_mut().settings = settings;
    logger.log(&AuctionEvent::SettingsChanged {
        by: ctx.sender(),
        settings,
    })?;
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use commons::{MintIfAbsentParams, OwnerOfParams, OwnerOfResponse, RegistryTransferParams};
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([1; 32]);
    const ORACLE: AccountAddress = AccountAddress([3; 32]);
    const ALICE: AccountAddress = AccountAddress([16; 32]);
    const BOB: AccountAddress = AccountAddress([17; 32]);

    const REGISTRY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };

    const LAND_1: LandId = TokenIdU64(1);
    const LAND_2: LandId = TokenIdU64(2);

    const DAY_MILLIS: u64 = 24 * 60 * 60 * 1000;

    fn ts(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    fn receive_ctx(
        sender: AccountAddress,
        parameter_bytes: &[u8],
        slot_millis: u64,
    ) -> TestReceiveContext<'_> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(SELF_ADDRESS)
            .set_parameter(parameter_bytes)
            .set_metadata_slot_time(ts(slot_millis));
        ctx
    }

    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let params = InitParams {
            registry: REGISTRY,
            settings: AuctionSettings::default_settings(),
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(OWNER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = init(&ctx, &mut state_builder).expect_report("Init failed");
        let mut host = TestHost::new(state, state_builder);

        let bytes = to_bytes(&NewOracleParams { oracle: ORACLE });
        let ctx = receive_ctx(OWNER, &bytes, 0);
        let mut logger = TestLogger::init();
        change_oracle(&ctx, &mut host, &mut logger).expect_report("Appointing oracle failed");

        host
    }

    /// Registry mocks for the happy path: parcels get minted straight to the
    /// auction contract, so no custody transfer is needed at opening.
    fn mock_registry(host: &mut TestHost<State<TestStateApi>>) {
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("mintIfAbsent")),
            parse_and_ok_mock::<MintIfAbsentParams, _>(()),
        );
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("ownerOf")),
            parse_and_ok_mock::<OwnerOfParams, _>(OwnerOfResponse {
                owner: Address::Contract(SELF_ADDRESS),
            }),
        );
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            parse_and_ok_mock::<RegistryTransferParams, _>(()),
        );
    }

    fn open_lands(
        host: &mut TestHost<State<TestStateApi>>,
        lands: Vec<LandId>,
        end_millis: u64,
        at_millis: u64,
    ) {
        mock_registry(host);
        let bytes = to_bytes(&OpenParams {
            end_time: ts(end_millis),
            lands,
        });
        let ctx = receive_ctx(OWNER, &bytes, at_millis);
        start_receiving_applications(&ctx, host).expect_report("Opening failed");
    }

    fn apply(
        host: &mut TestHost<State<TestStateApi>>,
        bidder: AccountAddress,
        land: LandId,
        amount: Amount,
        at_millis: u64,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&LandParams { land });
        let ctx = receive_ctx(bidder, &bytes, at_millis);
        application_nft(&ctx, host, amount)
    }

    #[concordium_test]
    fn test_init() {
        let host = default_host();
        let state = host.state();

        claim_eq!(state.roles.owner, Some(OWNER));
        claim_eq!(state.roles.admin, OWNER);
        claim_eq!(state.roles.oracle, ORACLE);
        claim_eq!(state.registry, REGISTRY);
        claim_eq!(state.settings, AuctionSettings::default_settings());
        claim_eq!(state.treasury, Amount::zero());
        claim_eq!(state.auctions.iter().count(), 0);
    }

    #[concordium_test]
    fn test_open_auctions() {
        let mut host = default_host();

        // End time must be in the future.
        let bytes = to_bytes(&OpenParams {
            end_time: ts(50),
            lands: vec![LAND_1],
        });
        let ctx = receive_ctx(OWNER, &bytes, 50);
        let result = start_receiving_applications(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::InvalidEndTime));

        // Only owner or admin may open.
        let bytes = to_bytes(&OpenParams {
            end_time: ts(DAY_MILLIS),
            lands: vec![LAND_1],
        });
        let ctx = receive_ctx(ALICE, &bytes, 0);
        let result = start_receiving_applications(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        open_lands(&mut host, vec![LAND_1, LAND_2], DAY_MILLIS, 0);
        claim!(host.state().for_sale.contains(&LAND_1));
        claim!(host.state().for_sale.contains(&LAND_2));

        // Re-opening an in-play parcel is a silent no-op.
        open_lands(&mut host, vec![LAND_1], 2 * DAY_MILLIS, 0);
        let auction = host
            .state()
            .auctions
            .get(&LAND_1)
            .expect_report("Missing record");
        claim_eq!(auction.end_time, ts(DAY_MILLIS));
    }

    #[concordium_test]
    fn test_open_pulls_custody_from_current_holder() {
        let mut host = default_host();

        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("mintIfAbsent")),
            parse_and_ok_mock::<MintIfAbsentParams, _>(()),
        );
        // The registry already knows the parcel and reports another holder.
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("ownerOf")),
            parse_and_ok_mock::<OwnerOfParams, _>(OwnerOfResponse {
                owner: Address::Account(BOB),
            }),
        );
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            parse_and_check_mock::<RegistryTransferParams, _>(
                |params| {
                    params.from == Address::Account(BOB)
                        && params.to == Address::Contract(SELF_ADDRESS)
                },
                (),
            ),
        );

        let bytes = to_bytes(&OpenParams {
            end_time: ts(DAY_MILLIS),
            lands: vec![LAND_1],
        });
        let ctx = receive_ctx(OWNER, &bytes, 0);
        let result = start_receiving_applications(&ctx, &mut host);
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_deposit_for_sender_scales() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1, LAND_2], DAY_MILLIS, 0);

        let ctx = receive_ctx(ALICE, &[], 0);
        let deposit = deposit_for_sender(&ctx, &host).expect_report("Query failed");
        claim_eq!(deposit, Amount::from_ccd(1));

        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");

        // One escrowed bid doubles the requirement.
        let ctx = receive_ctx(ALICE, &[], 10);
        let deposit = deposit_for_sender(&ctx, &host).expect_report("Query failed");
        claim_eq!(deposit, Amount::from_ccd(2));

        let result = apply(&mut host, ALICE, LAND_2, Amount::from_ccd(1), 10);
        claim_eq!(result, Err(CustomContractError::InsufficientFunds));
        let result = apply(&mut host, ALICE, LAND_2, Amount::from_ccd(2), 10);
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_price_for_sender() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);

        let bytes = to_bytes(&LandParams { land: LAND_1 });
        let ctx = receive_ctx(ALICE, &bytes, 0);
        let price = price_for_sender(&ctx, &host).expect_report("Query failed");
        claim_eq!(price, Amount::from_ccd(11));

        apply(&mut host, BOB, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");

        // The crowd term moved the price up.
        let ctx = receive_ctx(ALICE, &bytes, 10);
        let price = price_for_sender(&ctx, &host).expect_report("Query failed");
        claim_eq!(price, Amount::from_ccd(12));

        let bytes = to_bytes(&LandParams { land: LAND_2 });
        let ctx = receive_ctx(ALICE, &bytes, 10);
        let result = price_for_sender(&ctx, &host);
        claim_eq!(result, Err(CustomContractError::AuctionNotExists));
    }

    #[concordium_test]
    fn test_set_winner_refunds_losers() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        apply(&mut host, BOB, LAND_1, Amount::from_ccd(1), 20).expect_report("Apply failed");

        // Oracle capability required.
        let ctx = receive_ctx(ALICE, &[], 30);
        let result = set_winner(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        host.set_self_balance(Amount::from_ccd(2));
        let ctx = receive_ctx(ORACLE, &[], 30);
        let result = set_winner(&ctx, &mut host);
        claim_eq!(result, Ok(()));

        // Scores tie at zero, so the earliest applicant stands and the other
        // is refunded.
        claim!(host.transfer_occurred(&BOB, Amount::from_ccd(1)));
        let bytes = to_bytes(&LandParams { land: LAND_1 });
        let ctx = receive_ctx(ALICE, &bytes, 30);
        let response = get_winner(&ctx, &host).expect_report("Query failed");
        claim_eq!(
            response.winner,
            Some(WinnerInfo {
                account: ALICE,
                price: Amount::from_ccd(11),
            })
        );

        // The parcel is still open for bids until the end time.
        let ctx = receive_ctx(ALICE, &[], 30);
        let for_sale = get_all_lands_for_sale(&ctx, &host).expect_report("Query failed");
        claim_eq!(for_sale, vec![LAND_1]);
    }

    #[concordium_test]
    fn test_claim_round_trip() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");

        // Claiming before resolution is rejected.
        let bytes = to_bytes(&LandParams { land: LAND_1 });
        let ctx = receive_ctx(ALICE, &bytes, 20);
        let result = transfer_land_to_winner(&ctx, &mut host, Amount::from_ccd(11));
        claim_eq!(result, Err(CustomContractError::AuctionIsActive));

        // Resolve after expiry.
        let ctx = receive_ctx(ORACLE, &[], DAY_MILLIS);
        set_winner(&ctx, &mut host).expect_report("Resolution failed");
        let ctx = receive_ctx(ALICE, &[], DAY_MILLIS);
        let for_transfer = get_all_lands_for_transfer(&ctx, &host).expect_report("Query failed");
        claim_eq!(for_transfer, vec![LAND_1]);

        // Wrong caller, short payment.
        let ctx = receive_ctx(BOB, &bytes, DAY_MILLIS + 10);
        let result = transfer_land_to_winner(&ctx, &mut host, Amount::from_ccd(11));
        claim_eq!(result, Err(CustomContractError::NotWinner));
        let ctx = receive_ctx(ALICE, &bytes, DAY_MILLIS + 10);
        let result = transfer_land_to_winner(&ctx, &mut host, Amount::from_ccd(10));
        claim_eq!(result, Err(CustomContractError::BidTooLow));

        // The winning claim: price 11 to the treasury, parcel to Alice, the
        // escrowed deposit back.
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            parse_and_check_mock::<RegistryTransferParams, _>(
                |params| {
                    params.id == LAND_1
                        && params.from == Address::Contract(SELF_ADDRESS)
                        && params.to == Address::Account(ALICE)
                },
                (),
            ),
        );
        host.set_self_balance(Amount::from_ccd(12));
        let ctx = receive_ctx(ALICE, &bytes, DAY_MILLIS + 10);
        let result = transfer_land_to_winner(&ctx, &mut host, Amount::from_ccd(11));
        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&ALICE, Amount::from_ccd(1)));
        claim_eq!(host.state().treasury, Amount::from_ccd(11));
        claim!(host.state().sold.contains(&LAND_1));

        // A sold parcel never re-enters bidding.
        open_lands(&mut host, vec![LAND_1], 3 * DAY_MILLIS, DAY_MILLIS + 20);
        let ctx = receive_ctx(ALICE, &[], DAY_MILLIS + 20);
        let for_sale = get_all_lands_for_sale(&ctx, &host).expect_report("Query failed");
        claim!(for_sale.is_empty());
    }

    #[concordium_test]
    fn test_fine_round_trip() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        let ctx = receive_ctx(ORACLE, &[], DAY_MILLIS);
        set_winner(&ctx, &mut host).expect_report("Resolution failed");

        // Oracle capability required.
        let ctx = receive_ctx(ALICE, &[], 9 * DAY_MILLIS);
        let result = set_fines(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        // Window still open: nothing to fine.
        let ctx = receive_ctx(ORACLE, &[], 2 * DAY_MILLIS);
        let fined = set_fines(&ctx, &mut host).expect_report("Sweep failed");
        claim!(fined.is_empty());

        // Eight days past the end time the seven-day window has lapsed.
        let ctx = receive_ctx(ORACLE, &[], 9 * DAY_MILLIS);
        let fined = set_fines(&ctx, &mut host).expect_report("Sweep failed");
        claim_eq!(fined, vec![ALICE]);
        claim_eq!(host.state().treasury, Amount::from_ccd(1));

        let bytes = to_bytes(&AccountsParams {
            accounts: vec![ALICE, BOB],
        });
        let ctx = receive_ctx(ALICE, &bytes, 9 * DAY_MILLIS);
        let fines = get_fines(&ctx, &host).expect_report("Query failed");
        claim_eq!(fines, vec![1, 0]);

        // The parcel is re-openable, and the fine prices the next deposit.
        open_lands(&mut host, vec![LAND_1], 20 * DAY_MILLIS, 9 * DAY_MILLIS);
        let result = apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 9 * DAY_MILLIS);
        claim_eq!(result, Err(CustomContractError::InsufficientFunds));
        let result = apply(&mut host, ALICE, LAND_1, Amount::from_ccd(2), 9 * DAY_MILLIS);
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_ratings_drive_selection() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);

        let rating = crate::rating::Rating {
            deals_completed: 30,
            turnover: 920,
            holdings: 250,
            tenure: 4,
            references: 2,
            checks_passed: 1,
            endorsements: 8,
        };
        let bytes = to_bytes(&RatingParams {
            account: BOB,
            rating,
        });

        // Oracle capability required.
        let ctx = receive_ctx(ALICE, &bytes, 0);
        let result = set_rating(&ctx, &mut host);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let ctx = receive_ctx(ORACLE, &bytes, 0);
        set_rating(&ctx, &mut host).expect_report("Rating failed");

        let bytes = to_bytes(&AccountsParams {
            accounts: vec![ALICE, BOB],
        });
        let ctx = receive_ctx(ALICE, &bytes, 0);
        let scores = get_ratings(&ctx, &host).expect_report("Query failed");
        claim_eq!(scores[0], 0);
        claim!(scores[1] > 0);

        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        apply(&mut host, BOB, LAND_1, Amount::from_ccd(1), 20).expect_report("Apply failed");
        host.set_self_balance(Amount::from_ccd(2));
        let ctx = receive_ctx(ORACLE, &[], 30);
        set_winner(&ctx, &mut host).expect_report("Resolution failed");

        let bytes = to_bytes(&LandParams { land: LAND_1 });
        let ctx = receive_ctx(ALICE, &bytes, 30);
        let response = get_winner(&ctx, &host).expect_report("Query failed");
        claim_eq!(response.winner.map(|winner| winner.account), Some(BOB));
        claim!(host.transfer_occurred(&ALICE, Amount::from_ccd(1)));
    }

    #[concordium_test]
    fn test_withdraw_and_fund() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(ALICE, &[], 0);
        fund(&ctx, &mut host, Amount::from_ccd(5), &mut logger).expect_report("Funding failed");
        claim_eq!(host.state().treasury, Amount::from_ccd(5));
        claim!(logger.logs.contains(&to_bytes(&AuctionEvent::FundsReceived {
            from: ALICE,
            amount: Amount::from_ccd(5),
        })));

        let bytes = to_bytes(&WithdrawParams {
            to: BOB,
            amount: Amount::from_ccd(3),
        });

        // Owner only; admins and oracles cannot withdraw.
        let ctx = receive_ctx(ORACLE, &bytes, 0);
        let result = withdraw_tokens(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        // Fails closed beyond the tracked balance.
        let bytes_too_much = to_bytes(&WithdrawParams {
            to: BOB,
            amount: Amount::from_ccd(6),
        });
        let ctx = receive_ctx(OWNER, &bytes_too_much, 0);
        let result = withdraw_tokens(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::InsufficientBalance));

        host.set_self_balance(Amount::from_ccd(5));
        let ctx = receive_ctx(OWNER, &bytes, 0);
        let result = withdraw_tokens(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().treasury, Amount::from_ccd(2));
        claim!(host.transfer_occurred(&BOB, Amount::from_ccd(3)));
        claim!(logger.logs.contains(&to_bytes(&AuctionEvent::FundsWithdrawn {
            by: OWNER,
            to: BOB,
            amount: Amount::from_ccd(3),
        })));
    }

    #[concordium_test]
    fn test_escrow_is_not_withdrawable() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");

        // The deposit sits in escrow, not in the treasury.
        claim_eq!(host.state().treasury, Amount::zero());
        let bytes = to_bytes(&WithdrawParams {
            to: OWNER,
            amount: Amount::from_ccd(1),
        });
        let mut logger = TestLogger::init();
        let ctx = receive_ctx(OWNER, &bytes, 10);
        let result = withdraw_tokens(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::InsufficientBalance));
    }

    #[concordium_test]
    fn test_settings_change_keeps_snapshots() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);

        let new_settings = AuctionSettings {
            min_deposit: Amount::from_ccd(5),
            min_price: Amount::from_ccd(50),
            claim_period: Duration::from_days(1),
        };
        let bytes = to_bytes(&new_settings);

        let ctx = receive_ctx(ALICE, &bytes, 0);
        let mut logger = TestLogger::init();
        let result = change_auction_settings(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let ctx = receive_ctx(OWNER, &bytes, 0);
        let result = change_auction_settings(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim!(logger.logs.contains(&to_bytes(&AuctionEvent::SettingsChanged {
            by: Address::Account(OWNER),
            settings: new_settings,
        })));

        // The open auction keeps its snapshot: the old deposit and price
        // still apply to it.
        let result = apply(&mut host, ALICE, LAND_1, Amount::from_ccd(5), 10);
        claim_eq!(result, Ok(()));
        let auction = host
            .state()
            .auctions
            .get(&LAND_1)
            .expect_report("Missing record");
        claim_eq!(auction.min_price, Amount::from_ccd(10));
        claim_eq!(auction.claim_period, Duration::from_days(7));

        // Parcels opened from now on use the new policy.
        open_lands(&mut host, vec![LAND_2], DAY_MILLIS, 0);
        let auction = host
            .state()
            .auctions
            .get(&LAND_2)
            .expect_report("Missing record");
        claim_eq!(auction.min_price, Amount::from_ccd(50));
    }

    #[concordium_test]
    fn test_role_management() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let bytes = to_bytes(&NewAdminParams { admin: ALICE });
        let ctx = receive_ctx(OWNER, &bytes, 0);
        change_admin(&ctx, &mut host, &mut logger).expect_report("Admin change failed");
        claim_eq!(host.state().roles.admin, ALICE);
        claim!(logger.logs.contains(&to_bytes(&AuctionEvent::AdminChanged {
            by: Address::Account(OWNER),
            new_admin: ALICE,
        })));

        let bytes = to_bytes(&NewOwnerParams { owner: BOB });
        let ctx = receive_ctx(ALICE, &bytes, 0);
        let result = transfer_ownership(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
        let ctx = receive_ctx(OWNER, &bytes, 0);
        transfer_ownership(&ctx, &mut host, &mut logger).expect_report("Ownership move failed");
        claim_eq!(host.state().roles.owner, Some(BOB));
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvent::OwnershipTransferred {
                previous: OWNER,
                new_owner: BOB,
            })));

        let ctx = receive_ctx(BOB, &[], 0);
        renounce_ownership(&ctx, &mut host, &mut logger).expect_report("Renounce failed");
        claim_eq!(host.state().roles.owner, None);
        claim!(logger
            .logs
            .contains(&to_bytes(&AuctionEvent::OwnershipTransferred {
                previous: BOB,
                new_owner: NULL_ADDRESS,
            })));

        // With the ownership renounced the treasury is frozen.
        let bytes = to_bytes(&WithdrawParams {
            to: BOB,
            amount: Amount::zero(),
        });
        let ctx = receive_ctx(BOB, &bytes, 0);
        let result = withdraw_tokens(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
    }

    #[concordium_test]
    fn test_contract_status() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1, LAND_2], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        let ctx = receive_ctx(ORACLE, &[], DAY_MILLIS);
        set_winner(&ctx, &mut host).expect_report("Resolution failed");

        let ctx = receive_ctx(ALICE, &[], DAY_MILLIS);
        let status = get_contract_status(&ctx, &host).expect_report("Query failed");
        claim_eq!(status.roles.owner, Some(OWNER));
        claim_eq!(status.roles.admin, OWNER);
        claim_eq!(status.roles.oracle, ORACLE);
        claim_eq!(status.settings, AuctionSettings::default_settings());
        claim_eq!(status.treasury, Amount::zero());
        // Land 1 awaits its claim; land 2 expired without bids and was
        // dropped.
        claim_eq!(status.lands_for_sale, 0);
        claim_eq!(status.lands_for_transfer, 1);
        claim_eq!(status.lands_sold, 0);
    }

    #[concordium_test]
    fn test_get_user_applications() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1, LAND_2], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        // A second escrowed bid doubles Alice's deposit.
        apply(&mut host, ALICE, LAND_2, Amount::from_ccd(2), 10).expect_report("Apply failed");
        apply(&mut host, BOB, LAND_2, Amount::from_ccd(1), 20).expect_report("Apply failed");

        let bytes_alice = to_bytes(&AccountParams { account: ALICE });
        let ctx = receive_ctx(ALICE, &bytes_alice, 20);
        let response = get_user_applications(&ctx, &host).expect_report("Query failed");
        claim_eq!(response.applications.len(), 2);
        claim!(response
            .applications
            .iter()
            .all(|application| !application.is_winner));

        let bytes_bob = to_bytes(&AccountParams { account: BOB });
        let ctx = receive_ctx(BOB, &bytes_bob, 20);
        let response = get_user_applications(&ctx, &host).expect_report("Query failed");
        claim_eq!(response.applications.len(), 1);
        claim_eq!(response.applications[0].land, LAND_2);
        claim_eq!(response.applications[0].deposit, Amount::from_ccd(1));

        // After resolution Alice stands as winner on both parcels while the
        // refunded loser drops out of the listing.
        host.set_self_balance(Amount::from_ccd(4));
        let ctx = receive_ctx(ORACLE, &[], 30);
        set_winner(&ctx, &mut host).expect_report("Resolution failed");

        let ctx = receive_ctx(ALICE, &bytes_alice, 30);
        let response = get_user_applications(&ctx, &host).expect_report("Query failed");
        claim_eq!(response.applications.len(), 2);
        claim!(response
            .applications
            .iter()
            .all(|application| application.is_winner));

        let ctx = receive_ctx(BOB, &bytes_bob, 30);
        let response = get_user_applications(&ctx, &host).expect_report("Query failed");
        claim!(response.applications.is_empty());
    }

    #[concordium_test]
    fn test_get_applicants() {
        let mut host = default_host();
        open_lands(&mut host, vec![LAND_1], DAY_MILLIS, 0);
        apply(&mut host, ALICE, LAND_1, Amount::from_ccd(1), 10).expect_report("Apply failed");
        apply(&mut host, BOB, LAND_1, Amount::from_ccd(1), 20).expect_report("Apply failed");

        let bytes = to_bytes(&LandParams { land: LAND_1 });
        let ctx = receive_ctx(ALICE, &bytes, 20);
        let response = get_applicants_by_land(&ctx, &host).expect_report("Query failed");
        claim_eq!(response.applicants.len(), 2);
        claim_eq!(response.applicants[0].bidder, ALICE);
        claim_eq!(response.applicants[1].bidder, BOB);
        claim_eq!(response.applicants[1].price, Amount::from_ccd(12));
    }
}
