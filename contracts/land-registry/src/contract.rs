use crate::{events::*, external::*, state::*};
use commons::{
    CustomContractError, LandId, MintIfAbsentParams, OwnerOfParams, OwnerOfResponse,
    RegistryTransferParams,
};
use concordium_cis2::{Cis2Event, MintEvent, TokenAmountU8, TransferEvent};
use concordium_std::*;

type ContractResult<A> = Result<A, CustomContractError>;

/// Token amount logged with every parcel event. Parcels are non-fungible, so
/// the amount is always one.
const PARCEL_AMOUNT: TokenAmountU8 = TokenAmountU8(1);

/// Initialize the registry with no parcels minted. The instantiating account
/// becomes owner and initial admin.
#[init(contract = "land-registry")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder, ctx.init_origin()))
}

/// Hand the minting and transfer rights to a new address, normally the
/// auction contract right after its deployment.
///
/// It rejects if:
/// - The sender is not the registry owner.
/// - It fails to parse the parameter.
/// - It fails to log the event.
#[receive(
    contract = "land-registry",
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

    let state = host.state_mut();
    ensure!(
        ctx.sender().matches_account(&state.owner),
        CustomContractError::NotAuthorized
    );
    state.admin = params.admin;

    logger.log(&RegistryEvent::AdminChanged {
        new_admin: params.admin,
    })?;

    Ok(())
}

/// Mint a parcel token to the given custodian unless it already exists, in
/// which case the call succeeds without touching the state.
///
/// Logs a CIS-2 `Mint` event when a mint takes place.
///
/// It rejects if:
/// - The sender is not the registry admin.
/// - It fails to parse the parameter.
/// - It fails to log the event.
#[receive(
    contract = "land-registry",
    name = "mintIfAbsent",
    parameter = "MintIfAbsentParams",
    mutable,
    enable_logger
)]
fn mint_if_absent<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintIfAbsentParams = ctx.parameter_cursor().get()?;

    let state = host.state_mut();
    ensure!(
        ctx.sender() == state.admin,
        CustomContractError::NotAuthorized
    );

    if state.mint_if_absent(params.id, params.custodian) {
        logger.log(&Cis2Event::Mint(MintEvent {
            token_id: params.id,
            amount: PARCEL_AMOUNT,
            owner: params.custodian,
        }))?;
    }

    Ok(())
}

/// Move a parcel token between holders.
///
/// Logs a CIS-2 `Transfer` event.
///
/// It rejects if:
/// - The sender is not the registry admin.
/// - It fails to parse the parameter.
/// - The parcel was never minted.
/// - The `from` address does not hold the parcel.
/// - It fails to log the event.
#[receive(
    contract = "land-registry",
    name = "transfer",
    parameter = "RegistryTransferParams",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: RegistryTransferParams = ctx.parameter_cursor().get()?;

    let state = host.state_mut();
    ensure!(
        ctx.sender() == state.admin,
        CustomContractError::NotAuthorized
    );

    state.transfer(&params.id, &params.from, params.to)?;

    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.id,
        amount: PARCEL_AMOUNT,
        from: params.from,
        to: params.to,
    }))?;

    Ok(())
}

/// Look up the holder of a parcel.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The parcel was never minted.
#[receive(
    contract = "land-registry",
    name = "ownerOf",
    parameter = "OwnerOfParams",
    return_value = "OwnerOfResponse"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OwnerOfResponse> {
    let params: OwnerOfParams = ctx.parameter_cursor().get()?;

    let owner = host
        .state()
        .owner_of(&params.id)
        .ok_or(CustomContractError::UnknownToken)?;

    Ok(OwnerOfResponse { owner })
}

/// Full snapshot of the registry for off-chain consumption.
#[receive(contract = "land-registry", name = "view", return_value = "ViewResponse")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewResponse> {
    let state = host.state();
    let tokens = state
        .tokens
        .iter()
        .map(|(id, holder)| (*id, *holder))
        .collect();

    Ok(ViewResponse {
        owner: state.owner,
        admin: state.admin,
        tokens,
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([1; 32]);
    const AUCTION_CONTRACT: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const ALICE: AccountAddress = AccountAddress([4; 32]);
    const BOB: AccountAddress = AccountAddress([5; 32]);

    const LAND_1: LandId = TokenIdU64(1);
    const LAND_2: LandId = TokenIdU64(2);

    fn registry_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, OWNER);
        state.admin = Address::Contract(AUCTION_CONTRACT);
        TestHost::new(state, state_builder)
    }

    fn receive_ctx(
        sender: Address,
        parameter_bytes: &[u8],
    ) -> TestReceiveContext<'_> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_parameter(parameter_bytes);
        ctx
    }

    #[concordium_test]
    fn test_init() {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(OWNER);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Init failed");

        claim_eq!(state.owner, OWNER);
        claim_eq!(state.admin, Address::Account(OWNER));
        claim_eq!(state.tokens.iter().count(), 0);
    }

    #[concordium_test]
    fn test_change_admin() {
        let mut host = registry_host();
        let parameter_bytes = to_bytes(&NewAdminParams {
            admin: Address::Account(ALICE),
        });
        let mut logger = TestLogger::init();

        // Only the owner account may replace the admin.
        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = change_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let ctx = receive_ctx(Address::Account(OWNER), &parameter_bytes);
        let result = change_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().admin, Address::Account(ALICE));
        claim!(logger.logs.contains(&to_bytes(&RegistryEvent::AdminChanged {
            new_admin: Address::Account(ALICE),
        })));
    }

    #[concordium_test]
    fn test_mint_if_absent() {
        let mut host = registry_host();
        let parameter_bytes = to_bytes(&MintIfAbsentParams {
            id: LAND_1,
            custodian: Address::Contract(AUCTION_CONTRACT),
        });
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(Address::Account(ALICE), &parameter_bytes);
        let result = mint_if_absent(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = mint_if_absent(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&LAND_1),
            Some(Address::Contract(AUCTION_CONTRACT))
        );
        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Mint(MintEvent {
            token_id: LAND_1,
            amount: PARCEL_AMOUNT,
            owner: Address::Contract(AUCTION_CONTRACT),
        }))));

        // Minting an existing parcel is a no-op, even towards another
        // custodian.
        let parameter_bytes = to_bytes(&MintIfAbsentParams {
            id: LAND_1,
            custodian: Address::Account(BOB),
        });
        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = mint_if_absent(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&LAND_1),
            Some(Address::Contract(AUCTION_CONTRACT))
        );
        claim_eq!(logger.logs.len(), 2);
    }

    #[concordium_test]
    fn test_transfer() {
        let mut host = registry_host();
        host.state_mut()
            .mint_if_absent(LAND_1, Address::Contract(AUCTION_CONTRACT));
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&RegistryTransferParams {
            id: LAND_1,
            from: Address::Contract(AUCTION_CONTRACT),
            to: Address::Account(ALICE),
        });

        let ctx = receive_ctx(Address::Account(BOB), &parameter_bytes);
        let result = transfer(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = transfer(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&LAND_1), Some(Address::Account(ALICE)));
        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::Transfer(TransferEvent {
                token_id: LAND_1,
                amount: PARCEL_AMOUNT,
                from: Address::Contract(AUCTION_CONTRACT),
                to: Address::Account(ALICE),
            })))
        );
    }

    #[concordium_test]
    fn test_transfer_errors() {
        let mut host = registry_host();
        host.state_mut()
            .mint_if_absent(LAND_1, Address::Contract(AUCTION_CONTRACT));
        let mut logger = TestLogger::init();

        // Unminted parcel.
        let parameter_bytes = to_bytes(&RegistryTransferParams {
            id: LAND_2,
            from: Address::Contract(AUCTION_CONTRACT),
            to: Address::Account(ALICE),
        });
        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = transfer(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::UnknownToken));

        // `from` does not hold the parcel.
        let parameter_bytes = to_bytes(&RegistryTransferParams {
            id: LAND_1,
            from: Address::Account(BOB),
            to: Address::Account(ALICE),
        });
        let ctx = receive_ctx(Address::Contract(AUCTION_CONTRACT), &parameter_bytes);
        let result = transfer(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::NotTokenOwner));
        claim_eq!(
            host.state().owner_of(&LAND_1),
            Some(Address::Contract(AUCTION_CONTRACT))
        );
    }

    #[concordium_test]
    fn test_owner_of() {
        let mut host = registry_host();
        host.state_mut()
            .mint_if_absent(LAND_1, Address::Account(ALICE));

        let parameter_bytes = to_bytes(&OwnerOfParams { id: LAND_1 });
        let ctx = receive_ctx(Address::Account(BOB), &parameter_bytes);
        let result = owner_of(&ctx, &host);
        claim_eq!(
            result.map(|r| r.owner),
            Ok(Address::Account(ALICE))
        );

        let parameter_bytes = to_bytes(&OwnerOfParams { id: LAND_2 });
        let ctx = receive_ctx(Address::Account(BOB), &parameter_bytes);
        let result = owner_of(&ctx, &host);
        claim_eq!(result, Err(CustomContractError::UnknownToken));
    }

    #[concordium_test]
    fn test_view() {
        let mut host = registry_host();
        host.state_mut()
            .mint_if_absent(LAND_1, Address::Account(ALICE));
        host.state_mut()
            .mint_if_absent(LAND_2, Address::Account(BOB));

        let ctx = TestReceiveContext::empty();
        let response = view(&ctx, &host).expect_report("View failed");

        claim_eq!(response.owner, OWNER);
        claim_eq!(response.admin, Address::Contract(AUCTION_CONTRACT));
        claim_eq!(response.tokens.len(), 2);
        claim!(response
            .tokens
            .contains(&(LAND_1, Address::Account(ALICE))));
        claim!(response.tokens.contains(&(LAND_2, Address::Account(BOB))));
    }
}
