//! Invocation helpers for the land registry contract holding parcel custody.
use commons::{
    CustomContractError, LandId, MintIfAbsentParams, OwnerOfParams, OwnerOfResponse,
    RegistryTransferParams,
};
use concordium_std::*;

/// Mint the parcel to `custodian` if the registry does not know it yet.
pub fn mint_if_absent<T>(
    host: &mut impl HasHost<T>,
    registry: &ContractAddress,
    id: LandId,
    custodian: Address,
) -> Result<(), CustomContractError> {
    host.invoke_contract(
        registry,
        &MintIfAbsentParams { id, custodian },
        EntrypointName::new_unchecked("mintIfAbsent"),
        Amount::zero(),
    )?;
    Ok(())
}

/// Look up the current holder of the parcel.
pub fn owner_of<T>(
    host: &impl HasHost<T>,
    registry: &ContractAddress,
    id: LandId,
) -> Result<Address, CustomContractError> {
    let mut response = host
        .invoke_contract_read_only(
            registry,
            &OwnerOfParams { id },
            EntrypointName::new_unchecked("ownerOf"),
            Amount::zero(),
        )?
        .ok_or(CustomContractError::InvokeContractError)?;

    let result = OwnerOfResponse::deserial(&mut response)
        .map_err(|_| CustomContractError::InvokeContractError)?;
    Ok(result.owner)
}

/// Move parcel custody in the registry.
pub fn transfer<T>(
    host: &mut impl HasHost<T>,
    registry: &ContractAddress,
    id: LandId,
    from: Address,
    to: Address,
) -> Result<(), CustomContractError> {
    host.invoke_contract(
        registry,
        &RegistryTransferParams { id, from, to },
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )?;
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use concordium_cis2::TokenIdU64;
    use concordium_std::test_infrastructure::*;

    const REGISTRY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const AUCTION: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const USER: AccountAddress = AccountAddress([7; 32]);

    #[concordium_test]
    fn test_mint_if_absent() {
        let mut host = TestHost::new((), TestStateBuilder::default());
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("mintIfAbsent")),
            parse_and_check_mock::<MintIfAbsentParams, _>(
                |params| params.id == TokenIdU64(4) && params.custodian == Address::Contract(AUCTION),
                (),
            ),
        );

        let result = mint_if_absent(&mut host, &REGISTRY, TokenIdU64(4), Address::Contract(AUCTION));
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_owner_of() {
        let mut host = TestHost::new((), TestStateBuilder::default());
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("ownerOf")),
            parse_and_ok_mock::<OwnerOfParams, _>(OwnerOfResponse {
                owner: Address::Account(USER),
            }),
        );

        let result = owner_of(&host, &REGISTRY, TokenIdU64(4));
        claim_eq!(result, Ok(Address::Account(USER)));
    }

    #[concordium_test]
    fn test_transfer() {
        let mut host = TestHost::new((), TestStateBuilder::default());
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            parse_and_check_mock::<RegistryTransferParams, _>(
                |params| params.from == Address::Contract(AUCTION) && params.to == Address::Account(USER),
                (),
            ),
        );

        let result = transfer(
            &mut host,
            &REGISTRY,
            TokenIdU64(4),
            Address::Contract(AUCTION),
            Address::Account(USER),
        );
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_failed_invoke_maps_to_contract_error() {
        let mut host = TestHost::new((), TestStateBuilder::default());
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked(String::from("transfer")),
            MockFn::new(
                |_parameter, _, _, _state| -> Result<(bool, Option<()>), CallContractError<()>> {
                    Err(CallContractError::Trap)
                },
            ),
        );

        let result = transfer(
            &mut host,
            &REGISTRY,
            TokenIdU64(4),
            Address::Contract(AUCTION),
            Address::Account(USER),
        );
        claim_eq!(result, Err(CustomContractError::InvokeContractError));
    }
}
