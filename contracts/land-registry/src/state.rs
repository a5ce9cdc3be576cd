use commons::{CustomContractError, LandId};
use concordium_std::*;

/// The registry contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account that instantiated the registry. Only it may replace the admin.
    pub owner: AccountAddress,
    /// Address allowed to mint and move parcel tokens. Expected to be the
    /// auction contract once deployment is wired up.
    pub admin: Address,
    /// Current holder of every minted parcel token.
    pub tokens: StateMap<LandId, Address, S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no parcels minted. The instantiating account
    /// starts out as both owner and admin.
    pub fn new(state_builder: &mut StateBuilder<S>, origin: AccountAddress) -> Self {
        Self {
            owner: origin,
            admin: Address::Account(origin),
            tokens: state_builder.new_map(),
        }
    }

    /// Holder of the parcel, if it was minted.
    pub fn owner_of(&self, id: &LandId) -> Option<Address> {
        self.tokens.get(id).map(|holder| *holder)
    }

    /// Mint the parcel to `custodian` unless it already exists. Returns
    /// whether a mint took place.
    pub fn mint_if_absent(&mut self, id: LandId, custodian: Address) -> bool {
        if self.tokens.get(&id).is_some() {
            return false;
        }
        self.tokens.insert(id, custodian);
        true
    }

    /// Move the parcel from `from` to `to`. The registry record must match
    /// `from` exactly.
    pub fn transfer(
        &mut self,
        id: &LandId,
        from: &Address,
        to: Address,
    ) -> Result<(), CustomContractError> {
        let mut holder = self
            .tokens
            .get_mut(id)
            .ok_or(CustomContractError::UnknownToken)?;
        ensure!(*holder == *from, CustomContractError::NotTokenOwner);
        *holder = to;
        Ok(())
    }
}
