use commons::LandId;
use concordium_std::*;

/// Parameter for the `changeAdmin` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct NewAdminParams {
    /// Address taking over the minting and transfer rights.
    pub admin: Address,
}

/// Full snapshot of the registry, returned by the `view` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct ViewResponse {
    pub owner: AccountAddress,
    pub admin: Address,
    /// Every minted parcel together with its current holder.
    pub tokens: Vec<(LandId, Address)>,
}
