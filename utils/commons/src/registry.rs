use crate::LandId;
use concordium_std::*;

/// Parameter for the registry `mintIfAbsent` entrypoint. Mints the parcel
/// token to `custodian` unless it already exists, in which case the call is
/// a no-op.
#[derive(Debug, Serialize, SchemaType)]
pub struct MintIfAbsentParams {
    /// Parcel token to mint.
    pub id: LandId,
    /// Address receiving the freshly minted token.
    pub custodian: Address,
}

/// Parameter for the registry `transfer` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct RegistryTransferParams {
    /// Parcel token to move.
    pub id: LandId,
    /// Current holder. Must match the registry record.
    pub from: Address,
    /// New holder.
    pub to: Address,
}

/// Parameter and return value of the registry `ownerOf` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct OwnerOfParams {
    pub id: LandId,
}

/// Return value of the registry `ownerOf` entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct OwnerOfResponse {
    pub owner: Address,
}
