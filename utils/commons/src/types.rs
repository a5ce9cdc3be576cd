use concordium_cis2::TokenIdU64;

/// Identifier of a single land parcel. Parcels are numbered, so the compact
/// CIS-2 u64 token id is used across both contracts.
pub type LandId = TokenIdU64;
