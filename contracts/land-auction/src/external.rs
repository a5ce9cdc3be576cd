use crate::rating::Rating;
use crate::state::{Application, UserApplication};
use commons::{LandId, Roles};
use concordium_std::*;

/// Deposit and price policy, snapshotted into every auction at opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct AuctionSettings {
    /// Base deposit escrowed with every application.
    pub min_deposit: Amount,
    /// Base price of a freshly opened parcel.
    pub min_price: Amount,
    /// Time the winner has after the auction ends to pay for the parcel.
    pub claim_period: Duration,
}

impl AuctionSettings {
    /// Policy used when a deployment does not override it.
    pub fn default_settings() -> Self {
        Self {
            min_deposit: Amount::from_ccd(1),
            min_price: Amount::from_ccd(10),
            claim_period: Duration::from_days(7),
        }
    }
}

/// Parameter for the `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Address of the land registry holding parcel custody.
    pub registry: ContractAddress,
    /// Initial deposit and price policy.
    pub settings: AuctionSettings,
}

/// Parameter for the `startReceivingApplications` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct OpenParams {
    /// Moment bidding closes for every parcel in the batch.
    pub end_time: Timestamp,
    /// Parcels to open for bidding.
    pub lands: Vec<LandId>,
}

/// Parameter naming a single parcel, used by `applicationNFT`,
/// `priceForSender`, `getWinner` and `getApplicantsByLand`.
#[derive(Debug, Serialize, SchemaType)]
pub struct LandParams {
    pub land: LandId,
}

/// Parameter for the `setRating` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct RatingParams {
    pub account: AccountAddress,
    pub rating: Rating,
}

/// Parameter for the `getRatings` and `getFines` entrypoints.
#[derive(Debug, Serialize, SchemaType)]
pub struct AccountsParams {
    pub accounts: Vec<AccountAddress>,
}

/// Parameter for the `withdrawTokens` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawParams {
    pub to: AccountAddress,
    pub amount: Amount,
}

/// Parameter for the `changeAdmin` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct NewAdminParams {
    pub admin: AccountAddress,
}

/// Parameter for the `changeOracle` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct NewOracleParams {
    pub oracle: AccountAddress,
}

/// Parameter for the `transferOwnership` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct NewOwnerParams {
    pub owner: AccountAddress,
}

/// Return value of the `getWinner` entrypoint. `None` while no applicant has
/// been promoted yet.
#[derive(Debug, PartialEq, Eq, Serialize, SchemaType)]
pub struct WinnerResponse {
    pub winner: Option<WinnerInfo>,
}

/// Standing winner of a parcel and the price captured on their application.
#[derive(Debug, PartialEq, Eq, Serialize, SchemaType)]
pub struct WinnerInfo {
    pub account: AccountAddress,
    pub price: Amount,
}

/// Return value of the `getApplicantsByLand` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct ApplicantsResponse {
    pub applicants: Vec<Application>,
}

/// Parameter for the `getUserApplications` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct AccountParams {
    pub account: AccountAddress,
}

/// Return value of the `getUserApplications` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct UserApplicationsResponse {
    pub applications: Vec<UserApplication>,
}

/// Return value of the `getContractStatus` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct ContractStatusResponse {
    /// Current owner, admin and oracle assignments.
    pub roles: Roles,
    pub settings: AuctionSettings,
    pub treasury: Amount,
    pub lands_for_sale: u64,
    pub lands_for_transfer: u64,
    pub lands_sold: u64,
}
