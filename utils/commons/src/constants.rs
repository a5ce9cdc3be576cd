use concordium_std::AccountAddress;

/// The null identity. Role management rejects it as a target.
pub const NULL_ADDRESS: AccountAddress = AccountAddress([0u8; 32]);

/// Tag for the admin change event.
pub const ADMIN_CHANGED_TAG: u8 = 0;
/// Tag for the oracle change event.
pub const ORACLE_CHANGED_TAG: u8 = 1;
/// Tag for the ownership transfer event.
pub const OWNERSHIP_TRANSFERRED_TAG: u8 = 2;
/// Tag for the auction settings change event.
pub const SETTINGS_CHANGED_TAG: u8 = 3;
/// Tag for the funds received event.
pub const FUNDS_RECEIVED_TAG: u8 = 4;
/// Tag for the funds withdrawn event.
pub const FUNDS_WITHDRAWN_TAG: u8 = 5;
