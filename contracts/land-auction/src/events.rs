use crate::external::AuctionSettings;
use commons::{
    ADMIN_CHANGED_TAG, FUNDS_RECEIVED_TAG, FUNDS_WITHDRAWN_TAG, ORACLE_CHANGED_TAG,
    OWNERSHIP_TRANSFERRED_TAG, SETTINGS_CHANGED_TAG,
};
use concordium_std::*;

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvent {
    /// A new admin was appointed.
    AdminChanged {
        by: Address,
        new_admin: AccountAddress,
    },
    /// A new oracle was appointed.
    OracleChanged {
        by: Address,
        new_oracle: AccountAddress,
    },
    /// Ownership moved to a new account, or to the null identity on
    /// renouncement.
    OwnershipTransferred {
        previous: AccountAddress,
        new_owner: AccountAddress,
    },
    /// The deposit and price policy changed for auctions opened from now on.
    SettingsChanged {
        by: Address,
        settings: AuctionSettings,
    },
    /// A direct top-up of the treasury.
    FundsReceived { from: AccountAddress, amount: Amount },
    /// Treasury funds paid out by the owner.
    FundsWithdrawn {
        by: AccountAddress,
        to: AccountAddress,
        amount: Amount,
    },
}

impl Serial for AuctionEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvent::AdminChanged { by, new_admin } => {
                out.write_u8(ADMIN_CHANGED_TAG)?;
                by.serial(out)?;
                new_admin.serial(out)
            }
            AuctionEvent::OracleChanged { by, new_oracle } => {
                out.write_u8(ORACLE_CHANGED_TAG)?;
                by.serial(out)?;
                new_oracle.serial(out)
            }
            AuctionEvent::OwnershipTransferred {
                previous,
                new_owner,
            } => {
                out.write_u8(OWNERSHIP_TRANSFERRED_TAG)?;
                previous.serial(out)?;
                new_owner.serial(out)
            }
            AuctionEvent::SettingsChanged { by, settings } => {
                out.write_u8(SETTINGS_CHANGED_TAG)?;
                by.serial(out)?;
                settings.serial(out)
            }
            AuctionEvent::FundsReceived { from, amount } => {
                out.write_u8(FUNDS_RECEIVED_TAG)?;
                from.serial(out)?;
                amount.serial(out)
            }
            AuctionEvent::FundsWithdrawn { by, to, amount } => {
                out.write_u8(FUNDS_WITHDRAWN_TAG)?;
                by.serial(out)?;
                to.serial(out)?;
                amount.serial(out)
            }
        }
    }
}
