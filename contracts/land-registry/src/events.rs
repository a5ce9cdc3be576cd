use commons::ADMIN_CHANGED_TAG;
use concordium_std::*;

/// Tagged registry event to be serialized for the event log. Parcel mints and
/// moves are logged as standard CIS-2 events instead.
#[derive(Debug)]
pub enum RegistryEvent {
    /// The minting and transfer rights moved to a new address.
    AdminChanged { new_admin: Address },
}

impl Serial for RegistryEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            RegistryEvent::AdminChanged { new_admin } => {
                out.write_u8(ADMIN_CHANGED_TAG)?;
                new_admin.serial(out)
            }
        }
    }
}
