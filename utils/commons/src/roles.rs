use crate::{CustomContractError, NULL_ADDRESS};
use concordium_std::*;

/// Capabilities gating the mutating entrypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Settings, auction opening and role delegation. Owner or admin.
    Admin,
    /// Rating, winner selection and fine sweeps. Oracle or admin.
    Oracle,
    /// Ownership transfer and treasury withdrawal. Owner only.
    Owner,
}

/// Process-wide role assignments. The owner can be renounced to a null state;
/// admin and oracle are always set.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct Roles {
    pub owner: Option<AccountAddress>,
    pub admin: AccountAddress,
    pub oracle: AccountAddress,
}

impl Roles {
    /// All three roles start at the instantiating account.
    pub fn new(origin: AccountAddress) -> Self {
        Self {
            owner: Some(origin),
            admin: origin,
            oracle: origin,
        }
    }

    fn is_owner(&self, sender: &Address) -> bool {
        match self.owner {
            Some(owner) => sender.matches_account(&owner),
            None => false,
        }
    }

    fn is_admin(&self, sender: &Address) -> bool {
        sender.matches_account(&self.admin)
    }

    fn is_oracle(&self, sender: &Address) -> bool {
        sender.matches_account(&self.oracle)
    }

    pub fn has_capability(&self, sender: &Address, capability: Capability) -> bool {
        match capability {
            Capability::Admin => self.is_owner(sender) || self.is_admin(sender),
            Capability::Oracle => self.is_oracle(sender) || self.is_admin(sender),
            Capability::Owner => self.is_owner(sender),
        }
    }

    pub fn change_admin(
        &mut self,
        sender: &Address,
        new_admin: AccountAddress,
    ) -> Result<(), CustomContractError> {
        ensure!(
            self.has_capability(sender, Capability::Admin),
            CustomContractError::NotAuthorized
        );
        ensure!(new_admin != NULL_ADDRESS, CustomContractError::InvalidAddress);
        self.admin = new_admin;
        Ok(())
    }

    pub fn change_oracle(
        &mut self,
        sender: &Address,
        new_oracle: AccountAddress,
    ) -> Result<(), CustomContractError> {
        ensure!(
            self.has_capability(sender, Capability::Admin),
            CustomContractError::NotAuthorized
        );
        ensure!(
            new_oracle != NULL_ADDRESS,
            CustomContractError::InvalidAddress
        );
        self.oracle = new_oracle;
        Ok(())
    }

    /// Hand the ownership over. The null identity and the current owner are
    /// rejected as targets.
    pub fn transfer_ownership(
        &mut self,
        sender: &Address,
        new_owner: AccountAddress,
    ) -> Result<(), CustomContractError> {
        ensure!(
            self.has_capability(sender, Capability::Owner),
            CustomContractError::NotAuthorized
        );
        ensure!(new_owner != NULL_ADDRESS, CustomContractError::InvalidAddress);
        ensure!(
            self.owner != Some(new_owner),
            CustomContractError::InvalidAddress
        );
        self.owner = Some(new_owner);
        Ok(())
    }

    /// Revoke the ownership permanently. Owner-gated calls fail from then on.
    pub fn renounce_ownership(&mut self, sender: &Address) -> Result<(), CustomContractError> {
        ensure!(
            self.has_capability(sender, Capability::Owner),
            CustomContractError::NotAuthorized
        );
        self.owner = None;
        Ok(())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const OWNER: AccountAddress = AccountAddress([1; 32]);
    const ADMIN: AccountAddress = AccountAddress([2; 32]);
    const ORACLE: AccountAddress = AccountAddress([3; 32]);
    const USER: AccountAddress = AccountAddress([16; 32]);

    fn default_roles() -> Roles {
        let mut roles = Roles::new(OWNER);
        roles.admin = ADMIN;
        roles.oracle = ORACLE;
        roles
    }

    #[concordium_test]
    fn test_new_roles_all_origin() {
        let roles = Roles::new(OWNER);
        claim_eq!(roles.owner, Some(OWNER));
        claim_eq!(roles.admin, OWNER);
        claim_eq!(roles.oracle, OWNER);
    }

    #[concordium_test]
    fn test_capabilities() {
        let roles = default_roles();

        claim!(roles.has_capability(&Address::Account(OWNER), Capability::Admin));
        claim!(roles.has_capability(&Address::Account(ADMIN), Capability::Admin));
        claim!(!roles.has_capability(&Address::Account(ORACLE), Capability::Admin));
        claim!(!roles.has_capability(&Address::Account(USER), Capability::Admin));

        claim!(roles.has_capability(&Address::Account(ORACLE), Capability::Oracle));
        claim!(roles.has_capability(&Address::Account(ADMIN), Capability::Oracle));
        claim!(!roles.has_capability(&Address::Account(OWNER), Capability::Oracle));
        claim!(!roles.has_capability(&Address::Account(USER), Capability::Oracle));

        claim!(roles.has_capability(&Address::Account(OWNER), Capability::Owner));
        claim!(!roles.has_capability(&Address::Account(ADMIN), Capability::Owner));
    }

    #[concordium_test]
    fn test_change_admin() {
        let mut roles = default_roles();

        let result = roles.change_admin(&Address::Account(ADMIN), USER);
        claim_eq!(result, Ok(()));
        claim_eq!(roles.admin, USER);

        // The owner may also appoint an admin.
        let result = roles.change_admin(&Address::Account(OWNER), ADMIN);
        claim_eq!(result, Ok(()));
        claim_eq!(roles.admin, ADMIN);

        let result = roles.change_admin(&Address::Account(ORACLE), USER);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
        claim_eq!(roles.admin, ADMIN);

        let result = roles.change_admin(&Address::Account(OWNER), NULL_ADDRESS);
        claim_eq!(result, Err(CustomContractError::InvalidAddress));
        claim_eq!(roles.admin, ADMIN);
    }

    #[concordium_test]
    fn test_change_oracle() {
        let mut roles = default_roles();

        let result = roles.change_oracle(&Address::Account(ADMIN), USER);
        claim_eq!(result, Ok(()));
        claim_eq!(roles.oracle, USER);

        // The oracle itself cannot reassign the role.
        let result = roles.change_oracle(&Address::Account(USER), ORACLE);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
        claim_eq!(roles.oracle, USER);

        let result = roles.change_oracle(&Address::Account(OWNER), NULL_ADDRESS);
        claim_eq!(result, Err(CustomContractError::InvalidAddress));
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut roles = default_roles();

        let result = roles.transfer_ownership(&Address::Account(ADMIN), USER);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let result = roles.transfer_ownership(&Address::Account(OWNER), OWNER);
        claim_eq!(result, Err(CustomContractError::InvalidAddress));

        let result = roles.transfer_ownership(&Address::Account(OWNER), NULL_ADDRESS);
        claim_eq!(result, Err(CustomContractError::InvalidAddress));

        let result = roles.transfer_ownership(&Address::Account(OWNER), USER);
        claim_eq!(result, Ok(()));
        claim_eq!(roles.owner, Some(USER));

        // The previous owner lost the capability.
        let result = roles.transfer_ownership(&Address::Account(OWNER), ADMIN);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
    }

    #[concordium_test]
    fn test_renounce_ownership() {
        let mut roles = default_roles();

        let result = roles.renounce_ownership(&Address::Account(USER));
        claim_eq!(result, Err(CustomContractError::NotAuthorized));

        let result = roles.renounce_ownership(&Address::Account(OWNER));
        claim_eq!(result, Ok(()));
        claim_eq!(roles.owner, None);

        // Nobody holds the owner capability any longer.
        let result = roles.transfer_ownership(&Address::Account(OWNER), USER);
        claim_eq!(result, Err(CustomContractError::NotAuthorized));
        // The admin keeps working.
        claim!(roles.has_capability(&Address::Account(ADMIN), Capability::Admin));
    }
}
