//! Ownership registry for tokenized land parcels. Each parcel is a CIS-2
//! non-fungible token minted on demand and moved exclusively by the registry
//! admin, which is expected to be the auction contract.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
