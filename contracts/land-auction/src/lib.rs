//! Repeated multi-asset auction with escrowed deposits for tokenized land
//! parcels. Parcels are opened for bidding in batches, applicants escrow a
//! deposit scaled by their outstanding bids and past fines, an oracle promotes
//! the best-rated applicant to winner, and the winner buys the parcel within a
//! claim window or gets fined.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod pricing;
mod rating;
mod registry;
mod state;
