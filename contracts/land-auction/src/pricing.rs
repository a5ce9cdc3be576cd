//! Deposit and price formulas. Both are pure and total: exponents are capped
//! so the arithmetic stays inside `u64` micro CCD.
use concordium_std::{concordium_cfg_test, Amount};

/// Base unit for the price scaling terms.
pub const PRICE_UNIT: Amount = Amount::from_ccd(1);

/// Cap on shift exponents. Amounts scale far past any realistic balance well
/// before the cap is reached.
const MAX_EXPONENT: u64 = 32;

fn pow2(n: u64) -> u64 {
    1u64 << n.min(MAX_EXPONENT)
}

/// Deposit required from an applicant: the configured minimum doubled per
/// outstanding escrowed bid, plus one minimum per accumulated fine.
pub fn required_deposit(min_deposit: Amount, pending_bids: u64, fines: u64) -> Amount {
    let scaled = min_deposit.micro_ccd.saturating_mul(pow2(pending_bids));
    let fine_term = min_deposit.micro_ccd.saturating_mul(fines);
    Amount::from_micro_ccd(scaled.saturating_add(fine_term))
}

/// Price captured on an application: the parcel's minimum price, one unit
/// doubled per standing win, plus one unit per applicant already in the list.
pub fn required_price(min_price: Amount, wins: u64, applicant_count: u64) -> Amount {
    let win_term = PRICE_UNIT.micro_ccd.saturating_mul(pow2(wins));
    let crowd_term = PRICE_UNIT.micro_ccd.saturating_mul(applicant_count);
    Amount::from_micro_ccd(
        min_price
            .micro_ccd
            .saturating_add(win_term)
            .saturating_add(crowd_term),
    )
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::*;

    const MIN_DEPOSIT: Amount = Amount::from_ccd(1);
    const MIN_PRICE: Amount = Amount::from_ccd(10);

    #[concordium_test]
    fn test_required_deposit_doubles_per_pending_bid() {
        claim_eq!(required_deposit(MIN_DEPOSIT, 0, 0), Amount::from_ccd(1));
        claim_eq!(required_deposit(MIN_DEPOSIT, 1, 0), Amount::from_ccd(2));
        claim_eq!(required_deposit(MIN_DEPOSIT, 2, 0), Amount::from_ccd(4));
        claim_eq!(required_deposit(MIN_DEPOSIT, 3, 0), Amount::from_ccd(8));
    }

    #[concordium_test]
    fn test_required_deposit_fine_term() {
        claim_eq!(required_deposit(MIN_DEPOSIT, 0, 1), Amount::from_ccd(2));
        claim_eq!(required_deposit(MIN_DEPOSIT, 0, 3), Amount::from_ccd(4));
        claim_eq!(required_deposit(MIN_DEPOSIT, 2, 2), Amount::from_ccd(6));
    }

    #[concordium_test]
    fn test_required_deposit_monotone() {
        let mut previous = Amount::zero();
        for pending in 0..40 {
            let current = required_deposit(MIN_DEPOSIT, pending, 0);
            claim!(current >= previous);
            previous = current;
        }
        let mut previous = Amount::zero();
        for fines in 0..40 {
            let current = required_deposit(MIN_DEPOSIT, 0, fines);
            claim!(current >= previous);
            previous = current;
        }
    }

    #[concordium_test]
    fn test_required_price() {
        // Fresh participant, empty list: 10 + 1 * 2^0 + 0.
        claim_eq!(required_price(MIN_PRICE, 0, 0), Amount::from_ccd(11));
        // One standing win doubles the win term.
        claim_eq!(required_price(MIN_PRICE, 1, 0), Amount::from_ccd(12));
        // Each applicant already in the list adds a unit.
        claim_eq!(required_price(MIN_PRICE, 0, 3), Amount::from_ccd(14));
        claim_eq!(required_price(MIN_PRICE, 2, 2), Amount::from_ccd(16));
    }

    #[concordium_test]
    fn test_exponent_cap_is_total() {
        // Huge counters must not panic.
        let _ = required_deposit(MIN_DEPOSIT, u64::MAX, u64::MAX);
        let _ = required_price(MIN_PRICE, u64::MAX, u64::MAX);
    }
}
