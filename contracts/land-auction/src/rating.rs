//! Reputation scoring policy. Ratings are seven-component vectors supplied by
//! the oracle; the score is a fixed weighted sum and higher is better.
use concordium_std::*;

/// Weights applied per rating component, in field order.
pub const SCORE_WEIGHTS: [u64; 7] = [5, 1, 2, 4, 3, 3, 2];

/// Reputation vector of a participant, overwritten wholesale by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct Rating {
    /// Auctions settled without incident.
    pub deals_completed: u64,
    /// Cumulative payments made, in whole CCD.
    pub turnover: u64,
    /// Assessed value of parcels currently held, in whole CCD.
    pub holdings: u64,
    /// Years of recorded activity.
    pub tenure: u64,
    /// Externally verified references.
    pub references: u64,
    /// Completed off-chain checks.
    pub checks_passed: u64,
    /// Community endorsements.
    pub endorsements: u64,
}

/// Weighted sum of the rating components. Saturating so oracle input can
/// never panic the contract.
pub fn score(rating: &Rating) -> u64 {
    let components = [
        rating.deals_completed,
        rating.turnover,
        rating.holdings,
        rating.tenure,
        rating.references,
        rating.checks_passed,
        rating.endorsements,
    ];
    components
        .iter()
        .zip(SCORE_WEIGHTS.iter())
        .fold(0u64, |acc, (component, weight)| {
            acc.saturating_add(component.saturating_mul(*weight))
        })
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    fn rating(components: [u64; 7]) -> Rating {
        Rating {
            deals_completed: components[0],
            turnover: components[1],
            holdings: components[2],
            tenure: components[3],
            references: components[4],
            checks_passed: components[5],
            endorsements: components[6],
        }
    }

    #[concordium_test]
    fn test_score_weighted_sum() {
        claim_eq!(score(&rating([0; 7])), 0);
        claim_eq!(score(&rating([1, 0, 0, 0, 0, 0, 0])), 5);
        claim_eq!(score(&rating([1, 1, 1, 1, 1, 1, 1])), 20);
        claim_eq!(score(&rating([5, 175, 75, 10, 0, 0, 2])), 394);
    }

    #[concordium_test]
    fn test_score_orders_participants() {
        let modest = rating([5, 175, 75, 10, 0, 0, 2]);
        let established = rating([30, 920, 250, 4, 2, 1, 8]);
        claim!(score(&modest) < score(&established));
    }

    #[concordium_test]
    fn test_score_saturates() {
        claim_eq!(score(&rating([u64::MAX; 7])), u64::MAX);
    }
}
