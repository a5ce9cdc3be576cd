use concordium_std::*;

/// The custom errors the contracts can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Caller holds none of the roles required for this call (Error code: -4).
    NotAuthorized,
    /// Target address is the null identity or otherwise not a valid role
    /// target (Error code: -5).
    InvalidAddress,
    /// Auction end time is not in the future (Error code: -6).
    InvalidEndTime,
    /// Bidder already holds an application on this parcel (Error code: -7).
    AlreadyApplied,
    /// Attached amount is below the required deposit (Error code: -8).
    InsufficientFunds,
    /// Attached amount is below the winner's captured price (Error code: -9).
    BidTooLow,
    /// Withdrawal exceeds the tracked treasury balance (Error code: -10).
    InsufficientBalance,
    /// No auction record exists for this parcel (Error code: -11).
    AuctionNotExists,
    /// Bidding on this parcel has ended (Error code: -12).
    AuctionHasEnded,
    /// The auction is still accepting applications (Error code: -13).
    AuctionIsActive,
    /// The parcel was already sold (Error code: -14).
    AlreadySold,
    /// The claim window has expired (Error code: -15).
    ClaimExpired,
    /// Caller is not the recorded winner (Error code: -16).
    NotWinner,
    /// Unknown token (Error code: -17).
    UnknownToken,
    /// The `from` address does not hold the token (Error code: -18).
    NotTokenOwner,
    /// Failed to invoke a contract (Error code: -19).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -20).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}
