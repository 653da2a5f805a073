use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidSchedule = 3,
    InvalidAmount = 4,
    PhaseViolation = 5,
    Unauthorized = 6,
    TransferFailure = 7,
    ExternalCallFailure = 8,
    UnknownPosition = 9,
    NothingToWithdraw = 10,
    MathOverflow = 11,
}
