use soroban_sdk::{contracterror, contracttype, Address, String, Vec};

pub const MAX_TITLE_LEN: u32 = 100;
pub const MAX_TEXT_LEN: u32 = 1000;
pub const MAX_AUDIT_PAGE: u32 = 50;

/// Storage keys for contract data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,                             // Admin, token and quorum settings
    Owners,                             // Multi-sig owner addresses
    Validators,                         // Platform-wide validators
    FundraiserCount,                    // Counter for fundraiser IDs
    Fundraiser(u32),                    // Fundraiser ID -> Fundraiser
    Contribution(u32, Address),         // (Fundraiser ID, donor) -> cumulative amount
    Donors(u32),                        // Fundraiser ID -> Vec<Address>
    Milestone(u32, u32),                // (Fundraiser ID, index) -> Milestone
    FundraiserValidators(u32),          // Fundraiser ID -> Vec<Address>
    Vote(u32, u32, Address),            // (Fundraiser ID, index, validator) -> approve
    WithdrawalCount,                    // Counter for withdrawal request IDs
    Withdrawal(u32),                    // Request ID -> WithdrawalRequest
    AuditCount,                         // Number of feed entries
    AuditEntry(u32),                    // Sequence -> AuditEntry
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub token: Address,
    pub required: u32,             // Multi-sig approvals needed to execute
    pub required_validations: u32, // Yes votes needed to approve a milestone
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fundraiser {
    pub id: u32,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub target_amount: i128,
    pub raised_amount: i128,    // Cumulative donations, never decreases
    pub released_amount: i128,  // Paid out through milestone releases
    pub withdrawn_amount: i128, // Paid out through executed withdrawal requests
    pub active: bool,
    pub milestone_count: u32,
    pub current_milestone_index: u32,
    pub created_at: u64,
}

impl Fundraiser {
    /// Funds still held for this fundraiser.
    pub fn available(&self) -> i128 {
        self.raised_amount - self.released_amount - self.withdrawn_amount
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundraiserDetails {
    pub id: u32,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub target_amount: i128,
    pub raised_amount: i128,
    pub available_balance: i128,
    pub active: bool,
    pub milestone_count: u32,
    pub current_milestone_index: u32,
    pub donor_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub fundraiser_id: u32,
    pub index: u32,
    pub description: String,
    pub amount: i128,
    pub requires_proof: bool,
    pub proof: String,
    pub proof_submitted: bool,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub approved: bool,
    pub funds_released: bool,
    pub approved_at: u64,
    pub released_at: u64,
}

impl Milestone {
    pub fn status(&self) -> MilestoneStatus {
        if self.funds_released {
            MilestoneStatus::Released
        } else if self.approved {
            MilestoneStatus::Approved
        } else if self.proof_submitted {
            MilestoneStatus::ProofSubmitted
        } else {
            MilestoneStatus::Created
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    Created,
    ProofSubmitted,
    Approved,
    Released,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub id: u32,
    pub fundraiser_id: u32,
    pub proposer: Address,
    pub to: Address,
    pub amount: i128,
    pub reason: String,
    pub approvers: Vec<Address>,
    pub executed: bool,
    pub created_at: u64,
    pub executed_at: u64,
}

/// A committed state transition, as recorded in the feed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeedEvent {
    FundraiserCreated(u32, i128),             // fundraiser, target
    DonationReceived(u32, Address, i128),     // fundraiser, donor, amount
    MilestoneCreated(u32, u32, i128),         // fundraiser, index, amount
    ProofSubmitted(u32, u32),                 // fundraiser, index
    MilestoneVoted(u32, u32, bool),           // fundraiser, index, approve
    MilestoneApproved(u32, u32, u32),         // fundraiser, index, yes votes
    FundsReleased(u32, u32, i128),            // fundraiser, index, amount
    WithdrawalRequested(u32, u32, i128),      // request, fundraiser, amount
    WithdrawalApproved(u32, u32),             // request, approvals so far
    WithdrawalExecuted(u32, Address, i128),   // request, recipient, amount
    FundraiserStatusChanged(u32, bool),       // fundraiser, active
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditEntry {
    pub seq: u32,
    pub actor: Address,
    pub event: FeedEvent,
    pub timestamp: u64,
    pub ledger: u32,
}

// Error definitions
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    // Lookups
    FundraiserNotFound = 101,
    MilestoneNotFound = 102,
    WithdrawalNotFound = 103,
    OwnerNotFound = 104,
    ValidatorNotFound = 105,
    AuditEntryNotFound = 106,
    // Lifecycle
    Inactive = 201,
    ProofNotRequired = 202,
    ProofRequired = 203,
    NotApproved = 204,
    InsufficientApprovals = 205,
    NoPendingMilestone = 206,
    // Repeated actions
    AlreadySubmitted = 301,
    AlreadyVoted = 302,
    AlreadyReleased = 303,
    AlreadyApproved = 304,
    AlreadyExecuted = 305,
    DuplicateOwner = 306,
    DuplicateValidator = 307,
    // Balances
    InsufficientPool = 401,
    // Inputs
    InvalidAmount = 501,
    ExceedsTarget = 502,
    AmountOverflow = 503,
    InvalidThreshold = 504,
    EmptyText = 505,
    TextTooLong = 506,
}

/// Coarse failure categories surfaced to callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Configuration,
    Unauthorized,
    NotFound,
    InvalidState,
    AlreadyDone,
    InsufficientFunds,
    InvalidAmount,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            3 => ErrorKind::Unauthorized,
            1..=99 => ErrorKind::Configuration,
            100..=199 => ErrorKind::NotFound,
            200..=299 => ErrorKind::InvalidState,
            300..=399 => ErrorKind::AlreadyDone,
            400..=499 => ErrorKind::InsufficientFunds,
            _ => ErrorKind::InvalidAmount,
        }
    }
}
