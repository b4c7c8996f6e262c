use crate::types::{
    AuditEntry, Config, Error, Fundraiser, FundraiserDetails, Milestone, MilestoneStatus,
    WithdrawalRequest,
};
use soroban_sdk::{Address, Env, String, Vec};

/// Administrative setup: token, quorum thresholds, owners and validators.
pub trait AdminInterface {
    /// Initialize the contract.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to manage owners, validators and thresholds
    /// * `token` - Token contract used for donations and payouts
    /// * `owners` - Multi-sig owners; must be unique and non-empty
    /// * `required` - Owner approvals needed to execute a withdrawal
    /// * `required_validations` - Yes votes needed to approve a milestone
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        owners: Vec<Address>,
        required: u32,
        required_validations: u32,
    ) -> Result<(), Error>;

    fn get_config(env: Env) -> Result<Config, Error>;
    fn transfer_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error>;
    fn set_required_validations(
        env: Env,
        admin: Address,
        required_validations: u32,
    ) -> Result<(), Error>;

    fn add_owner(env: Env, admin: Address, owner: Address) -> Result<(), Error>;

    /// Fails with `InvalidThreshold` if fewer than `required` owners would remain.
    fn remove_owner(env: Env, admin: Address, owner: Address) -> Result<(), Error>;
    fn set_required(env: Env, admin: Address, required: u32) -> Result<(), Error>;
    fn get_owners(env: Env) -> Vec<Address>;
    fn required(env: Env) -> Result<u32, Error>;

    fn add_validator(env: Env, admin: Address, validator: Address) -> Result<(), Error>;
    fn remove_validator(env: Env, admin: Address, validator: Address) -> Result<(), Error>;
    fn add_fundraiser_validator(
        env: Env,
        admin: Address,
        fundraiser_id: u32,
        validator: Address,
    ) -> Result<(), Error>;
    fn remove_fundraiser_validator(
        env: Env,
        admin: Address,
        fundraiser_id: u32,
        validator: Address,
    ) -> Result<(), Error>;
    fn get_validators(env: Env) -> Vec<Address>;
    fn get_fundraiser_validators(env: Env, fundraiser_id: u32) -> Vec<Address>;
}

/// Fundraiser creation, donations and registry reads.
pub trait FundraiserInterface {
    /// Register a fundraiser and return its id. Ids start at 0.
    ///
    /// # Errors
    /// * `InvalidAmount` - `target_amount` is not positive
    /// * `EmptyText` / `TextTooLong` - title or description out of bounds
    fn create_fundraiser(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        target_amount: i128,
    ) -> Result<u32, Error>;

    /// Transfer `amount` tokens from `donor` into the fundraiser's pool.
    ///
    /// # Errors
    /// * `FundraiserNotFound`
    /// * `Inactive` - donations are paused
    /// * `InvalidAmount`
    fn donate(env: Env, donor: Address, fundraiser_id: u32, amount: i128) -> Result<(), Error>;

    /// Pause or resume donations. Creator or admin only.
    fn set_fundraiser_active(
        env: Env,
        caller: Address,
        fundraiser_id: u32,
        active: bool,
    ) -> Result<(), Error>;

    fn get_fundraiser_count(env: Env) -> u32;
    fn get_fundraiser(env: Env, fundraiser_id: u32) -> Result<Fundraiser, Error>;
    fn get_fundraiser_details(env: Env, fundraiser_id: u32) -> Result<FundraiserDetails, Error>;
    fn get_contribution(env: Env, fundraiser_id: u32, donor: Address) -> Result<i128, Error>;
    fn get_donors(env: Env, fundraiser_id: u32) -> Vec<Address>;
}

/// Milestone definition, proof, voting and release.
///
/// Proof, votes and releases always target the fundraiser's current
/// milestone; later milestones wait until it has been released.
pub trait MilestoneInterface {
    /// Append a milestone. Creator only. The first milestone of a fundraiser
    /// does not require proof; every later one does.
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the creator
    /// * `ExceedsTarget` - milestone amounts would sum past the target
    fn add_milestone(
        env: Env,
        creator: Address,
        fundraiser_id: u32,
        description: String,
        amount: i128,
    ) -> Result<u32, Error>;

    /// Attach proof of completion to the current milestone. Creator only.
    ///
    /// # Errors
    /// * `ProofNotRequired` - the current milestone needs no proof
    /// * `AlreadySubmitted`
    /// * `NoPendingMilestone` - every milestone has been released
    fn submit_milestone_proof(
        env: Env,
        creator: Address,
        fundraiser_id: u32,
        proof: String,
    ) -> Result<(), Error>;

    /// Cast a validator vote on the current milestone. Approval happens on
    /// the vote that brings yes votes up to the configured threshold.
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not a validator for this fundraiser
    /// * `AlreadyVoted`
    /// * `ProofRequired` - proof has not been submitted yet
    fn vote_milestone(
        env: Env,
        validator: Address,
        fundraiser_id: u32,
        approve: bool,
    ) -> Result<(), Error>;

    /// Pay the current, approved milestone to the creator. Creator or admin.
    /// Returns the amount paid.
    ///
    /// # Errors
    /// * `NotApproved`
    /// * `AlreadyReleased` - nothing left to release
    /// * `InsufficientPool` - available balance below the milestone amount
    fn release_milestone_funds(
        env: Env,
        caller: Address,
        fundraiser_id: u32,
    ) -> Result<i128, Error>;

    fn get_milestone(env: Env, fundraiser_id: u32, index: u32) -> Result<Milestone, Error>;
    fn get_milestones(env: Env, fundraiser_id: u32) -> Result<Vec<Milestone>, Error>;
    fn get_milestone_status(
        env: Env,
        fundraiser_id: u32,
        index: u32,
    ) -> Result<MilestoneStatus, Error>;
    fn get_current_milestone(env: Env, fundraiser_id: u32) -> Result<Milestone, Error>;

    fn is_validator(env: Env, fundraiser_id: u32, address: Address) -> bool;
    fn has_voted(env: Env, fundraiser_id: u32, index: u32, validator: Address) -> bool;
    fn get_vote(env: Env, fundraiser_id: u32, index: u32, validator: Address) -> Option<bool>;
}

/// Owner-approved withdrawals from a fundraiser's pool.
pub trait WithdrawalInterface {
    /// Propose a transfer of `amount` from `fundraiser_id`'s pool to `to`.
    /// Owners only. The request starts with no approvals.
    fn create_withdrawal_request(
        env: Env,
        proposer: Address,
        fundraiser_id: u32,
        to: Address,
        amount: i128,
        reason: String,
    ) -> Result<u32, Error>;

    /// # Errors
    /// * `Unauthorized` - caller is not an owner
    /// * `AlreadyExecuted`
    /// * `AlreadyApproved`
    fn approve_withdrawal_request(env: Env, owner: Address, request_id: u32) -> Result<(), Error>;

    /// # Errors
    /// * `InsufficientApprovals` - fewer than `required` current owners approved
    /// * `AlreadyExecuted`
    /// * `InsufficientPool`
    fn execute_withdrawal_request(env: Env, caller: Address, request_id: u32) -> Result<(), Error>;

    fn get_withdrawal_request(env: Env, request_id: u32) -> Result<WithdrawalRequest, Error>;
    fn get_withdrawal_request_count(env: Env) -> u32;
    fn get_approvers(env: Env, request_id: u32) -> Result<Vec<Address>, Error>;
}

/// Read access to the append-only feed of committed transitions.
pub trait AuditInterface {
    fn get_audit_count(env: Env) -> u32;
    fn get_audit_entry(env: Env, seq: u32) -> Result<AuditEntry, Error>;

    /// At most 50 entries starting at `start`.
    fn get_audit_log(env: Env, start: u32, limit: u32) -> Vec<AuditEntry>;
}
