#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

mod admin;
mod audit;
mod interface;
mod milestones;
mod multisig;
mod pool;
mod registry;
mod types;
mod validators;

pub use crate::interface::*;
pub use crate::types::*;

use crate::admin::AdminModule;
use crate::audit::AuditFeed;
use crate::milestones::MilestoneLedger;
use crate::multisig::{OwnerSet, WithdrawalMultiSig};
use crate::registry::FundraiserRegistry;
use crate::validators::ValidatorSet;

#[contract]
pub struct MilestoneFundContract;

#[contractimpl]
impl AdminInterface for MilestoneFundContract {
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        owners: Vec<Address>,
        required: u32,
        required_validations: u32,
    ) -> Result<(), Error> {
        AdminModule::init(&env, &admin, &token, &owners, required, required_validations)
    }

    fn get_config(env: Env) -> Result<Config, Error> {
        AdminModule::config(&env)
    }

    fn transfer_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        AdminModule::transfer_admin(&env, &admin, &new_admin)
    }

    fn set_required_validations(
        env: Env,
        admin: Address,
        required_validations: u32,
    ) -> Result<(), Error> {
        AdminModule::set_required_validations(&env, &admin, required_validations)
    }

    fn add_owner(env: Env, admin: Address, owner: Address) -> Result<(), Error> {
        OwnerSet::add_owner(&env, &admin, &owner)
    }

    fn remove_owner(env: Env, admin: Address, owner: Address) -> Result<(), Error> {
        OwnerSet::remove_owner(&env, &admin, &owner)
    }

    fn set_required(env: Env, admin: Address, required: u32) -> Result<(), Error> {
        OwnerSet::set_required(&env, &admin, required)
    }

    fn get_owners(env: Env) -> Vec<Address> {
        OwnerSet::get_owners(&env)
    }

    fn required(env: Env) -> Result<u32, Error> {
        OwnerSet::required(&env)
    }

    fn add_validator(env: Env, admin: Address, validator: Address) -> Result<(), Error> {
        ValidatorSet::add_validator(&env, &admin, &validator)
    }

    fn remove_validator(env: Env, admin: Address, validator: Address) -> Result<(), Error> {
        ValidatorSet::remove_validator(&env, &admin, &validator)
    }

    fn add_fundraiser_validator(
        env: Env,
        admin: Address,
        fundraiser_id: u32,
        validator: Address,
    ) -> Result<(), Error> {
        ValidatorSet::add_fundraiser_validator(&env, &admin, fundraiser_id, &validator)
    }

    fn remove_fundraiser_validator(
        env: Env,
        admin: Address,
        fundraiser_id: u32,
        validator: Address,
    ) -> Result<(), Error> {
        ValidatorSet::remove_fundraiser_validator(&env, &admin, fundraiser_id, &validator)
    }

    fn get_validators(env: Env) -> Vec<Address> {
        ValidatorSet::get_validators(&env)
    }

    fn get_fundraiser_validators(env: Env, fundraiser_id: u32) -> Vec<Address> {
        ValidatorSet::get_fundraiser_validators(&env, fundraiser_id)
    }
}

#[contractimpl]
impl FundraiserInterface for MilestoneFundContract {
    fn create_fundraiser(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        target_amount: i128,
    ) -> Result<u32, Error> {
        creator.require_auth();
        FundraiserRegistry::create_fundraiser(&env, &creator, title, description, target_amount)
    }

    fn donate(env: Env, donor: Address, fundraiser_id: u32, amount: i128) -> Result<(), Error> {
        donor.require_auth();
        FundraiserRegistry::donate(&env, &donor, fundraiser_id, amount)
    }

    fn set_fundraiser_active(
        env: Env,
        caller: Address,
        fundraiser_id: u32,
        active: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        FundraiserRegistry::set_active(&env, &caller, fundraiser_id, active)
    }

    fn get_fundraiser_count(env: Env) -> u32 {
        FundraiserRegistry::count(&env)
    }

    fn get_fundraiser(env: Env, fundraiser_id: u32) -> Result<Fundraiser, Error> {
        FundraiserRegistry::get(&env, fundraiser_id)
    }

    fn get_fundraiser_details(env: Env, fundraiser_id: u32) -> Result<FundraiserDetails, Error> {
        FundraiserRegistry::get_details(&env, fundraiser_id)
    }

    fn get_contribution(env: Env, fundraiser_id: u32, donor: Address) -> Result<i128, Error> {
        FundraiserRegistry::get_contribution(&env, fundraiser_id, &donor)
    }

    fn get_donors(env: Env, fundraiser_id: u32) -> Vec<Address> {
        FundraiserRegistry::get_donors(&env, fundraiser_id)
    }
}

#[contractimpl]
impl MilestoneInterface for MilestoneFundContract {
    fn add_milestone(
        env: Env,
        creator: Address,
        fundraiser_id: u32,
        description: String,
        amount: i128,
    ) -> Result<u32, Error> {
        creator.require_auth();
        MilestoneLedger::add_milestone(&env, &creator, fundraiser_id, description, amount)
    }

    fn submit_milestone_proof(
        env: Env,
        creator: Address,
        fundraiser_id: u32,
        proof: String,
    ) -> Result<(), Error> {
        creator.require_auth();
        MilestoneLedger::submit_proof(&env, &creator, fundraiser_id, proof)
    }

    fn vote_milestone(
        env: Env,
        validator: Address,
        fundraiser_id: u32,
        approve: bool,
    ) -> Result<(), Error> {
        validator.require_auth();
        MilestoneLedger::vote(&env, &validator, fundraiser_id, approve)
    }

    fn release_milestone_funds(
        env: Env,
        caller: Address,
        fundraiser_id: u32,
    ) -> Result<i128, Error> {
        caller.require_auth();
        MilestoneLedger::release_funds(&env, &caller, fundraiser_id)
    }

    fn get_milestone(env: Env, fundraiser_id: u32, index: u32) -> Result<Milestone, Error> {
        MilestoneLedger::get(&env, fundraiser_id, index)
    }

    fn get_milestones(env: Env, fundraiser_id: u32) -> Result<Vec<Milestone>, Error> {
        MilestoneLedger::get_all(&env, fundraiser_id)
    }

    fn get_milestone_status(
        env: Env,
        fundraiser_id: u32,
        index: u32,
    ) -> Result<MilestoneStatus, Error> {
        Ok(MilestoneLedger::get(&env, fundraiser_id, index)?.status())
    }

    fn get_current_milestone(env: Env, fundraiser_id: u32) -> Result<Milestone, Error> {
        MilestoneLedger::get_current(&env, fundraiser_id)
    }

    fn is_validator(env: Env, fundraiser_id: u32, address: Address) -> bool {
        ValidatorSet::is_validator(&env, fundraiser_id, &address)
    }

    fn has_voted(env: Env, fundraiser_id: u32, index: u32, validator: Address) -> bool {
        ValidatorSet::has_voted(&env, fundraiser_id, index, &validator)
    }

    fn get_vote(env: Env, fundraiser_id: u32, index: u32, validator: Address) -> Option<bool> {
        ValidatorSet::get_vote(&env, fundraiser_id, index, &validator)
    }
}

#[contractimpl]
impl WithdrawalInterface for MilestoneFundContract {
    fn create_withdrawal_request(
        env: Env,
        proposer: Address,
        fundraiser_id: u32,
        to: Address,
        amount: i128,
        reason: String,
    ) -> Result<u32, Error> {
        proposer.require_auth();
        WithdrawalMultiSig::create_request(&env, &proposer, fundraiser_id, &to, amount, reason)
    }

    fn approve_withdrawal_request(env: Env, owner: Address, request_id: u32) -> Result<(), Error> {
        owner.require_auth();
        WithdrawalMultiSig::approve(&env, &owner, request_id)
    }

    fn execute_withdrawal_request(env: Env, caller: Address, request_id: u32) -> Result<(), Error> {
        caller.require_auth();
        WithdrawalMultiSig::execute(&env, &caller, request_id)
    }

    fn get_withdrawal_request(env: Env, request_id: u32) -> Result<WithdrawalRequest, Error> {
        WithdrawalMultiSig::get(&env, request_id)
    }

    fn get_withdrawal_request_count(env: Env) -> u32 {
        WithdrawalMultiSig::count(&env)
    }

    fn get_approvers(env: Env, request_id: u32) -> Result<Vec<Address>, Error> {
        WithdrawalMultiSig::get_approvers(&env, request_id)
    }
}

#[contractimpl]
impl AuditInterface for MilestoneFundContract {
    fn get_audit_count(env: Env) -> u32 {
        AuditFeed::count(&env)
    }

    fn get_audit_entry(env: Env, seq: u32) -> Result<AuditEntry, Error> {
        AuditFeed::get_entry(&env, seq)
    }

    fn get_audit_log(env: Env, start: u32, limit: u32) -> Vec<AuditEntry> {
        AuditFeed::get_log(&env, start, limit)
    }
}
