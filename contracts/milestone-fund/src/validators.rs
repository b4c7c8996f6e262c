use crate::admin::AdminModule;
use crate::registry::FundraiserRegistry;
use crate::types::{DataKey, Error, Milestone};
use soroban_sdk::{log, symbol_short, Address, Env, Vec};

/// Validator membership and the per-milestone vote tally.
///
/// A validator is recognized for a fundraiser if it is either on the
/// platform-wide list or on that fundraiser's own list. Both lists are admin
/// managed and are the only source of validator identity.
pub struct ValidatorSet;

impl ValidatorSet {
    pub fn add_validator(env: &Env, admin: &Address, validator: &Address) -> Result<(), Error> {
        AdminModule::verify_admin(env, admin)?;

        let mut validators = Self::get_validators(env);
        if validators.contains(validator) {
            return Err(Error::DuplicateValidator);
        }
        validators.push_back(validator.clone());
        env.storage()
            .instance()
            .set(&DataKey::Validators, &validators);

        env.events()
            .publish((symbol_short!("val_add"),), validator.clone());
        Ok(())
    }

    pub fn remove_validator(env: &Env, admin: &Address, validator: &Address) -> Result<(), Error> {
        AdminModule::verify_admin(env, admin)?;

        let mut validators = Self::get_validators(env);
        let index = validators
            .first_index_of(validator)
            .ok_or(Error::ValidatorNotFound)?;
        validators.remove(index);
        env.storage()
            .instance()
            .set(&DataKey::Validators, &validators);

        env.events()
            .publish((symbol_short!("val_rm"),), validator.clone());
        Ok(())
    }

    pub fn add_fundraiser_validator(
        env: &Env,
        admin: &Address,
        fundraiser_id: u32,
        validator: &Address,
    ) -> Result<(), Error> {
        AdminModule::verify_admin(env, admin)?;
        FundraiserRegistry::get(env, fundraiser_id)?;

        let mut validators = Self::get_fundraiser_validators(env, fundraiser_id);
        if validators.contains(validator) {
            return Err(Error::DuplicateValidator);
        }
        validators.push_back(validator.clone());
        env.storage()
            .persistent()
            .set(&DataKey::FundraiserValidators(fundraiser_id), &validators);

        env.events()
            .publish((symbol_short!("val_add"), fundraiser_id), validator.clone());
        Ok(())
    }

    pub fn remove_fundraiser_validator(
        env: &Env,
        admin: &Address,
        fundraiser_id: u32,
        validator: &Address,
    ) -> Result<(), Error> {
        AdminModule::verify_admin(env, admin)?;
        FundraiserRegistry::get(env, fundraiser_id)?;

        let mut validators = Self::get_fundraiser_validators(env, fundraiser_id);
        let index = validators
            .first_index_of(validator)
            .ok_or(Error::ValidatorNotFound)?;
        validators.remove(index);
        env.storage()
            .persistent()
            .set(&DataKey::FundraiserValidators(fundraiser_id), &validators);

        env.events()
            .publish((symbol_short!("val_rm"), fundraiser_id), validator.clone());
        Ok(())
    }

    pub fn get_validators(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Validators)
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn get_fundraiser_validators(env: &Env, fundraiser_id: u32) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::FundraiserValidators(fundraiser_id))
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn is_validator(env: &Env, fundraiser_id: u32, address: &Address) -> bool {
        Self::get_validators(env).contains(address)
            || Self::get_fundraiser_validators(env, fundraiser_id).contains(address)
    }

    pub fn has_voted(env: &Env, fundraiser_id: u32, index: u32, validator: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Vote(fundraiser_id, index, validator.clone()))
    }

    pub fn get_vote(
        env: &Env,
        fundraiser_id: u32,
        index: u32,
        validator: &Address,
    ) -> Option<bool> {
        env.storage()
            .persistent()
            .get(&DataKey::Vote(fundraiser_id, index, validator.clone()))
    }

    /// Record a vote and update the tally on `milestone`. The caller has
    /// already checked membership and that this validator has not voted.
    ///
    /// Returns true when this vote moved the milestone to approved.
    pub fn tally(
        env: &Env,
        milestone: &mut Milestone,
        validator: &Address,
        approve: bool,
        required_validations: u32,
    ) -> bool {
        env.storage().persistent().set(
            &DataKey::Vote(milestone.fundraiser_id, milestone.index, validator.clone()),
            &approve,
        );

        if approve {
            milestone.yes_votes += 1;
        } else {
            milestone.no_votes += 1;
        }
        log!(
            env,
            "milestone {}/{} tally yes {} no {} required {}",
            milestone.fundraiser_id,
            milestone.index,
            milestone.yes_votes,
            milestone.no_votes,
            required_validations
        );

        Self::apply_quorum(milestone, required_validations)
    }

    /// Approval is one-way: a reached quorum is never undone.
    pub fn apply_quorum(milestone: &mut Milestone, required_validations: u32) -> bool {
        if milestone.approved {
            return false;
        }
        if milestone.yes_votes >= required_validations {
            milestone.approved = true;
            return true;
        }
        false
    }
}
