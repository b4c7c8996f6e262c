use crate::admin::AdminModule;
use crate::audit::AuditFeed;
use crate::pool::{Debit, Pool};
use crate::registry::FundraiserRegistry;
use crate::types::*;
use crate::validators::ValidatorSet;
use soroban_sdk::{log, Address, Env, String, Vec};

/// Ordered milestones of each fundraiser.
///
/// Only the milestone at `current_milestone_index` can receive proof, votes or
/// a release. The index advances only after a successful release, so
/// milestone `k + 1` is never actionable before milestone `k` has paid out.
pub struct MilestoneLedger;

impl MilestoneLedger {
    pub fn add_milestone(
        env: &Env,
        creator: &Address,
        fundraiser_id: u32,
        description: String,
        amount: i128,
    ) -> Result<u32, Error> {
        let mut fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;
        if &fundraiser.creator != creator {
            return Err(Error::Unauthorized);
        }
        Pool::ensure_positive(amount)?;
        if description.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }

        // Cumulative milestone amounts may not exceed the target
        let committed = Self::committed_amount(env, &fundraiser)?;
        let new_total = committed.checked_add(amount).ok_or(Error::AmountOverflow)?;
        if new_total > fundraiser.target_amount {
            return Err(Error::ExceedsTarget);
        }

        let index = fundraiser.milestone_count;
        let milestone = Milestone {
            fundraiser_id,
            index,
            description,
            amount,
            requires_proof: index != 0,
            proof: String::from_str(env, ""),
            proof_submitted: false,
            yes_votes: 0,
            no_votes: 0,
            approved: false,
            funds_released: false,
            approved_at: 0,
            released_at: 0,
        };
        Self::save(env, &milestone);

        fundraiser.milestone_count = index + 1;
        FundraiserRegistry::save(env, &fundraiser);

        AuditFeed::record(env, creator, FeedEvent::MilestoneCreated(fundraiser_id, index, amount));

        Ok(index)
    }

    pub fn submit_proof(
        env: &Env,
        creator: &Address,
        fundraiser_id: u32,
        proof: String,
    ) -> Result<(), Error> {
        let fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;
        if &fundraiser.creator != creator {
            return Err(Error::Unauthorized);
        }

        let mut milestone = Self::current(env, &fundraiser)?;
        if !milestone.requires_proof {
            return Err(Error::ProofNotRequired);
        }
        if milestone.proof_submitted {
            return Err(Error::AlreadySubmitted);
        }
        if proof.len() == 0 {
            return Err(Error::EmptyText);
        }
        if proof.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }

        milestone.proof = proof;
        milestone.proof_submitted = true;
        Self::save(env, &milestone);

        AuditFeed::record(env, creator, FeedEvent::ProofSubmitted(fundraiser_id, milestone.index));
        Ok(())
    }

    pub fn vote(
        env: &Env,
        validator: &Address,
        fundraiser_id: u32,
        approve: bool,
    ) -> Result<(), Error> {
        let config = AdminModule::config(env)?;
        let fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;

        if !ValidatorSet::is_validator(env, fundraiser_id, validator) {
            return Err(Error::Unauthorized);
        }
        let mut milestone = Self::current(env, &fundraiser)?;
        if ValidatorSet::has_voted(env, fundraiser_id, milestone.index, validator) {
            return Err(Error::AlreadyVoted);
        }
        if milestone.requires_proof && !milestone.proof_submitted {
            return Err(Error::ProofRequired);
        }

        let reached = ValidatorSet::tally(
            env,
            &mut milestone,
            validator,
            approve,
            config.required_validations,
        );
        if reached {
            milestone.approved_at = env.ledger().timestamp();
        }
        Self::save(env, &milestone);

        AuditFeed::record(
            env,
            validator,
            FeedEvent::MilestoneVoted(fundraiser_id, milestone.index, approve),
        );
        if reached {
            log!(env, "milestone {}/{} approved", fundraiser_id, milestone.index);
            AuditFeed::record(
                env,
                validator,
                FeedEvent::MilestoneApproved(fundraiser_id, milestone.index, milestone.yes_votes),
            );
        }
        Ok(())
    }

    /// Pay the current milestone to the creator and advance the index.
    ///
    /// A retry after the last milestone has been paid fails with
    /// `AlreadyReleased`; a retry while a later milestone is pending fails on
    /// that milestone's own state. Neither path pays twice.
    pub fn release_funds(env: &Env, caller: &Address, fundraiser_id: u32) -> Result<i128, Error> {
        let mut fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;
        if &fundraiser.creator != caller && !AdminModule::is_admin(env, caller)? {
            return Err(Error::Unauthorized);
        }

        if fundraiser.milestone_count == 0 {
            return Err(Error::MilestoneNotFound);
        }
        if fundraiser.current_milestone_index >= fundraiser.milestone_count {
            return Err(Error::AlreadyReleased);
        }

        let mut milestone = Self::current(env, &fundraiser)?;
        if milestone.funds_released {
            return Err(Error::AlreadyReleased);
        }
        if !milestone.approved {
            return Err(Error::NotApproved);
        }

        Pool::debit(env, &mut fundraiser, milestone.amount, Debit::Release)?;

        milestone.funds_released = true;
        milestone.released_at = env.ledger().timestamp();
        fundraiser.current_milestone_index += 1;
        Self::save(env, &milestone);
        FundraiserRegistry::save(env, &fundraiser);

        Pool::transfer_out(env, &fundraiser.creator, milestone.amount)?;

        AuditFeed::record(
            env,
            caller,
            FeedEvent::FundsReleased(fundraiser_id, milestone.index, milestone.amount),
        );
        Ok(milestone.amount)
    }

    /// Approve every current milestone whose yes votes already meet
    /// `required_validations`. Only current milestones can hold votes.
    /// Returns the number of milestones approved.
    pub fn reevaluate_quorum(env: &Env, actor: &Address, required_validations: u32) -> u32 {
        let mut approved = 0;
        for fundraiser_id in 0..FundraiserRegistry::count(env) {
            let Ok(fundraiser) = FundraiserRegistry::get(env, fundraiser_id) else {
                continue;
            };
            let Ok(mut milestone) = Self::current(env, &fundraiser) else {
                continue;
            };
            if !ValidatorSet::apply_quorum(&mut milestone, required_validations) {
                continue;
            }

            milestone.approved_at = env.ledger().timestamp();
            Self::save(env, &milestone);
            log!(env, "milestone {}/{} approved", fundraiser_id, milestone.index);
            AuditFeed::record(
                env,
                actor,
                FeedEvent::MilestoneApproved(fundraiser_id, milestone.index, milestone.yes_votes),
            );
            approved += 1;
        }
        approved
    }

    pub fn get(env: &Env, fundraiser_id: u32, index: u32) -> Result<Milestone, Error> {
        FundraiserRegistry::get(env, fundraiser_id)?;
        env.storage()
            .persistent()
            .get(&DataKey::Milestone(fundraiser_id, index))
            .ok_or(Error::MilestoneNotFound)
    }

    pub fn get_all(env: &Env, fundraiser_id: u32) -> Result<Vec<Milestone>, Error> {
        let fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;
        let mut milestones = Vec::new(env);
        for index in 0..fundraiser.milestone_count {
            milestones.push_back(Self::load(env, fundraiser_id, index)?);
        }
        Ok(milestones)
    }

    pub fn get_current(env: &Env, fundraiser_id: u32) -> Result<Milestone, Error> {
        let fundraiser = FundraiserRegistry::get(env, fundraiser_id)?;
        Self::current(env, &fundraiser)
    }

    fn current(env: &Env, fundraiser: &Fundraiser) -> Result<Milestone, Error> {
        if fundraiser.current_milestone_index >= fundraiser.milestone_count {
            return Err(Error::NoPendingMilestone);
        }
        Self::load(env, fundraiser.id, fundraiser.current_milestone_index)
    }

    fn load(env: &Env, fundraiser_id: u32, index: u32) -> Result<Milestone, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Milestone(fundraiser_id, index))
            .ok_or(Error::MilestoneNotFound)
    }

    fn save(env: &Env, milestone: &Milestone) {
        env.storage()
            .persistent()
            .set(&DataKey::Milestone(milestone.fundraiser_id, milestone.index), milestone);
    }

    fn committed_amount(env: &Env, fundraiser: &Fundraiser) -> Result<i128, Error> {
        let mut total: i128 = 0;
        for index in 0..fundraiser.milestone_count {
            let milestone = Self::load(env, fundraiser.id, index)?;
            total = total.checked_add(milestone.amount).ok_or(Error::AmountOverflow)?;
        }
        Ok(total)
    }
}
