use crate::admin::AdminModule;
use crate::audit::AuditFeed;
use crate::pool::Pool;
use crate::types::*;
use soroban_sdk::{Address, Env, String, Vec};

pub struct FundraiserRegistry;

impl FundraiserRegistry {
    pub fn create_fundraiser(
        env: &Env,
        creator: &Address,
        title: String,
        description: String,
        target_amount: i128,
    ) -> Result<u32, Error> {
        AdminModule::config(env)?;

        // Validate inputs
        Pool::ensure_positive(target_amount)?;
        if title.len() == 0 {
            return Err(Error::EmptyText);
        }
        if title.len() > MAX_TITLE_LEN || description.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }

        let id = Self::count(env);
        let fundraiser = Fundraiser {
            id,
            creator: creator.clone(),
            title,
            description,
            target_amount,
            raised_amount: 0,
            released_amount: 0,
            withdrawn_amount: 0,
            active: true,
            milestone_count: 0,
            current_milestone_index: 0,
            created_at: env.ledger().timestamp(),
        };

        Self::save(env, &fundraiser);
        env.storage()
            .instance()
            .set(&DataKey::FundraiserCount, &(id + 1));

        AuditFeed::record(env, creator, FeedEvent::FundraiserCreated(id, target_amount));

        Ok(id)
    }

    pub fn donate(
        env: &Env,
        donor: &Address,
        fundraiser_id: u32,
        amount: i128,
    ) -> Result<(), Error> {
        let mut fundraiser = Self::get(env, fundraiser_id)?;

        // Validate fundraiser state
        if !fundraiser.active {
            return Err(Error::Inactive);
        }
        Pool::ensure_positive(amount)?;

        Pool::credit(&mut fundraiser, amount)?;

        let key = DataKey::Contribution(fundraiser_id, donor.clone());
        let previous: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        let total = previous.checked_add(amount).ok_or(Error::AmountOverflow)?;

        Pool::transfer_in(env, donor, amount)?;

        if previous == 0 {
            let mut donors = Self::get_donors(env, fundraiser_id);
            donors.push_back(donor.clone());
            env.storage()
                .persistent()
                .set(&DataKey::Donors(fundraiser_id), &donors);
        }
        env.storage().persistent().set(&key, &total);
        Self::save(env, &fundraiser);

        AuditFeed::record(
            env,
            donor,
            FeedEvent::DonationReceived(fundraiser_id, donor.clone(), amount),
        );

        Ok(())
    }

    /// Pause or resume donations. Milestone and withdrawal workflows are not
    /// affected.
    pub fn set_active(
        env: &Env,
        caller: &Address,
        fundraiser_id: u32,
        active: bool,
    ) -> Result<(), Error> {
        let mut fundraiser = Self::get(env, fundraiser_id)?;
        if &fundraiser.creator != caller && !AdminModule::is_admin(env, caller)? {
            return Err(Error::Unauthorized);
        }
        if fundraiser.active == active {
            return Ok(());
        }

        fundraiser.active = active;
        Self::save(env, &fundraiser);

        AuditFeed::record(env, caller, FeedEvent::FundraiserStatusChanged(fundraiser_id, active));
        Ok(())
    }

    pub fn count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::FundraiserCount)
            .unwrap_or(0u32)
    }

    pub fn get(env: &Env, fundraiser_id: u32) -> Result<Fundraiser, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Fundraiser(fundraiser_id))
            .ok_or(Error::FundraiserNotFound)
    }

    pub(crate) fn save(env: &Env, fundraiser: &Fundraiser) {
        env.storage()
            .persistent()
            .set(&DataKey::Fundraiser(fundraiser.id), fundraiser);
    }

    pub fn get_details(env: &Env, fundraiser_id: u32) -> Result<FundraiserDetails, Error> {
        let fundraiser = Self::get(env, fundraiser_id)?;
        let donor_count = Self::get_donors(env, fundraiser_id).len();

        Ok(FundraiserDetails {
            id: fundraiser.id,
            available_balance: fundraiser.available(),
            creator: fundraiser.creator,
            title: fundraiser.title,
            description: fundraiser.description,
            target_amount: fundraiser.target_amount,
            raised_amount: fundraiser.raised_amount,
            active: fundraiser.active,
            milestone_count: fundraiser.milestone_count,
            current_milestone_index: fundraiser.current_milestone_index,
            donor_count,
        })
    }

    pub fn get_contribution(env: &Env, fundraiser_id: u32, donor: &Address) -> Result<i128, Error> {
        Self::get(env, fundraiser_id)?;
        Ok(env
            .storage()
            .persistent()
            .get(&DataKey::Contribution(fundraiser_id, donor.clone()))
            .unwrap_or(0))
    }

    pub fn get_donors(env: &Env, fundraiser_id: u32) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Donors(fundraiser_id))
            .unwrap_or_else(|| Vec::new(env))
    }
}
