use chrono::{DateTime, FixedOffset};
use fake::{faker::internet::en::SafeEmail, Dummy, Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::onboarding::OnboardingStep,
    model::{account::Account, profile::Profile},
    repository::account::create_account,
};

/// Inserts accounts together with their blank onboarding profile.
pub struct AccountFactory<T: Clone> {
    modifier_one: fn(x: &Account, ext: T) -> Account,
    modifier_many: fn(x: &Account, idx: usize, ext: T) -> Account,
}

impl<T: Clone> Default for AccountFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> AccountFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Account, ext: T) -> Account) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Account, idx: usize, ext: T) -> Account) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Account> {
        let data = (self.modifier_one)(&AccountDummy::generate(), ext);
        let mut tx = db.begin().await?;
        create_account(&mut tx, &data, &blank_profile(&data)).await?;
        tx.commit().await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Account>> {
        let mut result: Vec<Account> = vec![];
        for idx in 0..num as usize {
            result.push((self.modifier_many)(
                &AccountDummy::generate(),
                idx,
                ext.clone(),
            ));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            create_account(&mut tx, item, &blank_profile(item)).await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

/// Profile as sign-up leaves it; the username is the local part of the email.
pub fn blank_profile(account: &Account) -> Profile {
    let username = account
        .email
        .split('@')
        .next()
        .filter(|x| !x.is_empty())
        .map(|x| x.to_string());
    Profile {
        id: account.id,
        email: account.email.clone(),
        username,
        account_type: None,
        language: None,
        onboarding_completed: false,
        onboarding_state: OnboardingStep::NeedsAccountType.as_str().to_string(),
        created_date: account.created_date,
        updated_date: account.updated_date,
    }
}

#[derive(Debug, Dummy, Clone)]
struct AccountDummy {
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    pub password: String,
    pub created_date: Option<DateTime<FixedOffset>>,
}

impl AccountDummy {
    fn generate() -> Account {
        let dummy = Faker.fake::<Self>();
        Account {
            id: Uuid::now_v7(),
            email: dummy.email.to_lowercase(),
            password: dummy.password,
            created_date: dummy.created_date,
            updated_date: dummy.created_date,
        }
    }
}
