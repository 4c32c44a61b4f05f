use chrono::Local;
use fake::{
    faker::{address::en::StreetName, company::en::CompanyName, name::en::Name},
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{model::trader_profile::TraderProfile, repository::role_profile::insert_trader_profile};

/// Inserts trader role profiles for the account id passed as `ext`.
pub struct TraderProfileFactory {
    modifier_one: fn(x: &TraderProfile) -> TraderProfile,
}

impl Default for TraderProfileFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TraderProfileFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &TraderProfile) -> TraderProfile) {
        self.modifier_one = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, user_id: Uuid) -> anyhow::Result<TraderProfile> {
        let data = (self.modifier_one)(&TraderProfileDummy::generate(user_id));
        let mut tx = db.begin().await?;
        insert_trader_profile(&mut tx, &data).await?;
        tx.commit().await?;
        Ok(data)
    }
}

#[derive(Debug, Dummy, Clone)]
struct TraderProfileDummy {
    #[dummy(faker = "CompanyName()")]
    pub shop_name: String,
    #[dummy(faker = "Name()")]
    pub owner_name: String,
    #[dummy(faker = "StreetName()")]
    pub address: String,
    #[dummy(faker = "1000000000..9999999999")]
    pub contact_number: u64,
}

impl TraderProfileDummy {
    fn generate(user_id: Uuid) -> TraderProfile {
        let dummy = Faker.fake::<Self>();
        let now = Local::now().fixed_offset();
        TraderProfile {
            id: Uuid::now_v7(),
            user_id,
            shop_name: dummy.shop_name,
            owner_name: dummy.owner_name,
            contact_number: format!("0{}", dummy.contact_number),
            address: dummy.address,
            availability_status: "active".to_string(),
            open_hours: None,
            item_categories: vec!["multinational".to_string()],
            payment_methods: vec!["jazzcash".to_string()],
            license_picture_url: None,
            profile_picture_url: None,
            created_date: Some(now),
            updated_date: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::factory::{account::AccountFactory, trader_profile::TraderProfileFactory};

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = AccountFactory::new().generate_one(&pool, ()).await?;

        // When
        let mut factory = TraderProfileFactory::new();
        factory.modified_one(|x| {
            let mut x = x.clone();
            x.shop_name = "Al-Amin Pharmacy".to_string();
            x
        });
        let row = factory.generate_one(&pool, account.id).await?;

        // Expect
        let res: (String, String) =
            sqlx::query_as(r#"SELECT shop_name, contact_number FROM public.trader_profiles WHERE user_id = $1"#)
                .bind(account.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, "Al-Amin Pharmacy");
        assert_eq!(res.1, row.contact_number);
        assert_eq!(res.1.len(), 11);
        Ok(())
    }
}
