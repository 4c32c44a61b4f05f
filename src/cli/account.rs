use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::{onboarding::OnboardingStep, security::hash_password, validation::is_valid_email},
    model::{account::Account, profile::Profile},
    repository::account::{create_account, get_account_by_email},
};

/// Creates an account with a blank profile, as sign-up would.
pub async fn create(
    pool: &PgPool,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<Account> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        anyhow::bail!("invalid email: {}", email);
    }
    let mut tx = pool.begin().await?;
    if get_account_by_email(&mut tx, &email).await?.is_some() {
        anyhow::bail!("{} is already registered", email);
    }

    let hashed_password = hash_password(password).map_err(|err| anyhow::anyhow!(err))?;
    let now = Local::now().fixed_offset();
    let account = Account {
        id: Uuid::now_v7(),
        email: email.clone(),
        password: hashed_password,
        created_date: Some(now),
        updated_date: Some(now),
    };
    let profile = Profile {
        id: account.id,
        email,
        username: Some(username.trim().to_string()).filter(|x| !x.is_empty()),
        account_type: None,
        language: None,
        onboarding_completed: false,
        onboarding_state: OnboardingStep::NeedsAccountType.as_str().to_string(),
        created_date: Some(now),
        updated_date: Some(now),
    };
    create_account(&mut tx, &account, &profile).await?;
    tx.commit().await?;
    Ok(account)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{cli::account::create, core::security::verify_hash_password};

    #[sqlx::test]
    async fn test_create_account(pool: PgPool) -> anyhow::Result<()> {
        // When
        let account = create(&pool, " A@B.com ", "ali", "secret1").await?;

        // Expect
        let db_res: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT a.email, p.username
            FROM public.account a JOIN public.profiles p ON p.id = a.id
            WHERE a.id = $1
            "#,
        )
        .bind(account.id)
        .fetch_optional(&pool)
        .await?;
        assert_eq!(db_res, Some(("a@b.com".to_string(), "ali".to_string())));
        assert!(verify_hash_password("secret1", &account.password).unwrap());

        // a second account with the same email is refused
        assert!(create(&pool, "a@b.com", "other", "secret2").await.is_err());
        Ok(())
    }
}
