use chrono::Local;
use sqlx::PgPool;

use crate::repository::{
    account::get_account_by_email, profile::reset_onboarding, role_profile::delete_role_profiles,
};

/// Sends the account back to account type selection and drops its role
/// profiles. Uploaded pictures are left in storage.
pub async fn reset(pool: &PgPool, email: &str) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;
    let Some(account) = get_account_by_email(&mut tx, email).await? else {
        anyhow::bail!("no account registered for {}", email);
    };
    let now = Local::now().fixed_offset();
    let deleted = delete_role_profiles(&mut tx, &account.id).await?;
    reset_onboarding(&mut tx, &account.id, &now).await?;
    tx.commit().await?;
    tracing::info!(
        "onboarding of {} reset, {} role profile(s) removed",
        account.id,
        deleted
    );
    Ok(())
}
