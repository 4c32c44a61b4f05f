use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::{PersistenceError, SubmitError},
        onboarding::{OnboardingState, OnboardingStep, RoleForm},
        storage::{storage_path, BlobStore, ImageKind, StorageError},
    },
    model::{
        enums::{AvailabilityStatus, ItemCategory, PaymentMethod},
        medical_rep_profile::MedicalRepProfile,
        order_booker_profile::OrderBookerProfile,
        supplier_profile::SupplierProfile,
        trader_profile::TraderProfile,
    },
    repository::{
        profile::update_onboarding_state,
        role_profile::{
            insert_medical_rep_profile, insert_order_booker_profile, insert_supplier_profile,
            insert_trader_profile,
        },
    },
};

use super::onboarding::load_progress;

/// Image taken from a submitted form, already checked for size and type.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TraderDraft {
    pub shop_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub availability_status: AvailabilityStatus,
    pub open_hours: Option<String>,
    pub item_categories: Vec<ItemCategory>,
    pub payment_methods: Vec<PaymentMethod>,
    pub license_picture: Option<ImageFile>,
    pub profile_picture: Option<ImageFile>,
}

#[derive(Debug, Clone)]
pub struct SupplierDraft {
    pub company_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub item_categories: Vec<ItemCategory>,
    pub payment_methods: Vec<PaymentMethod>,
    pub license_picture: Option<ImageFile>,
    pub profile_picture: Option<ImageFile>,
}

#[derive(Debug, Clone)]
pub struct MedicalRepDraft {
    pub full_name: String,
    pub company_name: String,
    pub contact_number: String,
    pub cnic_number: String,
    pub coverage_area: String,
    pub profile_picture: Option<ImageFile>,
}

#[derive(Debug, Clone)]
pub struct OrderBookerDraft {
    pub full_name: String,
    pub contact_number: String,
    pub cnic_number: String,
    pub working_for: String,
    pub coverage_area: String,
    pub profile_picture: Option<ImageFile>,
}

/// Validated role form, ready to be stored.
#[derive(Debug, Clone)]
pub enum RoleProfileDraft {
    Trader(TraderDraft),
    Supplier(SupplierDraft),
    MedicalRep(MedicalRepDraft),
    OrderBooker(OrderBookerDraft),
}

impl RoleProfileDraft {
    pub fn form(&self) -> RoleForm {
        match self {
            RoleProfileDraft::Trader(_) => RoleForm::Trader,
            RoleProfileDraft::Supplier(_) => RoleForm::Supplier,
            RoleProfileDraft::MedicalRep(_) => RoleForm::MedicalRep,
            RoleProfileDraft::OrderBooker(_) => RoleForm::OrderBooker,
        }
    }
}

enum RoleProfileRow {
    Trader(TraderProfile),
    Supplier(SupplierProfile),
    MedicalRep(MedicalRepProfile),
    OrderBooker(OrderBookerProfile),
}

/// Objects written during one submission, removed again when it fails.
struct Uploads<'a> {
    store: &'a dyn BlobStore,
    account_id: Uuid,
    done: Vec<(&'static str, String)>,
}

impl<'a> Uploads<'a> {
    fn new(store: &'a dyn BlobStore, account_id: Uuid) -> Self {
        Self {
            store,
            account_id,
            done: vec![],
        }
    }

    /// Uploads the image and returns its public URL.
    async fn put(
        &mut self,
        kind: ImageKind,
        image: Option<ImageFile>,
    ) -> Result<Option<String>, StorageError> {
        let Some(image) = image else {
            return Ok(None);
        };
        let path = storage_path(kind, &self.account_id, image.file_name.as_deref());
        self.store.upload(kind.bucket(), &path, image.bytes).await?;
        let url = self.store.public_url(kind.bucket(), &path);
        self.done.push((kind.bucket(), path));
        Ok(Some(url))
    }

    async fn rollback(self) {
        for (bucket, path) in self.done {
            if let Err(err) = self.store.remove(bucket, &path).await {
                tracing::warn!("failed to remove {}/{}: {}", bucket, path, err);
            }
        }
    }
}

fn to_strings<T>(values: &[T], as_str: fn(&T) -> &'static str) -> Vec<String> {
    values.iter().map(|x| as_str(x).to_string()).collect()
}

async fn build_row(
    uploads: &mut Uploads<'_>,
    id: Uuid,
    user_id: Uuid,
    draft: RoleProfileDraft,
    now: &DateTime<FixedOffset>,
) -> Result<RoleProfileRow, StorageError> {
    let row = match draft {
        RoleProfileDraft::Trader(data) => RoleProfileRow::Trader(TraderProfile {
            id,
            user_id,
            license_picture_url: uploads.put(ImageKind::License, data.license_picture).await?,
            profile_picture_url: uploads.put(ImageKind::Profile, data.profile_picture).await?,
            shop_name: data.shop_name,
            owner_name: data.owner_name,
            contact_number: data.contact_number,
            address: data.address,
            availability_status: data.availability_status.as_str().to_string(),
            open_hours: data.open_hours,
            item_categories: to_strings(&data.item_categories, ItemCategory::as_str),
            payment_methods: to_strings(&data.payment_methods, PaymentMethod::as_str),
            created_date: Some(*now),
            updated_date: Some(*now),
        }),
        RoleProfileDraft::Supplier(data) => RoleProfileRow::Supplier(SupplierProfile {
            id,
            user_id,
            license_picture_url: uploads.put(ImageKind::License, data.license_picture).await?,
            profile_picture_url: uploads.put(ImageKind::Profile, data.profile_picture).await?,
            company_name: data.company_name,
            owner_name: data.owner_name,
            contact_number: data.contact_number,
            address: data.address,
            item_categories: to_strings(&data.item_categories, ItemCategory::as_str),
            payment_methods: to_strings(&data.payment_methods, PaymentMethod::as_str),
            created_date: Some(*now),
            updated_date: Some(*now),
        }),
        RoleProfileDraft::MedicalRep(data) => RoleProfileRow::MedicalRep(MedicalRepProfile {
            id,
            user_id,
            profile_picture_url: uploads.put(ImageKind::Profile, data.profile_picture).await?,
            full_name: data.full_name,
            company_name: data.company_name,
            contact_number: data.contact_number,
            cnic_number: data.cnic_number,
            coverage_area: data.coverage_area,
            created_date: Some(*now),
            updated_date: Some(*now),
        }),
        RoleProfileDraft::OrderBooker(data) => RoleProfileRow::OrderBooker(OrderBookerProfile {
            id,
            user_id,
            profile_picture_url: uploads.put(ImageKind::Profile, data.profile_picture).await?,
            full_name: data.full_name,
            contact_number: data.contact_number,
            cnic_number: data.cnic_number,
            working_for: data.working_for,
            coverage_area: data.coverage_area,
            created_date: Some(*now),
            updated_date: Some(*now),
        }),
    };
    Ok(row)
}

async fn persist(
    mut tx: Transaction<'_, Postgres>,
    row: &RoleProfileRow,
    user_id: &Uuid,
    now: &DateTime<FixedOffset>,
) -> Result<(), PersistenceError> {
    match row {
        RoleProfileRow::Trader(data) => insert_trader_profile(&mut tx, data).await?,
        RoleProfileRow::Supplier(data) => insert_supplier_profile(&mut tx, data).await?,
        RoleProfileRow::MedicalRep(data) => insert_medical_rep_profile(&mut tx, data).await?,
        RoleProfileRow::OrderBooker(data) => insert_order_booker_profile(&mut tx, data).await?,
    }
    update_onboarding_state(&mut tx, user_id, OnboardingStep::NeedsLanguage, now).await?;
    tx.commit().await?;
    Ok(())
}

/// Stores a validated role profile for `account_id`.
///
/// Images are uploaded first, then the row is inserted and the onboarding
/// state advanced in `tx`, which is committed here. Either everything lands
/// or nothing does: a failed upload aborts before any write, and a failed
/// write removes the objects uploaded so far.
pub async fn submit_role_profile(
    mut tx: Transaction<'_, Postgres>,
    store: &dyn BlobStore,
    account_id: &Uuid,
    draft: RoleProfileDraft,
    now: &DateTime<FixedOffset>,
) -> Result<Uuid, SubmitError> {
    let progress = load_progress(&mut tx, account_id, now).await?;
    let form = draft.form();
    match progress.state {
        OnboardingState::NeedsRoleProfile(expected) if expected == form => {}
        state => return Err(SubmitError::OutOfOrder(state)),
    }

    let id = Uuid::now_v7();
    let mut uploads = Uploads::new(store, *account_id);
    let row = match build_row(&mut uploads, id, *account_id, draft, now).await {
        Ok(val) => val,
        Err(err) => {
            uploads.rollback().await;
            return Err(err.into());
        }
    };
    if let Err(err) = persist(tx, &row, account_id, now).await {
        uploads.rollback().await;
        if err.is_unique_violation() {
            return Err(SubmitError::AlreadySubmitted);
        }
        return Err(err.into());
    }
    tracing::info!(
        "account {} submitted {:?} profile {}: {} -> {}",
        account_id,
        form,
        id,
        progress.state,
        OnboardingState::NeedsLanguage
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use sqlx::PgPool;

    use crate::{
        core::storage::{MemoryBlobStore, LICENSE_BUCKET, PROFILE_BUCKET},
        factory::account::AccountFactory,
        model::{account::Account, enums::AccountType},
        repository::{
            profile::get_profile_by_id,
            role_profile::{
                get_medical_rep_profile_by_user, get_order_booker_profile_by_user,
                get_supplier_profile_by_user, get_trader_profile_by_user,
            },
        },
        service::onboarding::select_account_type,
    };

    use super::*;

    fn image(name: &str) -> ImageFile {
        ImageFile {
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            bytes: vec![137, 80, 78, 71],
        }
    }

    fn trader_draft(shop_name: &str) -> RoleProfileDraft {
        RoleProfileDraft::Trader(TraderDraft {
            shop_name: shop_name.to_string(),
            owner_name: "Ali Khan".to_string(),
            contact_number: "03001234567".to_string(),
            address: "Jinnah Road, Quetta".to_string(),
            availability_status: AvailabilityStatus::Active,
            open_hours: None,
            item_categories: vec![ItemCategory::Surgical],
            payment_methods: vec![PaymentMethod::Easypaisa],
            license_picture: Some(image("license.png")),
            profile_picture: Some(image("me.PNG")),
        })
    }

    async fn account_with_type(
        pool: &PgPool,
        account_type: AccountType,
    ) -> anyhow::Result<Account> {
        let account = AccountFactory::new().generate_one(pool, ()).await?;
        let now = Local::now().fixed_offset();
        let mut tx = pool.begin().await?;
        select_account_type(&mut tx, &account.id, account_type, &now).await?;
        tx.commit().await?;
        Ok(account)
    }

    async fn trader_account(pool: &PgPool) -> anyhow::Result<Account> {
        account_with_type(pool, AccountType::Trader).await
    }

    fn profile_url_prefix(account: &Account) -> String {
        format!(
            "http://cdn.test/storage/{}/profiles/{}/",
            PROFILE_BUCKET, account.id
        )
    }

    async fn count_trader_rows(pool: &PgPool) -> anyhow::Result<i64> {
        let res: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM public.trader_profiles")
            .fetch_one(pool)
            .await?;
        Ok(res.0)
    }

    #[sqlx::test]
    async fn test_submit_trader_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = trader_account(&pool).await?;
        let store = MemoryBlobStore::new("http://cdn.test/storage");
        let now = Local::now().fixed_offset();

        // When
        let tx = pool.begin().await?;
        let id = submit_role_profile(tx, &store, &account.id, trader_draft("Al-Amin Pharmacy"), &now)
            .await?;

        // Expect
        assert_eq!(store.len(), 2);
        let mut tx = pool.begin().await?;
        let row = get_trader_profile_by_user(&mut tx, &account.id).await?.unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.shop_name, "Al-Amin Pharmacy");
        assert_eq!(row.item_categories, vec!["surgical".to_string()]);
        assert_eq!(row.payment_methods, vec!["easypaisa".to_string()]);
        assert_eq!(row.availability_status, "active");
        let license_url = row.license_picture_url.unwrap();
        let prefix = format!(
            "http://cdn.test/storage/{}/licenses/{}/",
            LICENSE_BUCKET, account.id
        );
        assert!(license_url.starts_with(&prefix));
        assert!(license_url.ends_with(".png"));
        let path = license_url.trim_start_matches("http://cdn.test/storage/license-pictures/");
        assert!(store.get(LICENSE_BUCKET, path).is_some());
        assert!(row.profile_picture_url.unwrap().ends_with(".png"));
        let profile = get_profile_by_id(&mut tx, &account.id).await?.unwrap();
        assert_eq!(profile.onboarding_state, "needs_language");
        Ok(())
    }

    #[sqlx::test]
    async fn test_upload_failure_writes_nothing(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = trader_account(&pool).await?;
        let store = MemoryBlobStore::default();
        store.set_fail_uploads(true);
        let now = Local::now().fixed_offset();

        // When
        let tx = pool.begin().await?;
        let res = submit_role_profile(tx, &store, &account.id, trader_draft("Shop"), &now).await;

        // Expect
        assert!(matches!(res, Err(SubmitError::Storage(_))));
        assert_eq!(count_trader_rows(&pool).await?, 0);
        assert!(store.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn test_insert_failure_removes_uploads(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = trader_account(&pool).await?;
        sqlx::query(
            "ALTER TABLE public.trader_profiles ADD CONSTRAINT no_broken CHECK (shop_name <> 'Broken')",
        )
        .execute(&pool)
        .await?;
        let store = MemoryBlobStore::default();
        let now = Local::now().fixed_offset();

        // When
        let tx = pool.begin().await?;
        let res = submit_role_profile(tx, &store, &account.id, trader_draft("Broken"), &now).await;

        // Expect
        assert!(matches!(res, Err(SubmitError::Persistence(_))));
        assert_eq!(count_trader_rows(&pool).await?, 0);
        assert!(store.is_empty());
        let mut tx = pool.begin().await?;
        let profile = get_profile_by_id(&mut tx, &account.id).await?.unwrap();
        assert_eq!(profile.onboarding_state, "needs_role_profile");
        Ok(())
    }

    #[sqlx::test]
    async fn test_second_submission_is_refused(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = trader_account(&pool).await?;
        let store = MemoryBlobStore::default();
        let now = Local::now().fixed_offset();
        let tx = pool.begin().await?;
        submit_role_profile(tx, &store, &account.id, trader_draft("First"), &now).await?;

        // When
        let tx = pool.begin().await?;
        let res = submit_role_profile(tx, &store, &account.id, trader_draft("Second"), &now).await;

        // Expect
        assert!(matches!(
            res,
            Err(SubmitError::OutOfOrder(OnboardingState::NeedsLanguage))
        ));
        assert_eq!(count_trader_rows(&pool).await?, 1);
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[sqlx::test]
    async fn test_form_must_match_account_type(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = trader_account(&pool).await?;
        let store = MemoryBlobStore::default();
        let now = Local::now().fixed_offset();
        let draft = RoleProfileDraft::OrderBooker(OrderBookerDraft {
            full_name: "Bilal".to_string(),
            contact_number: "03001234567".to_string(),
            cnic_number: "5440012345671".to_string(),
            working_for: "Zam Zam Traders".to_string(),
            coverage_area: "Satellite Town".to_string(),
            profile_picture: None,
        });

        // When
        let tx = pool.begin().await?;
        let res = submit_role_profile(tx, &store, &account.id, draft, &now).await;

        // Expect
        assert!(matches!(
            res,
            Err(SubmitError::OutOfOrder(OnboardingState::NeedsRoleProfile(
                RoleForm::Trader
            )))
        ));
        Ok(())
    }

    #[sqlx::test]
    async fn test_submit_supplier_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = account_with_type(&pool, AccountType::Supplier).await?;
        let store = MemoryBlobStore::new("http://cdn.test/storage");
        let now = Local::now().fixed_offset();
        let draft = RoleProfileDraft::Supplier(SupplierDraft {
            company_name: "Bolan Distributors".to_string(),
            owner_name: "Naseer Ahmed".to_string(),
            contact_number: "03331234567".to_string(),
            address: "Prince Road, Quetta".to_string(),
            item_categories: vec![ItemCategory::Multinational, ItemCategory::Net],
            payment_methods: vec![PaymentMethod::BankAccount],
            license_picture: None,
            profile_picture: Some(image("logo.jpg")),
        });

        // When
        let tx = pool.begin().await?;
        let id = submit_role_profile(tx, &store, &account.id, draft, &now).await?;

        // Expect
        assert_eq!(store.len(), 1);
        let mut tx = pool.begin().await?;
        let row = get_supplier_profile_by_user(&mut tx, &account.id).await?.unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.company_name, "Bolan Distributors");
        assert_eq!(
            row.item_categories,
            vec!["multinational".to_string(), "net".to_string()]
        );
        assert_eq!(row.payment_methods, vec!["bank_account".to_string()]);
        assert!(row.license_picture_url.is_none());
        let profile_url = row.profile_picture_url.unwrap();
        assert!(profile_url.starts_with(&profile_url_prefix(&account)));
        assert!(profile_url.ends_with(".jpg"));
        let profile = get_profile_by_id(&mut tx, &account.id).await?.unwrap();
        assert_eq!(profile.onboarding_state, "needs_language");
        Ok(())
    }

    #[sqlx::test]
    async fn test_submit_medical_rep_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = account_with_type(&pool, AccountType::MedicalRepresentative).await?;
        let store = MemoryBlobStore::new("http://cdn.test/storage");
        let now = Local::now().fixed_offset();
        let draft = RoleProfileDraft::MedicalRep(MedicalRepDraft {
            full_name: "Sana Baloch".to_string(),
            company_name: "Getz Pharma".to_string(),
            contact_number: "03211234567".to_string(),
            cnic_number: "5440012345671".to_string(),
            coverage_area: "Jinnah Town".to_string(),
            profile_picture: Some(image("sana.png")),
        });

        // When
        let tx = pool.begin().await?;
        let id = submit_role_profile(tx, &store, &account.id, draft, &now).await?;

        // Expect
        let mut tx = pool.begin().await?;
        let row = get_medical_rep_profile_by_user(&mut tx, &account.id)
            .await?
            .unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.full_name, "Sana Baloch");
        assert_eq!(row.cnic_number, "5440012345671");
        assert_eq!(row.coverage_area, "Jinnah Town");
        assert!(row
            .profile_picture_url
            .unwrap()
            .starts_with(&profile_url_prefix(&account)));
        Ok(())
    }

    #[sqlx::test]
    async fn test_submit_order_booker_profile(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = account_with_type(&pool, AccountType::OrderBooker).await?;
        let store = MemoryBlobStore::new("http://cdn.test/storage");
        let now = Local::now().fixed_offset();
        let draft = RoleProfileDraft::OrderBooker(OrderBookerDraft {
            full_name: "Bilal".to_string(),
            contact_number: "03001234567".to_string(),
            cnic_number: "5440012345671".to_string(),
            working_for: "Zam Zam Traders".to_string(),
            coverage_area: "Satellite Town".to_string(),
            profile_picture: None,
        });

        // When
        let tx = pool.begin().await?;
        let id = submit_role_profile(tx, &store, &account.id, draft, &now).await?;

        // Expect
        assert!(store.is_empty());
        let mut tx = pool.begin().await?;
        let row = get_order_booker_profile_by_user(&mut tx, &account.id)
            .await?
            .unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.working_for, "Zam Zam Traders");
        assert!(row.profile_picture_url.is_none());
        let profile = get_profile_by_id(&mut tx, &account.id).await?.unwrap();
        assert_eq!(profile.onboarding_state, "needs_language");
        Ok(())
    }
}
