use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        onboarding::RoleForm,
        sqlx_utils::{binds_query, binds_query_as, query_builder, SqlxBinds},
    },
    model::{
        medical_rep_profile::{MedicalRepProfile, TABLE_NAME as MEDICAL_REP_TABLE_NAME},
        order_booker_profile::{OrderBookerProfile, TABLE_NAME as ORDER_BOOKER_TABLE_NAME},
        supplier_profile::{SupplierProfile, TABLE_NAME as SUPPLIER_TABLE_NAME},
        trader_profile::{TraderProfile, TABLE_NAME as TRADER_TABLE_NAME},
    },
};

pub const ALL_FORMS: [RoleForm; 4] = [
    RoleForm::Trader,
    RoleForm::Supplier,
    RoleForm::MedicalRep,
    RoleForm::OrderBooker,
];

pub async fn role_profile_exists(
    tx: &mut Transaction<'_, Postgres>,
    form: RoleForm,
    user_id: &Uuid,
) -> anyhow::Result<bool> {
    let stmt = query_builder(
        Some("count(id)"),
        form.table_name(),
        &["user_id = $1".to_string()],
        None,
    );
    let count = binds_query_as::<(i64,)>(&stmt, vec![SqlxBinds::Uuid(*user_id)])
        .fetch_one(&mut **tx)
        .await?;
    Ok(count.0 > 0)
}

/// Removes the account's rows from every role table.
pub async fn delete_role_profiles(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<u64> {
    let mut deleted = 0;
    for form in ALL_FORMS {
        let stmt = format!("DELETE FROM {} WHERE user_id = $1", form.table_name());
        let res = binds_query(&stmt, vec![SqlxBinds::Uuid(*user_id)])
            .execute(&mut **tx)
            .await?;
        deleted += res.rows_affected();
    }
    Ok(deleted)
}

pub async fn get_trader_profile_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<Option<TraderProfile>> {
    let stmt = query_builder(None, TRADER_TABLE_NAME, &["user_id = $1".to_string()], Some(1));
    Ok(binds_query_as::<TraderProfile>(&stmt, vec![SqlxBinds::Uuid(*user_id)])
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn insert_trader_profile(
    tx: &mut Transaction<'_, Postgres>,
    data: &TraderProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, shop_name, owner_name, contact_number, address,
            availability_status, open_hours, item_categories, payment_methods,
            license_picture_url, profile_picture_url, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
            TRADER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.shop_name)
    .bind(&data.owner_name)
    .bind(&data.contact_number)
    .bind(&data.address)
    .bind(&data.availability_status)
    .bind(&data.open_hours)
    .bind(&data.item_categories)
    .bind(&data.payment_methods)
    .bind(&data.license_picture_url)
    .bind(&data.profile_picture_url)
    .bind(data.created_date)
    .bind(data.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get_supplier_profile_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<Option<SupplierProfile>> {
    let stmt = query_builder(None, SUPPLIER_TABLE_NAME, &["user_id = $1".to_string()], Some(1));
    Ok(binds_query_as::<SupplierProfile>(&stmt, vec![SqlxBinds::Uuid(*user_id)])
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn insert_supplier_profile(
    tx: &mut Transaction<'_, Postgres>,
    data: &SupplierProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, company_name, owner_name, contact_number, address,
            item_categories, payment_methods, license_picture_url, profile_picture_url,
            created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
            SUPPLIER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.company_name)
    .bind(&data.owner_name)
    .bind(&data.contact_number)
    .bind(&data.address)
    .bind(&data.item_categories)
    .bind(&data.payment_methods)
    .bind(&data.license_picture_url)
    .bind(&data.profile_picture_url)
    .bind(data.created_date)
    .bind(data.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get_medical_rep_profile_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<Option<MedicalRepProfile>> {
    let stmt = query_builder(
        None,
        MEDICAL_REP_TABLE_NAME,
        &["user_id = $1".to_string()],
        Some(1),
    );
    Ok(binds_query_as::<MedicalRepProfile>(&stmt, vec![SqlxBinds::Uuid(*user_id)])
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn insert_medical_rep_profile(
    tx: &mut Transaction<'_, Postgres>,
    data: &MedicalRepProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, full_name, company_name, contact_number, cnic_number,
            coverage_area, profile_picture_url, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
            MEDICAL_REP_TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.full_name)
    .bind(&data.company_name)
    .bind(&data.contact_number)
    .bind(&data.cnic_number)
    .bind(&data.coverage_area)
    .bind(&data.profile_picture_url)
    .bind(data.created_date)
    .bind(data.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get_order_booker_profile_by_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &Uuid,
) -> anyhow::Result<Option<OrderBookerProfile>> {
    let stmt = query_builder(
        None,
        ORDER_BOOKER_TABLE_NAME,
        &["user_id = $1".to_string()],
        Some(1),
    );
    Ok(binds_query_as::<OrderBookerProfile>(&stmt, vec![SqlxBinds::Uuid(*user_id)])
        .fetch_optional(&mut **tx)
        .await?)
}

pub async fn insert_order_booker_profile(
    tx: &mut Transaction<'_, Postgres>,
    data: &OrderBookerProfile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, user_id, full_name, contact_number, cnic_number, working_for,
            coverage_area, profile_picture_url, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
            ORDER_BOOKER_TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(data.user_id)
    .bind(&data.full_name)
    .bind(&data.contact_number)
    .bind(&data.cnic_number)
    .bind(&data.working_for)
    .bind(&data.coverage_area)
    .bind(&data.profile_picture_url)
    .bind(data.created_date)
    .bind(data.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
