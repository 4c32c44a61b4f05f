use chrono::{DateTime, FixedOffset};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::{Query, QueryAs},
    Postgres,
};
use uuid::Uuid;

#[derive(Clone)]
pub enum SqlxBinds {
    String(String),
    OptionString(Option<String>),
    Bool(bool),
    Uuid(Uuid),
    DateTimeFixedOffset(DateTime<FixedOffset>),
}

pub fn binds_query(stmt: &str, binds: Vec<SqlxBinds>) -> Query<'_, Postgres, PgArguments> {
    let mut q: Query<'_, Postgres, PgArguments> = sqlx::query(stmt);
    for bind in binds.iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val.clone()),
            SqlxBinds::OptionString(val) => q.bind(val.clone()),
            SqlxBinds::Bool(val) => q.bind(*val),
            SqlxBinds::Uuid(val) => q.bind(*val),
            SqlxBinds::DateTimeFixedOffset(val) => q.bind(*val),
        };
    }
    q
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds.iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val.clone()),
            SqlxBinds::OptionString(val) => q.bind(val.clone()),
            SqlxBinds::Bool(val) => q.bind(*val),
            SqlxBinds::Uuid(val) => q.bind(*val),
            SqlxBinds::DateTimeFixedOffset(val) => q.bind(*val),
        };
    }
    q
}

pub fn query_builder(
    select: Option<&str>,
    table_name: &str,
    wheres: &[String],
    limit: Option<u32>,
) -> String {
    // Select
    let mut stmt = "SELECT ".to_string();
    stmt.push_str(select.unwrap_or("*"));

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE ");
        stmt.push_str(&wheres.join(" AND "));
    }

    // Limit
    if let Some(limit) = limit {
        stmt.push_str(format!(" LIMIT {}", limit).as_str());
    }
    stmt
}

/// `UPDATE <table> SET a = $1, b = $2 WHERE <key> = $n`, binds in column order
/// followed by the key.
pub fn update_builder(table_name: &str, columns: &[&str], key: &str) -> String {
    let sets: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(idx, col)| format!("{} = ${}", col, idx + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        table_name,
        sets.join(", "),
        key,
        columns.len() + 1
    )
}
