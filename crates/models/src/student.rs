use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, QueryOrder, Set, SqlErr};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub gender: Gender,
    #[sea_orm(column_type = "Text")]
    pub joke: String,
    pub booking_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Stored upper-case, matching the JSON representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > 128 {
        return Err(errors::ModelError::Validation("name too long (<=128)".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    if email.len() > 255 {
        return Err(errors::ModelError::Validation("email too long (<=255)".into()));
    }
    Ok(())
}

fn db_err(e: DbErr) -> errors::ModelError {
    errors::ModelError::Db(e.to_string())
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(db_err)
}

pub async fn exists_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id).count(db).await.map_err(db_err)?;
    Ok(n > 0)
}

pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, errors::ModelError> {
    let n = Entity::find()
        .filter(Column::Email.eq(email))
        .count(db)
        .await
        .map_err(db_err)?;
    Ok(n > 0)
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    gender: Gender,
    joke: &str,
    booking_id: i32,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        gender: Set(gender),
        joke: Set(joke.to_string()),
        booking_id: Set(booking_id),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            errors::ModelError::Validation("email already registered".into())
        }
        _ => db_err(e),
    })
}

/// Returns the number of deleted rows.
pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected)
}

pub async fn list_paginated(
    db: &DatabaseConnection,
    page_idx: u64,
    per_page: u64,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(db_err)
}
