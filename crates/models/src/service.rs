use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{FieldError, ModelError};

pub const NAME_REQUIRED: &str = "Service name is required";
pub const PRICE_NOT_NUMERIC: &str = "Price must be a number";
pub const DESCRIPTION_NOT_TEXT: &str = "Description must be a string";

/// Stored service record. Serializes to `{id, name, description, price}`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    #[serde(skip)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Whole-valued prices go out as JSON integers (`50`, not `50.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const I64_BOUND: f64 = 9_007_199_254_740_992.0; // 2^53
    if price.fract() == 0.0 && price.abs() < I64_BOUND {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Raw request body for create/update, before validation.
///
/// Each field distinguishes "absent" (`None`) from an explicit JSON `null`
/// (`Some(Value::Null)`). Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDraft {
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
}

impl ServiceDraft {
    /// Take the known fields out of a JSON object body.
    pub fn from_map(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            description: body.remove("description"),
            price: body.remove("price"),
        }
    }
}

/// Validated field values ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFields {
    pub name: String,
    /// `None`: not supplied, left untouched on update. `Some(None)`: cleared.
    pub description: Option<Option<String>>,
    pub price: f64,
}

impl ServiceDraft {
    /// Check every field and collect all failures in field order.
    pub fn validate(&self) -> Result<ServiceFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = validate_name(self.name.as_ref()).map_err(|e| errors.push(e)).ok();
        let price = validate_price(self.price.as_ref()).map_err(|e| errors.push(e)).ok();
        let description =
            validate_description(self.description.as_ref()).map_err(|e| errors.push(e)).ok();

        match (name, price, description) {
            (Some(name), Some(price), Some(description)) => {
                Ok(ServiceFields { name, description, price })
            }
            _ => Err(errors),
        }
    }
}

/// Scalars in their textual form, the way a loosely typed body gets stored.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn validate_name(v: Option<&Value>) -> Result<String, FieldError> {
    match v.and_then(scalar_text) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(FieldError::new("name", NAME_REQUIRED, v.cloned())),
    }
}

fn validate_price(v: Option<&Value>) -> Result<f64, FieldError> {
    let parsed = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if is_numeric(s) => s.parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FieldError::new("price", PRICE_NOT_NUMERIC, v.cloned()))
}

fn validate_description(v: Option<&Value>) -> Result<Option<Option<String>>, FieldError> {
    match v {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(other) => scalar_text(other)
            .map(|s| Some(Some(s)))
            .ok_or_else(|| FieldError::new("description", DESCRIPTION_NOT_TEXT, Some(other.clone()))),
    }
}

/// `^[+-]?([0-9]*\.)?[0-9]+$`
fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => ("", digits),
    };
    !frac_part.is_empty()
        && frac_part.bytes().all(|b| b.is_ascii_digit())
        && int_part.bytes().all(|b| b.is_ascii_digit())
}

pub async fn create(db: &DatabaseConnection, fields: ServiceFields) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name),
        description: Set(fields.description.flatten()),
        price: Set(fields.price),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// All records in insertion order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}

/// Replace the supplied fields of record `id`; `Ok(None)` when no record matches.
pub async fn find_and_update(
    db: &DatabaseConnection,
    id: Uuid,
    fields: ServiceFields,
) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.name = Set(fields.name);
    am.price = Set(fields.price);
    if let Some(description) = fields.description {
        am.description = Set(description);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

/// Remove record `id`; returns whether it existed.
pub async fn find_and_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
