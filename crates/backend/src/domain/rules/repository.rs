use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::rules::ast::{Node, StoredRule};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, Set};

use crate::shared::data::db::get_connection;

/// Storage model for rule ASTs. The tree is kept serialized in one row per
/// rule; ids come from SQLite's autoincrement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rule_nodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub rule_text: String,
    pub ast_json: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Persist a rule AST, returning the stored form with its new id.
pub async fn insert(rule_text: &str, ast: &Node) -> Result<StoredRule> {
    let created_at = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        rule_text: Set(rule_text.to_string()),
        ast_json: Set(serde_json::to_string(ast)?),
        created_at: Set(created_at.to_rfc3339()),
    };
    let model = active.insert(conn()).await?;

    tracing::debug!("Saved rule: id={}, text={}", model.id, model.rule_text);

    to_stored(model)
}

pub async fn get_by_id(id: i64) -> Result<Option<StoredRule>> {
    let result = Entity::find_by_id(id).one(conn()).await?;
    result.map(to_stored).transpose()
}

pub async fn list_all() -> Result<Vec<StoredRule>> {
    let models = Entity::find()
        .order_by_asc(Column::Id)
        .all(conn())
        .await?;
    models.into_iter().map(to_stored).collect()
}

fn to_stored(model: Model) -> Result<StoredRule> {
    let ast: Node = serde_json::from_str(&model.ast_json)?;
    let created_at = DateTime::parse_from_rfc3339(&model.created_at)?.with_timezone(&Utc);
    Ok(StoredRule {
        id: model.id,
        rule_text: model.rule_text,
        ast,
        created_at,
    })
}
