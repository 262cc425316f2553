use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Public lookup key, generated once at creation.
    #[sea_orm(unique)]
    pub slug: String,

    pub description: Option<String>,

    pub price: f64,

    /// URL of the stored upload, e.g. "/assets/<hex>.jpg"
    pub image_url: Option<String>,

    pub category: Option<String>,

    /// Nullable reference to the creating user.
    pub owner_id: Option<i32>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
