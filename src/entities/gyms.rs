use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "gyms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Stored exactly as submitted; searches normalize at query time.
    pub location: String,

    pub monthly_sub_price: String,

    pub opening_time: Option<String>,

    pub closing_time: Option<String>,

    /// Rating on a 0-5 scale, kept as submitted.
    pub review: Option<String>,

    pub website_url: Option<String>,

    /// Sanitized filename inside the upload directory.
    pub image_file: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
