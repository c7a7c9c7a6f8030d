//! Sea-ORM entities for the catalog schema: product rows carry foreign keys
//! to their sub-category and currency; main categories hang off
//! sub-categories. Reads join the associations back in to produce the
//! denormalized domain [`Product`](crate::models::Product).

pub mod currency {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "currency")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub code: String,
        pub symbol: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product::Entity")]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod main_category {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "main_category")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub name: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::sub_category::Entity")]
        SubCategory,
    }

    impl Related<super::sub_category::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SubCategory.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod sub_category {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "sub_category")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(unique)]
        pub name: String,
        pub main_category_id: i64,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::main_category::Entity",
            from = "Column::MainCategoryId",
            to = "super::main_category::Column::Id"
        )]
        MainCategory,
        #[sea_orm(has_many = "super::product::Entity")]
        Product,
    }

    impl Related<super::main_category::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::MainCategory.def()
        }
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod product {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "product")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub stock_number: i32,
        pub image: Option<String>,
        pub discount_price: f64,
        pub actual_price: f64,
        pub sub_category_id: i64,
        pub currency_id: i64,
        /// Optimistic-concurrency token, defaults to 1 in the schema.
        pub version: i64,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::sub_category::Entity",
            from = "Column::SubCategoryId",
            to = "super::sub_category::Column::Id"
        )]
        SubCategory,
        #[sea_orm(
            belongs_to = "super::currency::Entity",
            from = "Column::CurrencyId",
            to = "super::currency::Column::Id"
        )]
        Currency,
    }

    impl Related<super::sub_category::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::SubCategory.def()
        }
    }

    impl Related<super::currency::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Currency.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
