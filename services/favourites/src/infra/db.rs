use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    sea_query::OnConflict,
};

use shop_domain::id::{ProductId, UserId};
use shop_favourites_schema::favourites;

use crate::domain::repository::FavouriteRepository;
use crate::domain::types::FavouriteKey;
use crate::error::StoreError;

// ── Favourite repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavouriteRepository {
    pub db: DatabaseConnection,
}

impl FavouriteRepository for DbFavouriteRepository {
    async fn find_all(&self) -> Result<Vec<FavouriteKey>, StoreError> {
        let models = favourites::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| store_error(e, "find all favourites"))?;
        Ok(models.into_iter().map(key_from_model).collect())
    }

    async fn find_by_key(&self, key: &FavouriteKey) -> Result<Option<FavouriteKey>, StoreError> {
        let model = favourites::Entity::find_by_id((
            key.user_id.get(),
            key.product_id.get(),
            key.like_date,
        ))
        .one(&self.db)
        .await
        .map_err(|e| store_error(e, "find favourite by key"))?;
        Ok(model.map(key_from_model))
    }

    async fn save(&self, favourite: &FavouriteKey) -> Result<FavouriteKey, StoreError> {
        favourites::Entity::insert(active_model(favourite))
            .on_conflict(
                OnConflict::columns([
                    favourites::Column::UserId,
                    favourites::Column::ProductId,
                    favourites::Column::LikeDate,
                ])
                // DO UPDATE on a key column: a same-key save overwrites instead of erroring.
                .update_column(favourites::Column::LikeDate)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| store_error(e, "save favourite"))?;
        Ok(*favourite)
    }

    async fn delete_by_key(&self, key: &FavouriteKey) -> Result<(), StoreError> {
        favourites::Entity::delete_many()
            .filter(favourites::Column::UserId.eq(key.user_id.get()))
            .filter(favourites::Column::ProductId.eq(key.product_id.get()))
            .filter(favourites::Column::LikeDate.eq(key.like_date))
            .exec(&self.db)
            .await
            .map_err(|e| store_error(e, "delete favourite"))?;
        Ok(())
    }
}

fn active_model(key: &FavouriteKey) -> favourites::ActiveModel {
    favourites::ActiveModel {
        user_id: Set(key.user_id.get()),
        product_id: Set(key.product_id.get()),
        like_date: Set(key.like_date),
    }
}

fn key_from_model(model: favourites::Model) -> FavouriteKey {
    FavouriteKey::new(
        UserId(model.user_id),
        ProductId(model.product_id),
        model.like_date,
    )
}

/// Turn a driver error into a store error, surfacing unique violations as a typed variant.
pub fn store_error(err: DbErr, context: &'static str) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return StoreError::UniqueViolation;
    }
    StoreError::Other(anyhow::Error::new(err).context(context))
}
