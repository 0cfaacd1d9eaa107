//! Favorite entity <-> model mapper

use shop_core::entities::Favorite;
use shop_core::value_objects::Snowflake;

use crate::models::FavoriteModel;

impl From<FavoriteModel> for Favorite {
    fn from(model: FavoriteModel) -> Self {
        Favorite {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            product_id: Snowflake::new(model.product_id),
            created_at: model.created_at,
        }
    }
}
