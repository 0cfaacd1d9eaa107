//! Product entity <-> model mapper

use shop_core::entities::{Product, ProductWithSeller, SellerSummary};
use shop_core::value_objects::Snowflake;

use crate::models::{ProductModel, ProductWithSellerModel};

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: Snowflake::new(model.id),
            name: model.name,
            price: model.price,
            description: model.description,
            url_image: model.url_image,
            seller_id: Snowflake::new(model.seller_id),
            is_active: model.is_active,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProductWithSellerModel> for ProductWithSeller {
    fn from(model: ProductWithSellerModel) -> Self {
        let seller = SellerSummary {
            id: Snowflake::new(model.product.seller_id),
            name: model.seller_name,
            email: model.seller_email,
        };
        ProductWithSeller {
            product: Product::from(model.product),
            seller,
        }
    }
}
