//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;
pub mod validation;

pub use requests::{
    AddFavoriteRequest, AddToCartRequest, CreateOrderRequest, CreateProductRequest, LoginRequest,
    ProductCsvRow, RegisterRequest, ShippingAddressRequest, UpdateOrderStatusRequest,
    UpdateProductRequest, UpdateUserRequest,
};

pub use responses::{
    BestSellerResponse, CartItemResponse, CartResponse, CsvRowError, CsvUploadResponse,
    DashboardResponse, FavoriteCreatedResponse, FavoriteResponse, HealthChecks, HealthResponse,
    MessageResponse, OrderDeletedResponse, OrderItemResponse, OrderResponse,
    ProductDeletedResponse, ProductResponse, ReadinessResponse, SellerResponse, TokenResponse,
    UserResponse,
};

pub use mappers::{CartWithProducts, FavoriteWithProduct};
pub use validation::field_errors;
