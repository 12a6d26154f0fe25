//! Database models
//!
//! Passive records mirroring the relational schema. Ids are SurrealDB
//! [`RecordId`]s serialized as `"table:key"` strings; prices are
//! [`rust_decimal::Decimal`]; timestamps are UTC.

pub mod serde_helpers;

pub mod auth_token;
pub mod city;
pub mod decoration;
pub mod dish;
pub mod establishment;
pub mod flowers;
pub mod image;
pub mod reservation;
pub mod review;
pub mod service;
pub mod taxi;
pub mod user;

pub use auth_token::AuthToken;
pub use city::{City, CityCreate};
pub use decoration::{Decoration, DecorationCreate};
pub use dish::{Dish, DishCreate};
pub use establishment::{Establishment, EstablishmentCreate};
pub use flowers::{Flowers, FlowersCreate};
pub use image::{Image, ImageCreate};
pub use reservation::Reservation;
pub use review::{Review, ReviewCreate};
pub use service::{
    EstablishmentWithDishes, Service, ServiceCreate, ServiceDetail, ServiceSummary,
};
pub use taxi::{Taxi, TaxiCreate};
pub use user::{User, UserCreate, UserProfileUpdate};
