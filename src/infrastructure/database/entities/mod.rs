//! Database entities module

pub mod city;
pub mod pickup_point;
pub mod product;
pub mod product_type;
pub mod reception;
pub mod reception_status;

pub use city::Entity as City;
pub use pickup_point::Entity as PickupPoint;
pub use product::Entity as Product;
pub use product_type::Entity as ProductType;
pub use reception::Entity as Reception;
pub use reception_status::Entity as ReceptionStatus;
