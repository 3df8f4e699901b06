//! SeaORM entities of the supply-chain backend.

pub mod forecast;
pub mod inventory_item;
pub mod shipment;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::forecast::Entity as Forecast;
    pub use super::inventory_item::Entity as InventoryItem;
    pub use super::shipment::Entity as Shipment;
}
