//! Whole-set containers passed between sources, the engine and sinks
//!
//! A batch always carries the complete record set of one entity. There is no
//! partial batch: the read interface is a bulk fetch and the write interface
//! is a full replace.

use crate::domain::entity::Entity;
use crate::domain::records::{
    Category, Customer, Demographic, Location, Product, RawCategory, RawCustomer,
    RawDemographic, RawLocation, RawProduct, RawSalesOrder, SalesOrder,
};

/// Full raw snapshot of one entity
#[derive(Debug, Clone, PartialEq)]
pub enum RawBatch {
    Customers(Vec<RawCustomer>),
    Products(Vec<RawProduct>),
    Sales(Vec<RawSalesOrder>),
    Demographics(Vec<RawDemographic>),
    Locations(Vec<RawLocation>),
    Categories(Vec<RawCategory>),
}

impl RawBatch {
    /// Empty snapshot for an entity
    pub fn empty(entity: Entity) -> Self {
        match entity {
            Entity::Customers => RawBatch::Customers(Vec::new()),
            Entity::Products => RawBatch::Products(Vec::new()),
            Entity::Sales => RawBatch::Sales(Vec::new()),
            Entity::Demographics => RawBatch::Demographics(Vec::new()),
            Entity::Locations => RawBatch::Locations(Vec::new()),
            Entity::Categories => RawBatch::Categories(Vec::new()),
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            RawBatch::Customers(_) => Entity::Customers,
            RawBatch::Products(_) => Entity::Products,
            RawBatch::Sales(_) => Entity::Sales,
            RawBatch::Demographics(_) => Entity::Demographics,
            RawBatch::Locations(_) => Entity::Locations,
            RawBatch::Categories(_) => Entity::Categories,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawBatch::Customers(rows) => rows.len(),
            RawBatch::Products(rows) => rows.len(),
            RawBatch::Sales(rows) => rows.len(),
            RawBatch::Demographics(rows) => rows.len(),
            RawBatch::Locations(rows) => rows.len(),
            RawBatch::Categories(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full conformed snapshot of one entity
#[derive(Debug, Clone, PartialEq)]
pub enum ConformedBatch {
    Customers(Vec<Customer>),
    Products(Vec<Product>),
    Sales(Vec<SalesOrder>),
    Demographics(Vec<Demographic>),
    Locations(Vec<Location>),
    Categories(Vec<Category>),
}

impl ConformedBatch {
    pub fn entity(&self) -> Entity {
        match self {
            ConformedBatch::Customers(_) => Entity::Customers,
            ConformedBatch::Products(_) => Entity::Products,
            ConformedBatch::Sales(_) => Entity::Sales,
            ConformedBatch::Demographics(_) => Entity::Demographics,
            ConformedBatch::Locations(_) => Entity::Locations,
            ConformedBatch::Categories(_) => Entity::Categories,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConformedBatch::Customers(rows) => rows.len(),
            ConformedBatch::Products(rows) => rows.len(),
            ConformedBatch::Sales(rows) => rows.len(),
            ConformedBatch::Demographics(rows) => rows.len(),
            ConformedBatch::Locations(rows) => rows.len(),
            ConformedBatch::Categories(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
