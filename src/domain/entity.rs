//! Entity set identifiers
//!
//! Every raw extract and every conformed output belongs to exactly one entity
//! set. The same names are used for configuration filters, CLI flags, log
//! fields, relational table names and CSV file names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six entity sets handled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    /// CRM customer master
    Customers,
    /// CRM product master with validity history
    Products,
    /// CRM sales order lines
    Sales,
    /// ERP customer demographics (reference)
    Demographics,
    /// ERP customer locations (reference)
    Locations,
    /// ERP product categories (reference)
    Categories,
}

impl Entity {
    /// All entities, in reporting order
    pub const ALL: [Entity; 6] = [
        Entity::Customers,
        Entity::Products,
        Entity::Sales,
        Entity::Demographics,
        Entity::Locations,
        Entity::Categories,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customers => "customers",
            Entity::Products => "products",
            Entity::Sales => "sales",
            Entity::Demographics => "demographics",
            Entity::Locations => "locations",
            Entity::Categories => "categories",
        }
    }

    /// Table name, identical in the raw and the conformed schema
    pub fn table_name(&self) -> &'static str {
        match self {
            Entity::Customers => "crm_cust_info",
            Entity::Products => "crm_prd_info",
            Entity::Sales => "crm_sales_details",
            Entity::Demographics => "erp_cust_az12",
            Entity::Locations => "erp_loc_a101",
            Entity::Categories => "erp_px_cat_g1v2",
        }
    }

    /// File name of the raw CSV extract
    pub fn raw_file_name(&self) -> &'static str {
        match self {
            Entity::Customers => "cust_info.csv",
            Entity::Products => "prd_info.csv",
            Entity::Sales => "sales_details.csv",
            Entity::Demographics => "CUST_AZ12.csv",
            Entity::Locations => "LOC_A101.csv",
            Entity::Categories => "PX_CAT_G1V2.csv",
        }
    }

    /// File name of the conformed CSV output
    pub fn conformed_file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Entity::ALL
            .iter()
            .copied()
            .find(|entity| entity.as_str() == needle || entity.table_name() == needle)
            .ok_or_else(|| {
                format!(
                    "Unknown entity '{s}'. Must be one of: {}",
                    Entity::ALL.map(|e| e.as_str()).join(", ")
                )
            })
    }
}

/// Parse a comma-separated entity list, e.g. `customers,sales`
pub fn parse_entity_list(input: &str) -> Result<Vec<Entity>, String> {
    let mut entities = Vec::new();
    for part in input.split(',').filter(|p| !p.trim().is_empty()) {
        let entity = Entity::from_str(part)?;
        if !entities.contains(&entity) {
            entities.push(entity);
        }
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_from_str_accepts_names_and_tables() {
        assert_eq!(Entity::from_str("customers").unwrap(), Entity::Customers);
        assert_eq!(Entity::from_str(" Sales ").unwrap(), Entity::Sales);
        assert_eq!(
            Entity::from_str("erp_loc_a101").unwrap(),
            Entity::Locations
        );
        assert!(Entity::from_str("invoices").is_err());
    }

    #[test]
    fn test_parse_entity_list_dedupes() {
        let entities = parse_entity_list("sales, customers,sales,").unwrap();
        assert_eq!(entities, vec![Entity::Sales, Entity::Customers]);
    }

    #[test]
    fn test_entity_names_are_distinct() {
        let mut tables: Vec<_> = Entity::ALL.iter().map(|e| e.table_name()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Entity::ALL.len());
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::Demographics.to_string(), "demographics");
        assert_eq!(
            Entity::Categories.conformed_file_name(),
            "erp_px_cat_g1v2.csv"
        );
    }
}
