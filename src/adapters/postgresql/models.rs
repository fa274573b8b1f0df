//! Row mappings between record types and PostgreSQL tables
//!
//! Column names match the serialized record field names, so the relational
//! layout and the CSV layout agree.

use crate::domain::{
    Category, Customer, Demographic, Entity, Location, Product, RawCustomer, RawDemographic,
    RawLocation, RawProduct, RawSalesOrder, Result, SalesOrder, SourceError,
};
use tokio_postgres::types::{FromSql, ToSql};
use tokio_postgres::Row;

/// A record that maps onto one table row
pub trait TableRow: Sized {
    /// Column list in insert and select order
    const COLUMNS: &'static [&'static str];

    /// Insert parameters, in [`Self::COLUMNS`] order
    fn params(&self) -> Vec<&(dyn ToSql + Sync)>;

    /// Decode a row selected with [`Self::COLUMNS`]
    fn from_row(entity: Entity, row: &Row) -> Result<Self>;
}

fn column<'a, T: FromSql<'a>>(entity: Entity, row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name).map_err(|e| {
        SourceError::ReadFailed {
            entity,
            message: format!("column {name}: {e}"),
        }
        .into()
    })
}

/// `INSERT` statement for a table
pub fn insert_statement<T: TableRow>(schema: &str, table: &str) -> String {
    let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {schema}.{table} ({}) VALUES ({})",
        T::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

/// `SELECT` statement reading a raw table in load order
pub fn raw_select_statement<T: TableRow>(schema: &str, table: &str) -> String {
    format!(
        "SELECT {} FROM {schema}.{table} ORDER BY load_seq",
        T::COLUMNS.join(", ")
    )
}

impl TableRow for RawCustomer {
    const COLUMNS: &'static [&'static str] = &[
        "cst_id",
        "cst_key",
        "cst_firstname",
        "cst_lastname",
        "cst_marital_status",
        "cst_gndr",
        "cst_create_date",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.id,
            &self.key,
            &self.first_name,
            &self.last_name,
            &self.marital_status,
            &self.gender,
            &self.create_date,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cst_id")?,
            key: column(entity, row, "cst_key")?,
            first_name: column(entity, row, "cst_firstname")?,
            last_name: column(entity, row, "cst_lastname")?,
            marital_status: column(entity, row, "cst_marital_status")?,
            gender: column(entity, row, "cst_gndr")?,
            create_date: column(entity, row, "cst_create_date")?,
        })
    }
}

impl TableRow for Customer {
    const COLUMNS: &'static [&'static str] = RawCustomer::COLUMNS;

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.id,
            &self.key,
            &self.first_name,
            &self.last_name,
            &self.marital_status,
            &self.gender,
            &self.create_date,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cst_id")?,
            key: column(entity, row, "cst_key")?,
            first_name: column(entity, row, "cst_firstname")?,
            last_name: column(entity, row, "cst_lastname")?,
            marital_status: column(entity, row, "cst_marital_status")?,
            gender: column(entity, row, "cst_gndr")?,
            create_date: column(entity, row, "cst_create_date")?,
        })
    }
}

impl TableRow for RawProduct {
    const COLUMNS: &'static [&'static str] = &[
        "prd_id",
        "prd_key",
        "prd_nm",
        "prd_cost",
        "prd_line",
        "prd_start_dt",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.id,
            &self.key,
            &self.name,
            &self.cost,
            &self.line,
            &self.start_date,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "prd_id")?,
            key: column(entity, row, "prd_key")?,
            name: column(entity, row, "prd_nm")?,
            cost: column(entity, row, "prd_cost")?,
            line: column(entity, row, "prd_line")?,
            start_date: column(entity, row, "prd_start_dt")?,
        })
    }
}

impl TableRow for Product {
    const COLUMNS: &'static [&'static str] = &[
        "prd_id",
        "cat_id",
        "prd_key",
        "prd_nm",
        "prd_cost",
        "prd_line",
        "prd_start_dt",
        "prd_end_dt",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.id,
            &self.category_id,
            &self.key,
            &self.name,
            &self.cost,
            &self.line,
            &self.start_date,
            &self.end_date,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "prd_id")?,
            category_id: column(entity, row, "cat_id")?,
            key: column(entity, row, "prd_key")?,
            name: column(entity, row, "prd_nm")?,
            cost: column(entity, row, "prd_cost")?,
            line: column(entity, row, "prd_line")?,
            start_date: column(entity, row, "prd_start_dt")?,
            end_date: column(entity, row, "prd_end_dt")?,
        })
    }
}

const SALES_COLUMNS: &[&str] = &[
    "sls_ord_num",
    "sls_prd_key",
    "sls_cust_id",
    "sls_order_dt",
    "sls_ship_dt",
    "sls_due_dt",
    "sls_sales",
    "sls_quantity",
    "sls_price",
];

impl TableRow for RawSalesOrder {
    const COLUMNS: &'static [&'static str] = SALES_COLUMNS;

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.order_number,
            &self.product_key,
            &self.customer_id,
            &self.order_date,
            &self.ship_date,
            &self.due_date,
            &self.sales,
            &self.quantity,
            &self.price,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            order_number: column(entity, row, "sls_ord_num")?,
            product_key: column(entity, row, "sls_prd_key")?,
            customer_id: column(entity, row, "sls_cust_id")?,
            order_date: column(entity, row, "sls_order_dt")?,
            ship_date: column(entity, row, "sls_ship_dt")?,
            due_date: column(entity, row, "sls_due_dt")?,
            sales: column(entity, row, "sls_sales")?,
            quantity: column(entity, row, "sls_quantity")?,
            price: column(entity, row, "sls_price")?,
        })
    }
}

impl TableRow for SalesOrder {
    const COLUMNS: &'static [&'static str] = SALES_COLUMNS;

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.order_number,
            &self.product_key,
            &self.customer_id,
            &self.order_date,
            &self.ship_date,
            &self.due_date,
            &self.sales,
            &self.quantity,
            &self.price,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            order_number: column(entity, row, "sls_ord_num")?,
            product_key: column(entity, row, "sls_prd_key")?,
            customer_id: column(entity, row, "sls_cust_id")?,
            order_date: column(entity, row, "sls_order_dt")?,
            ship_date: column(entity, row, "sls_ship_dt")?,
            due_date: column(entity, row, "sls_due_dt")?,
            sales: column(entity, row, "sls_sales")?,
            quantity: column(entity, row, "sls_quantity")?,
            price: column(entity, row, "sls_price")?,
        })
    }
}

impl TableRow for RawDemographic {
    const COLUMNS: &'static [&'static str] = &["cid", "bdate", "gen"];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.id, &self.birth_date, &self.gender]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cid")?,
            birth_date: column(entity, row, "bdate")?,
            gender: column(entity, row, "gen")?,
        })
    }
}

impl TableRow for Demographic {
    const COLUMNS: &'static [&'static str] = RawDemographic::COLUMNS;

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.id, &self.birth_date, &self.gender]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cid")?,
            birth_date: column(entity, row, "bdate")?,
            gender: column(entity, row, "gen")?,
        })
    }
}

impl TableRow for RawLocation {
    const COLUMNS: &'static [&'static str] = &["cid", "cntry"];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.id, &self.country]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cid")?,
            country: column(entity, row, "cntry")?,
        })
    }
}

impl TableRow for Location {
    const COLUMNS: &'static [&'static str] = RawLocation::COLUMNS;

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.id, &self.country]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "cid")?,
            country: column(entity, row, "cntry")?,
        })
    }
}

impl TableRow for Category {
    const COLUMNS: &'static [&'static str] = &["id", "cat", "subcat", "maintenance"];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.id,
            &self.category,
            &self.subcategory,
            &self.maintenance,
        ]
    }

    fn from_row(entity: Entity, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(entity, row, "id")?,
            category: column(entity, row, "cat")?,
            subcategory: column(entity, row, "subcat")?,
            maintenance: column(entity, row, "maintenance")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_insert_statement_placeholders() {
        let sql = insert_statement::<RawLocation>("bronze", "erp_loc_a101");
        assert_eq!(
            sql,
            "INSERT INTO bronze.erp_loc_a101 (cid, cntry) VALUES ($1, $2)"
        );
    }

    #[test]
    fn test_raw_select_orders_by_load_sequence() {
        let sql = raw_select_statement::<RawDemographic>("bronze", "erp_cust_az12");
        assert_eq!(
            sql,
            "SELECT cid, bdate, gen FROM bronze.erp_cust_az12 ORDER BY load_seq"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    /// Bound values paired with their column, in insert order
    fn bound<T: TableRow>(row: &T) -> Vec<(&'static str, String)> {
        let params = row.params();
        assert_eq!(params.len(), T::COLUMNS.len());
        T::COLUMNS
            .iter()
            .copied()
            .zip(params.iter().map(|p| format!("{p:?}")))
            .collect()
    }

    fn customer() -> Customer {
        Customer {
            id: 11000,
            key: Some("AW00011000".to_string()),
            first_name: Some("Jon".to_string()),
            last_name: Some("Yang".to_string()),
            marital_status: "Married".to_string(),
            gender: "Male".to_string(),
            create_date: date(2025, 10, 6),
        }
    }

    fn sales_order() -> SalesOrder {
        SalesOrder {
            order_number: Some("SO43697".to_string()),
            product_key: Some("BK-R93R-62".to_string()),
            customer_id: Some(21768),
            order_date: date(2010, 12, 29),
            ship_date: date(2011, 1, 5),
            due_date: date(2011, 1, 10),
            sales: Some(3578),
            quantity: Some(2),
            price: Some(1789),
        }
    }

    #[test]
    fn test_params_match_columns() {
        assert_eq!(
            RawCustomer::default().params().len(),
            RawCustomer::COLUMNS.len()
        );
        assert_eq!(RawProduct::default().params().len(), RawProduct::COLUMNS.len());
        assert_eq!(
            RawSalesOrder::default().params().len(),
            RawSalesOrder::COLUMNS.len()
        );
        assert_eq!(
            RawDemographic::default().params().len(),
            RawDemographic::COLUMNS.len()
        );
        assert_eq!(
            RawLocation::default().params().len(),
            RawLocation::COLUMNS.len()
        );
        assert_eq!(Category::default().params().len(), Category::COLUMNS.len());

        let conformed = Product {
            id: None,
            category_id: None,
            key: None,
            name: None,
            cost: 0,
            line: "n/a".to_string(),
            start_date: None,
            end_date: None,
        };
        assert_eq!(conformed.params().len(), Product::COLUMNS.len());
        assert_eq!(customer().params().len(), Customer::COLUMNS.len());
        assert_eq!(sales_order().params().len(), SalesOrder::COLUMNS.len());
    }

    #[test]
    fn test_customer_params_bind_to_their_columns() {
        assert_eq!(
            bound(&customer()),
            vec![
                ("cst_id", "11000".to_string()),
                ("cst_key", r#"Some("AW00011000")"#.to_string()),
                ("cst_firstname", r#"Some("Jon")"#.to_string()),
                ("cst_lastname", r#"Some("Yang")"#.to_string()),
                ("cst_marital_status", r#""Married""#.to_string()),
                ("cst_gndr", r#""Male""#.to_string()),
                ("cst_create_date", "Some(2025-10-06)".to_string()),
            ]
        );
    }

    #[test]
    fn test_sales_params_bind_to_their_columns() {
        assert_eq!(
            bound(&sales_order()),
            vec![
                ("sls_ord_num", r#"Some("SO43697")"#.to_string()),
                ("sls_prd_key", r#"Some("BK-R93R-62")"#.to_string()),
                ("sls_cust_id", "Some(21768)".to_string()),
                ("sls_order_dt", "Some(2010-12-29)".to_string()),
                ("sls_ship_dt", "Some(2011-01-05)".to_string()),
                ("sls_due_dt", "Some(2011-01-10)".to_string()),
                ("sls_sales", "Some(3578)".to_string()),
                ("sls_quantity", "Some(2)".to_string()),
                ("sls_price", "Some(1789)".to_string()),
            ]
        );
    }

    #[test]
    fn test_demographic_params_bind_to_their_columns() {
        let raw = RawDemographic {
            id: Some("NASAW00011000".to_string()),
            birth_date: date(1971, 10, 6),
            gender: Some("M".to_string()),
        };
        assert_eq!(
            bound(&raw),
            vec![
                ("cid", r#"Some("NASAW00011000")"#.to_string()),
                ("bdate", "Some(1971-10-06)".to_string()),
                ("gen", r#"Some("M")"#.to_string()),
            ]
        );

        let conformed = Demographic {
            id: Some("AW00011000".to_string()),
            birth_date: date(1971, 10, 6),
            gender: "Male".to_string(),
        };
        assert_eq!(
            bound(&conformed),
            vec![
                ("cid", r#"Some("AW00011000")"#.to_string()),
                ("bdate", "Some(1971-10-06)".to_string()),
                ("gen", r#""Male""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_location_params_bind_to_their_columns() {
        let raw = RawLocation {
            id: Some("AW-00011000".to_string()),
            country: Some("DE".to_string()),
        };
        assert_eq!(
            bound(&raw),
            vec![
                ("cid", r#"Some("AW-00011000")"#.to_string()),
                ("cntry", r#"Some("DE")"#.to_string()),
            ]
        );

        let conformed = Location {
            id: Some("AW00011000".to_string()),
            country: "Germany".to_string(),
        };
        assert_eq!(
            bound(&conformed),
            vec![
                ("cid", r#"Some("AW00011000")"#.to_string()),
                ("cntry", r#""Germany""#.to_string()),
            ]
        );
    }
}
