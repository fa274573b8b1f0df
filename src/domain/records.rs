//! Raw and conformed record types
//!
//! Raw records mirror the upstream extracts field for field: every column is
//! optional and nothing is trusted. Conformed records are what the engine
//! produces. Serialized field names follow the extract column names so that a
//! conformed CSV or table lines up with its raw counterpart.
//!
//! Numeric and date columns of raw records use [`csv::invalid_option`]: an
//! unreadable value is treated as absent instead of failing the whole read,
//! which is the same degradation the engine applies to malformed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw customer record (`crm_cust_info`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCustomer {
    /// Identity key; may be null or repeated
    #[serde(rename = "cst_id", default, deserialize_with = "csv::invalid_option")]
    pub id: Option<i64>,

    /// Business key
    #[serde(rename = "cst_key", default)]
    pub key: Option<String>,

    #[serde(rename = "cst_firstname", default)]
    pub first_name: Option<String>,

    #[serde(rename = "cst_lastname", default)]
    pub last_name: Option<String>,

    /// Single-letter marital status code
    #[serde(rename = "cst_marital_status", default)]
    pub marital_status: Option<String>,

    /// Single-letter gender code
    #[serde(rename = "cst_gndr", default)]
    pub gender: Option<String>,

    /// Creation date, used for recency ordering
    #[serde(
        rename = "cst_create_date",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub create_date: Option<NaiveDate>,
}

/// Conformed customer record, one per identity key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "cst_id")]
    pub id: i64,

    #[serde(rename = "cst_key")]
    pub key: Option<String>,

    #[serde(rename = "cst_firstname")]
    pub first_name: Option<String>,

    #[serde(rename = "cst_lastname")]
    pub last_name: Option<String>,

    /// `Single`, `Married` or `n/a`
    #[serde(rename = "cst_marital_status")]
    pub marital_status: String,

    /// `Female`, `Male` or `n/a`
    #[serde(rename = "cst_gndr")]
    pub gender: String,

    #[serde(rename = "cst_create_date")]
    pub create_date: Option<NaiveDate>,
}

/// Raw product record (`crm_prd_info`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(rename = "prd_id", default, deserialize_with = "csv::invalid_option")]
    pub id: Option<i64>,

    /// Composite key: 5-character category segment, separator, product segment
    #[serde(rename = "prd_key", default)]
    pub key: Option<String>,

    #[serde(rename = "prd_nm", default)]
    pub name: Option<String>,

    #[serde(rename = "prd_cost", default, deserialize_with = "csv::invalid_option")]
    pub cost: Option<i64>,

    /// Single-letter product line code
    #[serde(rename = "prd_line", default)]
    pub line: Option<String>,

    /// Start of validity
    #[serde(
        rename = "prd_start_dt",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub start_date: Option<NaiveDate>,
}

/// Conformed product record with a derived validity interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "prd_id")]
    pub id: Option<i64>,

    /// Category segment of the business key, `-` replaced by `_`
    #[serde(rename = "cat_id")]
    pub category_id: Option<String>,

    /// Product segment of the business key
    #[serde(rename = "prd_key")]
    pub key: Option<String>,

    #[serde(rename = "prd_nm")]
    pub name: Option<String>,

    /// Cost, 0 when the raw cost is absent
    #[serde(rename = "prd_cost")]
    pub cost: i64,

    /// `Mountain`, `Road`, `Other Sales`, `Touring` or `n/a`
    #[serde(rename = "prd_line")]
    pub line: String,

    #[serde(rename = "prd_start_dt")]
    pub start_date: Option<NaiveDate>,

    /// Day before the next version's start; absent for the current version
    #[serde(rename = "prd_end_dt")]
    pub end_date: Option<NaiveDate>,
}

/// Raw sales order line (`crm_sales_details`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSalesOrder {
    #[serde(rename = "sls_ord_num", default)]
    pub order_number: Option<String>,

    #[serde(rename = "sls_prd_key", default)]
    pub product_key: Option<String>,

    #[serde(
        rename = "sls_cust_id",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub customer_id: Option<i64>,

    /// `YYYYMMDD` encoded as an integer
    #[serde(
        rename = "sls_order_dt",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub order_date: Option<i64>,

    #[serde(
        rename = "sls_ship_dt",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub ship_date: Option<i64>,

    #[serde(rename = "sls_due_dt", default, deserialize_with = "csv::invalid_option")]
    pub due_date: Option<i64>,

    #[serde(rename = "sls_sales", default, deserialize_with = "csv::invalid_option")]
    pub sales: Option<i64>,

    #[serde(
        rename = "sls_quantity",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub quantity: Option<i64>,

    #[serde(rename = "sls_price", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<i64>,
}

/// Conformed sales order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(rename = "sls_ord_num")]
    pub order_number: Option<String>,

    #[serde(rename = "sls_prd_key")]
    pub product_key: Option<String>,

    #[serde(rename = "sls_cust_id")]
    pub customer_id: Option<i64>,

    #[serde(rename = "sls_order_dt")]
    pub order_date: Option<NaiveDate>,

    #[serde(rename = "sls_ship_dt")]
    pub ship_date: Option<NaiveDate>,

    #[serde(rename = "sls_due_dt")]
    pub due_date: Option<NaiveDate>,

    #[serde(rename = "sls_sales")]
    pub sales: Option<i64>,

    #[serde(rename = "sls_quantity")]
    pub quantity: Option<i64>,

    #[serde(rename = "sls_price")]
    pub price: Option<i64>,
}

/// Raw customer demographic record (`erp_cust_az12`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDemographic {
    /// Customer business key, possibly prefixed with `NAS`
    #[serde(rename = "cid", default)]
    pub id: Option<String>,

    #[serde(rename = "bdate", default, deserialize_with = "csv::invalid_option")]
    pub birth_date: Option<NaiveDate>,

    /// Short or long form gender
    #[serde(rename = "gen", default)]
    pub gender: Option<String>,
}

/// Conformed customer demographic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographic {
    #[serde(rename = "cid")]
    pub id: Option<String>,

    /// Absent when the raw birth date lies after the processing date
    #[serde(rename = "bdate")]
    pub birth_date: Option<NaiveDate>,

    #[serde(rename = "gen")]
    pub gender: String,
}

/// Raw customer location record (`erp_loc_a101`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLocation {
    /// Customer business key, possibly containing dashes
    #[serde(rename = "cid", default)]
    pub id: Option<String>,

    #[serde(rename = "cntry", default)]
    pub country: Option<String>,
}

/// Conformed customer location record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "cid")]
    pub id: Option<String>,

    #[serde(rename = "cntry")]
    pub country: String,
}

/// Product category record (`erp_px_cat_g1v2`); raw and conformed share a shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "id", default)]
    pub id: Option<String>,

    #[serde(rename = "cat", default)]
    pub category: Option<String>,

    #[serde(rename = "subcat", default)]
    pub subcategory: Option<String>,

    #[serde(rename = "maintenance", default)]
    pub maintenance: Option<String>,
}

/// Raw product category record
pub type RawCategory = Category;
