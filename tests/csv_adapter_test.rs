//! Integration tests for the file-backed source and sink
//!
//! Raw extracts are written to a temporary directory, refreshed through the
//! coordinator and the conformed files are read back.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use strata::adapters::csv::{CsvSink, CsvSource};
use strata::adapters::storage::{ConformedSink, RawSource};
use strata::core::refresh::{RefreshCoordinator, RefreshErrorType, RefreshOptions};
use strata::domain::{Entity, RawBatch, SourceError, StrataError};
use tempfile::TempDir;
use tokio::sync::watch;

const CUSTOMERS: &str = "\
cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date
11000,AW00011000, Jon,Yang ,M,M,2025-10-01
11000,AW00011000,Jon,Yang,S,M,2025-10-06
,AW00011002,Ruben,Torres,M,M,2025-10-06
11001,AW00011001,Eugene,Huang,x,,not-a-date
";

const SALES: &str = "\
sls_ord_num,sls_prd_key,sls_cust_id,sls_order_dt,sls_ship_dt,sls_due_dt,sls_sales,sls_quantity,sls_price
SO43697,BK-R93R-62,21768,20101229,0,20110110,,1,3578
SO43698,BK-M82S-44,28389,20101229,20110105,20110110,3399,1,
";

const LOCATIONS: &str = "\
cid,cntry
AW-00011000,DE
AW-00011001,
";

fn write_raw(dir: &Path, entity: Entity, contents: &str) {
    fs::write(dir.join(entity.raw_file_name()), contents).unwrap();
}

fn options(entities: &[Entity]) -> RefreshOptions {
    RefreshOptions {
        entities: entities.to_vec(),
        max_concurrency: 2,
        dry_run: false,
        as_of: None,
    }
}

#[tokio::test]
async fn test_csv_source_reads_extracts_verbatim() {
    let raw_dir = TempDir::new().unwrap();
    write_raw(raw_dir.path(), Entity::Customers, CUSTOMERS);

    let source = CsvSource::new(raw_dir.path());
    source.test_connection().await.unwrap();

    let RawBatch::Customers(rows) = source.fetch(Entity::Customers).await.unwrap() else {
        panic!("expected customers");
    };
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].first_name.as_deref(), Some(" Jon"));
    assert_eq!(rows[2].id, None);
    // Unreadable dates degrade to absent instead of failing the read
    assert_eq!(rows[3].create_date, None);
}

#[tokio::test]
async fn test_missing_extract_is_not_found() {
    let raw_dir = TempDir::new().unwrap();
    let source = CsvSource::new(raw_dir.path());

    let result = source.fetch(Entity::Products).await;

    assert!(matches!(
        result,
        Err(StrataError::Source(SourceError::NotFound {
            entity: Entity::Products,
            ..
        }))
    ));
}

#[tokio::test]
async fn test_structurally_broken_extract_is_malformed() {
    let raw_dir = TempDir::new().unwrap();
    write_raw(raw_dir.path(), Entity::Locations, "cid,cntry\nAW-1,DE,extra\n");
    let source = CsvSource::new(raw_dir.path());

    let result = source.fetch(Entity::Locations).await;

    assert!(matches!(
        result,
        Err(StrataError::Source(SourceError::MalformedRecord { .. }))
    ));
}

#[tokio::test]
async fn test_refresh_csv_to_csv() {
    let raw_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_raw(raw_dir.path(), Entity::Customers, CUSTOMERS);
    write_raw(raw_dir.path(), Entity::Sales, SALES);
    write_raw(raw_dir.path(), Entity::Locations, LOCATIONS);

    let source = Arc::new(CsvSource::new(raw_dir.path()));
    let sink = Arc::new(CsvSink::new(out_dir.path().join("silver")));
    let (_tx, rx) = watch::channel(false);
    let coordinator = RefreshCoordinator::with_storage(
        source,
        sink.clone(),
        options(&[Entity::Customers, Entity::Sales, Entity::Locations]),
        rx,
    );

    let summary = coordinator.execute_refresh().await.unwrap();
    assert!(summary.is_successful(), "errors: {:?}", summary.errors);

    let customers = fs::read_to_string(sink.path_for(Entity::Customers)).unwrap();
    assert_eq!(
        customers,
        "cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date\n\
         11000,AW00011000,Jon,Yang,Single,Male,2025-10-06\n\
         11001,AW00011001,Eugene,Huang,n/a,n/a,\n"
    );

    let sales = fs::read_to_string(sink.path_for(Entity::Sales)).unwrap();
    let lines: Vec<&str> = sales.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "SO43697,BK-R93R-62,21768,2010-12-29,,2011-01-10,3578,1,3578"
    );
    assert_eq!(
        lines[2],
        "SO43698,BK-M82S-44,28389,2010-12-29,2011-01-05,2011-01-10,3399,1,3399"
    );

    let locations = fs::read_to_string(sink.path_for(Entity::Locations)).unwrap();
    assert_eq!(locations, "cid,cntry\nAW00011000,Germany\nAW00011001,n/a\n");

    let report = summary.report(Entity::Customers).unwrap();
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_written, 2);
}

#[tokio::test]
async fn test_refresh_replaces_previous_output() {
    let raw_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_raw(raw_dir.path(), Entity::Locations, LOCATIONS);

    let sink = Arc::new(CsvSink::new(out_dir.path()));
    sink.ensure_schema().await.unwrap();
    fs::write(sink.path_for(Entity::Locations), "cid,cntry\nSTALE,Nowhere\n").unwrap();

    let (_tx, rx) = watch::channel(false);
    let coordinator = RefreshCoordinator::with_storage(
        Arc::new(CsvSource::new(raw_dir.path())),
        sink.clone(),
        options(&[Entity::Locations]),
        rx,
    );
    let first = coordinator.execute_refresh().await.unwrap();
    let after_first = fs::read_to_string(sink.path_for(Entity::Locations)).unwrap();
    let second = coordinator.execute_refresh().await.unwrap();
    let after_second = fs::read_to_string(sink.path_for(Entity::Locations)).unwrap();

    assert!(!after_first.contains("STALE"));
    assert_eq!(after_first, after_second);
    assert_eq!(
        first.report(Entity::Locations).unwrap().checksum,
        second.report(Entity::Locations).unwrap().checksum
    );
    assert!(!out_dir.path().join("erp_loc_a101.csv.tmp").exists());
}

#[tokio::test]
async fn test_missing_extract_fails_only_that_entity() {
    let raw_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_raw(raw_dir.path(), Entity::Locations, LOCATIONS);

    let sink = Arc::new(CsvSink::new(out_dir.path()));
    let (_tx, rx) = watch::channel(false);
    let coordinator = RefreshCoordinator::with_storage(
        Arc::new(CsvSource::new(raw_dir.path())),
        sink.clone(),
        options(&[Entity::Products, Entity::Locations]),
        rx,
    );

    let summary = coordinator.execute_refresh().await.unwrap();

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].entity, Some(Entity::Products));
    assert_eq!(summary.errors[0].error_type, RefreshErrorType::Source);
    assert!(sink.path_for(Entity::Locations).exists());
    assert!(!sink.path_for(Entity::Products).exists());
}
