//! Fake device-record generator. Stands in for a remote data source:
//! every record carries the canonical `node_name` field plus an
//! arbitrary bag of key/value pairs that become that host's variables.

use crate::inventory::vars::Variables;
use rand::Rng;
use serde_json::json;

pub const MANUFACTURERS: &[&str] = &[
    "Cisco",
    "HPE-Aruba",
    "Arista",
    "Dell",
    "Juniper",
    "VMware",
    "Palo Alto",
];

pub const SITES: &[&str] = &[
    "Texas",
    "New York",
    "California",
    "Ohio",
    "Nevada",
    "North Carolina",
];

const SYS_OBJECT_ID: &str = "1.3.6.1.4.1.9.1.2066";

/// Field that names the host; everything else in a record is a host
/// variable.
pub const NODE_NAME_KEY: &str = "node_name";

/// Generates `count` device records from the process rng.
pub fn generate(count: usize) -> Vec<Variables> {
    generate_with(count, &mut rand::rng())
}

/// Generates `count` device records from the given rng, so tests can
/// seed for deterministic output.
pub fn generate_with<R: Rng>(count: usize, rng: &mut R) -> Vec<Variables> {
    (0..count).map(|i| device_record(i, rng)).collect()
}

fn device_record<R: Rng>(index: usize, rng: &mut R) -> Variables {
    let vendor = MANUFACTURERS[rng.random_range(0..MANUFACTURERS.len())];
    let site = SITES[rng.random_range(0..SITES.len())];
    let ios_version = format!("1{}.6.7", rng.random_range(5..=6));
    let ip = format!(
        "10.{}.{}.{}",
        rng.random_range(0..=255u16),
        rng.random_range(0..=255u16),
        rng.random_range(1..=254u16)
    );

    let mut record = Variables::new();
    record.insert(
        NODE_NAME_KEY.to_string(),
        json!(format!("device{:02}.example.com", index + 1)),
    );
    record.insert("vendor".to_string(), json!(vendor));
    record.insert("ip".to_string(), json!(ip));
    record.insert(
        "node_description".to_string(),
        json!(format!("{vendor} Software, Version 16.6.7")),
    );
    record.insert("is_router".to_string(), json!(rng.random_bool(0.25)));
    record.insert(
        "machine_type".to_string(),
        json!(format!("{vendor} network device")),
    );
    record.insert("sys_object_id".to_string(), json!(SYS_OBJECT_ID));
    record.insert("ios_version".to_string(), json!(ios_version));
    record.insert("site".to_string(), json!(site));

    record
}
