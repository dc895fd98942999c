use dyninv::inventory::store::{HostParams, InventoryStore, ALL, UNGROUPED};
use dyninv::inventory::vars::Variables;
use dyninv::inventory::InventoryCache;
use dyninv::{datagen, exclude_hosts, filter_groups, populate_from_records};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;
use serde_json::json;

fn vars(pairs: &[(&str, serde_json::Value)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn validate_members(store: &InventoryStore, group: &str, expected: &[&str]) {
    let actual = store.get_hosts_in_group(group);

    if actual != expected {
        panic!(
            "Membership mismatch for group '{}':\n  Expected: {:?}\n  Found:    {:?}",
            group, expected, actual
        );
    }
}

#[rstest]
#[case::named_group(Some("web"), "web", &["h1"])]
#[case::no_group(None, UNGROUPED, &["h1"])]
fn test_add_host_membership(
    #[case] group: Option<&str>,
    #[case] lookup: &str,
    #[case] expected: &[&str],
) {
    let mut store = InventoryStore::new();
    let params = HostParams {
        group: group.map(str::to_string),
        ..HostParams::default()
    };

    store.add_host("h1", &params);
    store.add_host("h1", &params);

    validate_members(&store, lookup, expected);
}

#[rstest]
#[case::add_host_keeps_stale_membership(false, &["h"])]
#[case::add_host_to_group_repairs(true, &[])]
fn test_move_semantics_are_asymmetric(
    #[case] use_move_operation: bool,
    #[case] expected_ungrouped: &[&str],
) {
    let mut store = InventoryStore::new();
    store.add_host("h", &HostParams::default());

    let params = HostParams::in_group("G");
    if use_move_operation {
        store.add_host_to_group("h", &params);
    } else {
        store.add_host("h", &params);
    }

    validate_members(&store, "G", &["h"]);
    validate_members(&store, UNGROUPED, expected_ungrouped);
}

#[test]
fn test_removals_cascade_through_the_graph() {
    let mut store = InventoryStore::new();
    store.add_host("h", &HostParams::in_group("g1"));
    store.add_host("h", &HostParams::in_group("g2"));
    store.add_child_group("p", "g1", None);

    store.remove_host("h");
    assert!(store.get_host("h").is_none());
    validate_members(&store, "g1", &[]);
    validate_members(&store, "g2", &[]);

    store.remove_group("g1");
    assert!(!store.get_groups().contains_key("g1"));
    assert!(store.get_child_groups("p").is_empty());
    assert!(!store.get_child_groups(ALL).contains(&"g1".to_string()));
}

#[test]
fn test_documented_end_to_end_example() {
    let mut store = InventoryStore::new();
    let params = HostParams {
        group: Some("g1".to_string()),
        vars: vars(&[("ip", json!("10.0.0.1"))]),
        group_vars: vars(&[("region", json!("east"))]),
    };

    store.add_hosts(&["h1".to_string()], &params);

    assert_eq!(
        store.get_host("h1"),
        Some(&vars(&[("ip", json!("10.0.0.1"))]))
    );
    assert_eq!(
        store.get_group("g1"),
        Some(&vars(&[("region", json!("east"))]))
    );
    validate_members(&store, "g1", &["h1"]);
}

#[test]
fn test_snapshot_round_trip_for_a_generated_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let cache = InventoryCache::new(dir.path().join("inventory.json"));

    let mut store = InventoryStore::new();
    let mut rng = StdRng::seed_from_u64(1);
    populate_from_records(&mut store, datagen::generate_with(6, &mut rng));
    store.add_child_group("network", "routers", Some(&vars(&[("snmp", json!(true))])));

    cache.save(&store).unwrap();
    let restored = cache.load();

    assert_eq!(restored, store);
    assert_eq!(restored.get_hosts().len(), 6);
}

#[test]
fn test_corrupt_snapshot_loads_as_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, "definitely: [not, the, inventory").unwrap();

    let store = InventoryCache::new(&path).load();

    assert!(store.get_hosts().is_empty());
    assert_eq!(store.get_child_groups(ALL), vec![UNGROUPED.to_string()]);
}

#[test]
fn test_group_and_host_filters_shape_the_inventory() {
    let mut store = InventoryStore::new();
    let records = vec![
        vars(&[
            ("node_name", json!("r1.example.com")),
            ("site", json!("Texas")),
            ("ios_version", json!("15.6.7")),
        ]),
        vars(&[
            ("node_name", json!("r2.example.com")),
            ("site", json!("Texas")),
            ("ios_version", json!("16.6.7")),
        ]),
        vars(&[
            ("node_name", json!("r3.example.com")),
            ("site", json!("Ohio")),
            ("ios_version", json!("16.6.7")),
        ]),
    ];
    populate_from_records(&mut store, records);

    filter_groups(&mut store, &["Texas".to_string()]);
    exclude_hosts(&mut store, &[("ios_version".to_string(), "15[.].*".to_string())])
        .unwrap();

    // only the named group survives, without the excluded host
    let group_names: Vec<&str> = store.get_groups().keys().map(String::as_str).collect();
    assert_eq!(group_names, vec!["texas"]);
    validate_members(&store, "texas", &["r2.example.com"]);
    assert_eq!(store.get_child_groups(ALL), vec!["texas".to_string()]);

    // the ohio host lost its membership record but keeps its vars
    assert!(store.get_host("r1.example.com").is_none());
    assert!(store.get_host("r3.example.com").is_some());
}

#[test]
fn test_generated_records_populate_site_groups() {
    let mut store = InventoryStore::new();
    let mut rng = StdRng::seed_from_u64(99);

    populate_from_records(&mut store, datagen::generate_with(10, &mut rng));

    assert_eq!(store.get_hosts().len(), 10);

    // every host must be a member of exactly one site group
    for group in store.get_child_groups(ALL) {
        for host in store.get_hosts_in_group(&group) {
            let host_vars = store.get_host(&host).unwrap();
            assert!(host_vars.contains_key("vendor"));
            assert!(host_vars.contains_key("ip"));
        }
    }

    let total_memberships: usize = store
        .get_groups()
        .values()
        .map(|g| g.hosts.len())
        .sum();
    assert_eq!(total_memberships, 10);
}
