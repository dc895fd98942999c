pub mod cli;
pub mod datagen;
pub mod inventory;
pub mod output;

use crate::datagen::NODE_NAME_KEY;
use crate::inventory::store::{HostParams, InventoryStore};
use crate::inventory::utils::to_safe_group_name;
use anyhow::Result;
use log::warn;
use regex::RegexBuilder;

/// Populates the store from device records: each record names its host
/// via `node_name`, is grouped by its sanitized `site` value, and every
/// remaining field becomes a host variable. Records without a usable
/// host name are skipped with a warning.
pub fn populate_from_records(
    store: &mut InventoryStore,
    records: Vec<crate::inventory::vars::Variables>,
) {
    for mut record in records {
        let name = record
            .shift_remove(NODE_NAME_KEY)
            .and_then(|v| v.as_str().map(str::to_string));

        let Some(name) = name else {
            warn!("Skipping record with a missing or non-string '{NODE_NAME_KEY}' field");
            continue;
        };

        let group = record
            .get("site")
            .and_then(|v| v.as_str())
            .map(|site| to_safe_group_name(site, '_'));

        let params = HostParams {
            group,
            vars: record,
            ..HostParams::default()
        };

        store.add_host(&name, &params);
    }
}

/// Keeps only the named groups, compared case-insensitively, and removes
/// every other group record (`ungrouped` included when it is not named).
/// An empty `keep` list disables the filter.
pub fn filter_groups(store: &mut InventoryStore, keep: &[String]) {
    if keep.is_empty() {
        return;
    }

    let keep: Vec<String> = keep.iter().map(|name| name.to_lowercase()).collect();
    let doomed: Vec<String> = store
        .get_groups()
        .keys()
        .filter(|name| !keep.contains(&name.to_lowercase()))
        .cloned()
        .collect();

    for name in doomed {
        store.remove_group(&name);
    }
}

/// Removes every host whose variable `key` matches `pattern` at the start
/// of the value, case-insensitively. Hosts without the variable, or with
/// a non-string value, are tested against the empty string. An invalid
/// pattern is an error.
pub fn exclude_hosts(store: &mut InventoryStore, excludes: &[(String, String)]) -> Result<()> {
    for (key, pattern) in excludes {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()?;

        let doomed: Vec<String> = store
            .get_hosts()
            .iter()
            .filter(|(_, vars)| {
                let value = vars.get(key).and_then(|v| v.as_str()).unwrap_or("");
                regex.is_match(value)
            })
            .map(|(host, _)| host.clone())
            .collect();

        for host in doomed {
            store.remove_host(&host);
        }
    }

    Ok(())
}
