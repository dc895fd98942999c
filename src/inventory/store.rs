use super::vars::{merge_vars, Variables};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Name of the synthetic top-level group whose children list enumerates
/// every known group.
pub const ALL: &str = "all";

/// Reserved group holding hosts that were added without an explicit group.
pub const UNGROUPED: &str = "ungrouped";

/// Reserved top-level key holding the hostvars mapping in the wire
/// document; never a group record.
pub const META: &str = "_meta";

/// A single group record: member host names, group variables and child
/// group names. Hosts and children keep insertion order and never hold
/// duplicates; membership is by name only, host variables live in the
/// store's hostvars registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub vars: Variables,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Group {
    fn add_host(&mut self, host: &str) {
        if !self.hosts.iter().any(|h| h == host) {
            self.hosts.push(host.to_string());
        }
    }

    fn add_child(&mut self, child: &str) {
        if !self.children.iter().any(|c| c == child) {
            self.children.push(child.to_string());
        }
    }
}

/// Optional arguments shared by the host insertion operations.
#[derive(Clone, Debug, Default)]
pub struct HostParams {
    /// Group to place the host into; `None` targets `ungrouped`.
    pub group: Option<String>,
    /// Variables merged into the host's entry in hostvars.
    pub vars: Variables,
    /// Variables merged into the target group when one is named.
    pub group_vars: Variables,
}

impl HostParams {
    pub fn in_group(group: &str) -> Self {
        HostParams {
            group: Some(group.to_string()),
            ..HostParams::default()
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Meta {
    hostvars: IndexMap<String, Variables>,
}

#[derive(Serialize, Deserialize)]
struct AllGroup {
    children: Vec<String>,
}

/// On-the-wire shape of the inventory: `_meta.hostvars`, the `all`
/// container, then one record per group. `_meta` is reserved; every
/// other top-level key is a group record.
#[derive(Serialize, Deserialize)]
pub(crate) struct InventoryDoc {
    #[serde(rename = "_meta")]
    meta: Meta,
    all: AllGroup,
    #[serde(flatten)]
    groups: IndexMap<String, Group>,
}

/// The inventory aggregate. Owns the host-variable registry (the single
/// source of truth for host variables) and the group registry; the `all`
/// children list is derived from the group registry's key order, so every
/// known group is enumerated there by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryStore {
    hostvars: IndexMap<String, Variables>,
    groups: IndexMap<String, Group>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// A fresh store contains only `_meta`, `all` and an empty
    /// `ungrouped` group.
    pub fn new() -> Self {
        let mut groups = IndexMap::new();
        groups.insert(UNGROUPED.to_string(), Group::default());

        InventoryStore {
            hostvars: IndexMap::new(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hostvars.is_empty()
    }

    /// `all` and `_meta` would collide with the wire document's own top
    /// level, so they are never materialized as group records.
    fn ensure_group(&mut self, name: &str) -> Option<&mut Group> {
        if name == ALL || name == META {
            warn!("Group name '{name}' is reserved, ignoring");
            return None;
        }

        if !self.groups.contains_key(name) {
            debug!("Creating group '{name}'");
        }
        Some(self.groups.entry(name.to_string()).or_default())
    }

    /// Ensures `name` exists with empty hosts/vars/children and merges
    /// `group_vars` into its variables when provided. Never fails; the
    /// reserved names `all` and `_meta` are skipped with a warning.
    pub fn add_group(&mut self, name: &str, group_vars: Option<&Variables>) {
        if let Some(group) = self.ensure_group(name) {
            if let Some(vars) = group_vars {
                merge_vars(&mut group.vars, vars);
            }
        }
    }

    /// Merges `params.vars` into the host's hostvars entry (creating it),
    /// then appends the host to the named group (lazily created, with
    /// `params.group_vars` applied) or to `ungrouped` when no group is
    /// given. Does NOT remove the host from any other group; see
    /// [`InventoryStore::add_host_to_group`] for the moving variant.
    pub fn add_host(&mut self, host: &str, params: &HostParams) {
        let entry = self.hostvars.entry(host.to_string()).or_default();
        merge_vars(entry, &params.vars);

        match params.group.as_deref() {
            Some(group_name) => {
                if let Some(group) = self.ensure_group(group_name) {
                    merge_vars(&mut group.vars, &params.group_vars);
                    group.add_host(host);
                    debug!("Added host '{host}' to group '{group_name}'");
                }
            }
            None => {
                if let Some(ungrouped) = self.ensure_group(UNGROUPED) {
                    ungrouped.add_host(host);
                    debug!("Added host '{host}' to '{UNGROUPED}'");
                }
            }
        }
    }

    /// Adds every host in `hosts`, in order. The group is ensured up
    /// front so group variables land even for an empty host list.
    pub fn add_hosts(&mut self, hosts: &[String], params: &HostParams) {
        if let Some(group) = params.group.as_deref() {
            self.add_group(group, Some(&params.group_vars));
        }

        for host in hosts {
            self.add_host(host, params);
        }
    }

    /// Same as [`InventoryStore::add_host`], but when a named group is
    /// supplied the host is also removed from `ungrouped`, repairing a
    /// previously ungrouped host. This is the authoritative "move host
    /// into group" operation.
    pub fn add_host_to_group(&mut self, host: &str, params: &HostParams) {
        self.add_host(host, params);

        let moved_to_named_group = params
            .group
            .as_deref()
            .is_some_and(|group| group != UNGROUPED);

        if moved_to_named_group {
            if let Some(ungrouped) = self.groups.get_mut(UNGROUPED) {
                ungrouped.hosts.retain(|h| h != host);
            }
        }
    }

    /// Ensures both groups exist, merges `group_vars` into the child,
    /// then links the child under the parent. Cycles are not detected;
    /// a self-link is skipped with a warning.
    pub fn add_child_group(&mut self, parent: &str, child: &str, group_vars: Option<&Variables>) {
        if parent == child {
            warn!("Can't add group '{child}' as a child of itself");
            return;
        }

        let Some(child_group) = self.ensure_group(child) else {
            return;
        };
        if let Some(vars) = group_vars {
            merge_vars(&mut child_group.vars, vars);
        }

        if let Some(parent_group) = self.ensure_group(parent) {
            parent_group.add_child(child);
            debug!("Added child group '{child}' to '{parent}'");
        }
    }

    /// Ensures the group exists and merges `group_vars` into its
    /// variables, last write wins per key.
    pub fn add_group_vars(&mut self, group: &str, group_vars: &Variables) {
        self.add_group(group, Some(group_vars));
    }

    /// Deletes the group record, dropping the name from `all.children`
    /// and from every other group's children list. Member hosts keep
    /// their hostvars entry but are not reassigned to `ungrouped`.
    pub fn remove_group(&mut self, name: &str) {
        if self.groups.shift_remove(name).is_none() {
            debug!("Group '{name}' not present, nothing to remove");
            return;
        }

        for group in self.groups.values_mut() {
            group.children.retain(|c| c != name);
        }

        debug!("Removed group '{name}'");
    }

    /// Deletes the host's hostvars entry and drops the name from every
    /// group's hosts list, `ungrouped` included.
    pub fn remove_host(&mut self, name: &str) {
        if self.hostvars.shift_remove(name).is_none() {
            debug!("Host '{name}' not present, nothing to remove");
        }

        for group in self.groups.values_mut() {
            group.hosts.retain(|h| h != name);
        }
    }

    /// The full host-variable mapping.
    pub fn get_hosts(&self) -> &IndexMap<String, Variables> {
        &self.hostvars
    }

    /// All group records. `_meta` and the synthetic `all` container are
    /// not group records and never appear here.
    pub fn get_groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    /// The group's children, or an empty list when the group is unknown.
    /// For `all` this enumerates every known group name.
    pub fn get_child_groups(&self, group: &str) -> Vec<String> {
        if group == ALL {
            return self.groups.keys().cloned().collect();
        }

        self.groups
            .get(group)
            .map(|g| g.children.clone())
            .unwrap_or_default()
    }

    /// The group's member host names, or an empty list when unknown.
    pub fn get_hosts_in_group(&self, group: &str) -> Vec<String> {
        self.groups
            .get(group)
            .map(|g| g.hosts.clone())
            .unwrap_or_default()
    }

    /// The host's variables, or `None` when the host is unknown.
    pub fn get_host(&self, host: &str) -> Option<&Variables> {
        self.hostvars.get(host)
    }

    /// The group's variables, or `None` when the group is unknown.
    pub fn get_group(&self, group: &str) -> Option<&Variables> {
        self.groups.get(group).map(|g| &g.vars)
    }

    pub(crate) fn to_doc(&self) -> InventoryDoc {
        InventoryDoc {
            meta: Meta {
                hostvars: self.hostvars.clone(),
            },
            all: AllGroup {
                children: self.groups.keys().cloned().collect(),
            },
            groups: self.groups.clone(),
        }
    }

    pub(crate) fn from_doc(doc: InventoryDoc) -> Self {
        let mut groups = doc.groups;

        if !groups.contains_key(UNGROUPED) {
            groups.insert(UNGROUPED.to_string(), Group::default());
        }

        // Names listed under all.children without a record get an empty
        // one, so every referenced group has hosts/vars/children present.
        // Reserved names never become records.
        for name in doc.all.children {
            if name != ALL && name != META {
                groups.entry(name).or_default();
            }
        }

        InventoryStore {
            hostvars: doc.meta.hostvars,
            groups,
        }
    }
}
