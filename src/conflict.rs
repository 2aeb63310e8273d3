//! Cross-system conflict detection

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::binding::{BindingRecord, SourceKind};

/// What counts as an independent configuration system
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SystemScope {
    /// One system per parser family (yaml, karabiner, ideavim)
    #[default]
    Family,
    /// One system per originating file, ignoring line numbers
    File,
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum SystemId<'a> {
    Family(SourceKind),
    File(&'a Path),
}

impl SystemScope {
    fn system_of(self, record: &BindingRecord) -> SystemId<'_> {
        match self {
            SystemScope::Family => SystemId::Family(record.source.kind),
            SystemScope::File => SystemId::File(&record.source.path),
        }
    }
}

/// Combos claimed by more than one system, in discovery order
#[derive(Debug, Default)]
pub struct ConflictReport {
    pub conflicts: IndexMap<String, Vec<BindingRecord>>,
    /// Number of records examined, conflicting or not
    pub total_bindings: usize,
}

impl ConflictReport {
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Group records by combo and keep the groups that span two or more systems.
///
/// Records inside a group keep their input order.
pub fn detect_conflicts(records: &[BindingRecord], scope: SystemScope) -> ConflictReport {
    info!(bindings = records.len(), ?scope, "Starting conflict detection");

    let mut groups: IndexMap<&str, Vec<&BindingRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.combo.as_str()).or_default().push(record);
    }

    let conflicts: IndexMap<String, Vec<BindingRecord>> = groups
        .into_iter()
        .filter(|(_, group)| group.len() > 1 && spans_systems(group, scope))
        .map(|(combo, group)| {
            (
                combo.to_string(),
                group.into_iter().cloned().collect::<Vec<_>>(),
            )
        })
        .collect();

    if conflicts.is_empty() {
        info!("No conflicts in {} total bindings", records.len());
    } else {
        info!(
            "Found {} conflicts out of {} total bindings",
            conflicts.len(),
            records.len()
        );
    }

    ConflictReport {
        conflicts,
        total_bindings: records.len(),
    }
}

fn spans_systems(group: &[&BindingRecord], scope: SystemScope) -> bool {
    let systems: HashSet<SystemId<'_>> = group.iter().map(|r| scope.system_of(r)).collect();
    systems.len() >= 2
}
