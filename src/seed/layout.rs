//! Warehouse layout: zones → columns → shelves → bins.
//!
//! Names are positional and depend on nothing but the position:
//! `Zone-A`, `A-1`, `A-1-3`, `A-1-3-B`. Solid columns skip the A/B bin
//! split, so their shelves are the bins.

use super::kind::ResourceKind;
use super::plan::{ResourceSpec, SeedPlan};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Side of a split shelf used for FIFO rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinSide {
    /// Incoming, newest stock
    A,
    /// Outgoing, oldest stock
    B,
}

impl BinSide {
    pub const BOTH: [BinSide; 2] = [BinSide::A, BinSide::B];

    pub fn suffix(self) -> &'static str {
        match self {
            BinSide::A => "A",
            BinSide::B => "B",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BinSide::A => "IN - New Stock (FIFO: Use Last)",
            BinSide::B => "OUT - Old Stock (FIFO: Use First)",
        }
    }
}

pub fn zone_name(zone: &str) -> String {
    format!("Zone-{}", zone)
}

pub fn column_name(zone: &str, column: u32) -> String {
    format!("{}-{}", zone, column)
}

pub fn shelf_name(zone: &str, column: u32, level: u32) -> String {
    format!("{}-{}", column_name(zone, column), level)
}

pub fn bin_name(zone: &str, column: u32, level: u32, side: BinSide) -> String {
    format!("{}-{}", shelf_name(zone, column, level), side.suffix())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub letter: String,
    #[serde(default)]
    pub description: String,
}

impl ZoneSpec {
    pub fn new(letter: &str, description: &str) -> Self {
        Self {
            letter: letter.to_string(),
            description: description.to_string(),
        }
    }
}

/// Shape of the warehouse location tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseLayout {
    pub root_name: String,
    pub root_description: String,
    pub zones: Vec<ZoneSpec>,
    pub columns_per_zone: u32,
    /// Levels per column, 1 at the bottom
    pub levels: u32,
    /// Column names (`B-4`) exempt from the A/B bin split
    pub solid_columns: Vec<String>,
    pub solid_column_description: String,
}

impl Default for WarehouseLayout {
    fn default() -> Self {
        Self {
            root_name: "Warehouse".to_string(),
            root_description: "Main warehouse - Lean Inventory System".to_string(),
            zones: vec![
                ZoneSpec::new("A", "Standard Components"),
                ZoneSpec::new("B", "Standard + Power Supplies"),
            ],
            columns_per_zone: 4,
            levels: 7,
            solid_columns: vec!["B-4".to_string()],
            solid_column_description: "Power Supplies (Solid)".to_string(),
        }
    }
}

impl WarehouseLayout {
    /// Reject layouts that cannot produce a sensible tree
    pub fn validate(&self) -> Result<()> {
        if self.zones.is_empty() {
            bail!("warehouse layout needs at least one zone");
        }
        if self.columns_per_zone == 0 {
            bail!("warehouse layout needs at least one column per zone");
        }
        if self.levels == 0 {
            bail!("warehouse layout needs at least one level");
        }
        let mut seen = HashSet::new();
        for zone in &self.zones {
            if zone.letter.trim().is_empty() {
                bail!("zone letter must not be empty");
            }
            if !seen.insert(zone.letter.as_str()) {
                bail!("zone '{}' listed twice", zone.letter);
            }
        }
        for solid in &self.solid_columns {
            if !self.column_names().any(|c| &c == solid) {
                tracing::warn!("Solid column '{}' is not part of the layout", solid);
            }
        }
        Ok(())
    }

    pub fn is_solid(&self, column: &str) -> bool {
        self.solid_columns.iter().any(|c| c == column)
    }

    /// Every column name, zone by zone
    pub fn column_names(&self) -> impl Iterator<Item = String> + '_ {
        self.zones.iter().flat_map(move |zone| {
            (1..=self.columns_per_zone).map(move |col| column_name(&zone.letter, col))
        })
    }

    pub fn summary(&self) -> LayoutSummary {
        let columns = self.zones.len() * self.columns_per_zone as usize;
        let solid = self.column_names().filter(|c| self.is_solid(c)).count();
        let levels = self.levels as usize;
        LayoutSummary {
            zones: self.zones.len(),
            columns,
            shelves: columns * levels,
            split_bins: (columns - solid) * levels * 2,
            solid_bins: solid * levels,
        }
    }

    /// Locations in creation order, parents first
    pub fn plan(&self) -> SeedPlan {
        let mut plan = SeedPlan::new();
        let root = plan.add_root(location(&self.root_name, &self.root_description));

        for zone in &self.zones {
            let z = &zone.letter;
            let zone_desc = if zone.description.is_empty() {
                format!("Zone {}", z)
            } else {
                format!("Zone {} - {}", z, zone.description)
            };
            let zone_idx = plan.add_child(root, location(&zone_name(z), &zone_desc));

            for col in 1..=self.columns_per_zone {
                let name = column_name(z, col);
                let solid = self.is_solid(&name);
                let col_desc = if solid {
                    self.solid_column_description.clone()
                } else {
                    format!("Column {} in Zone {}", col, z)
                };
                let col_idx = plan.add_child(zone_idx, location(&name, &col_desc));

                for level in 1..=self.levels {
                    let shelf_desc = format!("Level {} (1=Bottom, {}=Top)", level, self.levels);
                    let shelf_idx =
                        plan.add_child(col_idx, location(&shelf_name(z, col, level), &shelf_desc));

                    if solid {
                        continue;
                    }
                    for side in BinSide::BOTH {
                        plan.add_child(
                            shelf_idx,
                            location(&bin_name(z, col, level, side), side.description()),
                        );
                    }
                }
            }
        }

        plan
    }
}

fn location(name: &str, description: &str) -> ResourceSpec {
    ResourceSpec::new(ResourceKind::Location, name, description)
}

/// Counts of each tier of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSummary {
    pub zones: usize,
    pub columns: usize,
    pub shelves: usize,
    pub split_bins: usize,
    /// Shelves of solid columns, which double as bins
    pub solid_bins: usize,
}

impl LayoutSummary {
    pub fn total_bins(&self) -> usize {
        self.split_bins + self.solid_bins
    }

    /// Every location the plan creates, root included
    pub fn total_locations(&self) -> usize {
        1 + self.zones + self.columns + self.shelves + self.split_bins
    }
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Zones:      {}", self.zones)?;
        writeln!(f, "Columns:    {}", self.columns)?;
        writeln!(f, "Shelves:    {}", self.shelves)?;
        writeln!(f, "Total bins: {}", self.total_bins())?;
        writeln!(f, "  split (A/B): {}", self.split_bins)?;
        write!(f, "  solid:       {}", self.solid_bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_counts() {
        let summary = WarehouseLayout::default().summary();
        assert_eq!(summary.zones, 2);
        assert_eq!(summary.columns, 8);
        assert_eq!(summary.shelves, 56);
        assert_eq!(summary.split_bins, 98);
        assert_eq!(summary.solid_bins, 7);
        assert_eq!(summary.total_bins(), 105);
    }

    #[test]
    fn plan_matches_summary() {
        let layout = WarehouseLayout::default();
        let plan = layout.plan();
        assert_eq!(plan.len(), layout.summary().total_locations());
        assert_eq!(plan.len(), 1 + 2 + 8 + 56 + 98);
    }

    #[test]
    fn plan_order_and_names() {
        let plan = WarehouseLayout::default().plan();
        let names: Vec<&str> = plan.nodes().iter().take(6).map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Warehouse", "Zone-A", "A-1", "A-1-1", "A-1-1-A", "A-1-1-B"]);
        assert_eq!(plan.nodes()[4].description, "IN - New Stock (FIFO: Use Last)");
    }

    #[test]
    fn solid_column_has_no_bins() {
        let plan = WarehouseLayout::default().plan();
        assert!(plan.nodes().iter().any(|n| n.name == "B-4-7"));
        assert!(!plan.nodes().iter().any(|n| n.name.starts_with("B-4-1-")));

        let b4 = plan.nodes().iter().find(|n| n.name == "B-4").unwrap();
        assert_eq!(b4.description, "Power Supplies (Solid)");
    }

    #[test]
    fn shelf_paths_thread_parents() {
        let plan = WarehouseLayout::default().plan();
        let idx = plan.nodes().iter().position(|n| n.name == "A-2-3-B").unwrap();
        assert_eq!(plan.path_of(idx), "Warehouse/Zone-A/A-2/A-2-3/A-2-3-B");
    }

    #[test]
    fn validate_rejects_degenerate_layouts() {
        let mut layout = WarehouseLayout::default();
        layout.levels = 0;
        assert!(layout.validate().is_err());

        let mut layout = WarehouseLayout::default();
        layout.zones.push(ZoneSpec::new("A", "again"));
        assert!(layout.validate().is_err());

        let mut layout = WarehouseLayout::default();
        layout.solid_columns = vec!["Z-9".to_string()];
        assert!(layout.validate().is_ok());
        assert_eq!(layout.summary().solid_bins, 0);
    }
}
