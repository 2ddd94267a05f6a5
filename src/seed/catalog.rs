//! Compiled-in demo data for a computer assembly business.

use super::kind::ResourceKind;
use super::plan::{ResourceSpec, SeedPlan};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub struct CategoryDef {
    pub name: &'static str,
    pub description: &'static str,
}

pub struct PartDef {
    pub name: &'static str,
    pub description: &'static str,
    pub minimum_stock: u32,
}

pub const DEFAULT_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "GPU",
        description: "Graphics Processing Units - NVIDIA, AMD, Intel Arc",
    },
    CategoryDef {
        name: "CPU",
        description: "Central Processing Units - Intel, AMD",
    },
    CategoryDef {
        name: "PSU",
        description: "Power Supply Units - Modular, Semi-Modular, Non-Modular",
    },
    CategoryDef {
        name: "Motherboard",
        description: "Motherboards - ATX, Micro-ATX, Mini-ITX",
    },
    CategoryDef {
        name: "SSD",
        description: "Solid State Drives - NVMe, SATA, M.2",
    },
    CategoryDef {
        name: "RAM",
        description: "Random Access Memory - DDR4, DDR5",
    },
];

const fn part(name: &'static str, description: &'static str, minimum_stock: u32) -> PartDef {
    PartDef {
        name,
        description,
        minimum_stock,
    }
}

/// Example parts grouped by category name, in seeding order
pub const EXAMPLE_PARTS: &[(&str, &[PartDef])] = &[
    (
        "GPU",
        &[
            part("NVIDIA GeForce RTX 4090", "24GB GDDR6X, 450W TDP", 2),
            part("NVIDIA GeForce RTX 4080 Super", "16GB GDDR6X, 320W TDP", 3),
            part("NVIDIA GeForce RTX 4070 Ti", "12GB GDDR6X, 285W TDP", 5),
            part("AMD Radeon RX 7900 XTX", "24GB GDDR6, 355W TDP", 2),
            part("AMD Radeon RX 7800 XT", "16GB GDDR6, 263W TDP", 4),
        ],
    ),
    (
        "CPU",
        &[
            part("Intel Core i9-14900K", "24 Cores, 6.0GHz Boost, LGA1700", 3),
            part("Intel Core i7-14700K", "20 Cores, 5.6GHz Boost, LGA1700", 5),
            part("Intel Core i5-14600K", "14 Cores, 5.3GHz Boost, LGA1700", 8),
            part("AMD Ryzen 9 7950X", "16 Cores, 5.7GHz Boost, AM5", 3),
            part(
                "AMD Ryzen 7 7800X3D",
                "8 Cores, 5.0GHz Boost, AM5, 3D V-Cache",
                5,
            ),
            part("AMD Ryzen 5 7600X", "6 Cores, 5.3GHz Boost, AM5", 10),
        ],
    ),
    (
        "RAM",
        &[
            part(
                "Corsair Vengeance DDR5 32GB (2x16GB)",
                "6000MHz CL36, Black",
                10,
            ),
            part(
                "G.Skill Trident Z5 RGB DDR5 64GB (2x32GB)",
                "6400MHz CL32",
                5,
            ),
            part("Kingston Fury Beast DDR5 16GB (2x8GB)", "5200MHz CL40", 15),
            part(
                "Corsair Dominator Platinum DDR5 32GB (2x16GB)",
                "7200MHz CL34, RGB",
                3,
            ),
        ],
    ),
    (
        "SSD",
        &[
            part("Samsung 990 Pro 2TB", "NVMe Gen4, 7450MB/s Read", 10),
            part("Samsung 990 Pro 1TB", "NVMe Gen4, 7450MB/s Read", 15),
            part("WD Black SN850X 2TB", "NVMe Gen4, 7300MB/s Read", 8),
            part("Crucial T700 2TB", "NVMe Gen5, 12400MB/s Read", 3),
            part("SK Hynix Platinum P41 1TB", "NVMe Gen4, 7000MB/s Read", 12),
        ],
    ),
    (
        "PSU",
        &[
            part(
                "Corsair RM1000x 1000W",
                "80+ Gold, Fully Modular, ATX 3.0",
                5,
            ),
            part("Corsair RM850x 850W", "80+ Gold, Fully Modular", 10),
            part(
                "Seasonic Prime TX-1000 1000W",
                "80+ Titanium, Fully Modular",
                3,
            ),
            part(
                "be quiet! Dark Power Pro 12 1200W",
                "80+ Titanium, Fully Modular",
                2,
            ),
            part("EVGA SuperNOVA 750 G7 750W", "80+ Gold, Fully Modular", 8),
        ],
    ),
    (
        "Motherboard",
        &[
            part("ASUS ROG Maximus Z790 Hero", "Intel LGA1700, DDR5, ATX", 3),
            part("MSI MPG Z790 Carbon WiFi", "Intel LGA1700, DDR5, ATX", 5),
            part("Gigabyte Z790 AORUS Master", "Intel LGA1700, DDR5, ATX", 4),
            part("ASUS ROG Crosshair X670E Hero", "AMD AM5, DDR5, ATX", 3),
            part("MSI MEG X670E ACE", "AMD AM5, DDR5, E-ATX", 2),
            part("ASRock B650E Steel Legend", "AMD AM5, DDR5, ATX, Budget", 8),
        ],
    ),
];

/// Description used when a category has to be created on the fly
pub fn category_description(name: &str) -> String {
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.description.to_string())
        .unwrap_or_else(|| format!("Computer {} components", name))
}

pub fn category_plan() -> SeedPlan {
    let mut plan = SeedPlan::new();
    for cat in DEFAULT_CATEGORIES {
        plan.add_root(ResourceSpec::new(ResourceKind::Category, cat.name, cat.description));
    }
    plan
}

/// Categories with their example parts underneath
pub fn parts_plan() -> SeedPlan {
    let mut plan = SeedPlan::new();
    for (category, parts) in EXAMPLE_PARTS {
        let cat = plan.add_root(ResourceSpec::new(
            ResourceKind::Category,
            *category,
            category_description(category),
        ));
        for p in parts.iter() {
            let spec = ResourceSpec::new(ResourceKind::Part, p.name, p.description)
                .with_attr("active", json!(true))
                .with_attr("component", json!(true))
                .with_attr("purchaseable", json!(true))
                .with_attr("minimum_stock", json!(p.minimum_stock));
            plan.add_child(cat, spec);
        }
    }
    plan
}

/// User that should exist for a tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// One customer partition: a group, a root location and its users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSpec {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub users: Vec<TenantUser>,
}

impl TenantSpec {
    pub fn group_name(&self) -> String {
        format!("tenant_{}", self.name)
    }

    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| title_case(&self.name))
    }

    pub fn root_location_name(&self) -> String {
        format!("{} Warehouse", self.display_name())
    }
}

pub fn default_tenants() -> Vec<TenantSpec> {
    vec![TenantSpec {
        name: "demo".to_string(),
        display_name: Some("Demo Tenant".to_string()),
        description: "Default demo tenant for testing".to_string(),
        users: vec![TenantUser {
            username: "demo_user".to_string(),
            email: "demo@inventory.local".to_string(),
        }],
    }]
}

/// Capitalize the first letter of each word, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start = false;
        } else {
            out.push(c);
            start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_plan_shape() {
        let plan = parts_plan();
        assert_eq!(plan.count_of(ResourceKind::Category), 6);
        assert_eq!(plan.count_of(ResourceKind::Part), 31);

        let rtx = &plan.nodes()[1];
        assert_eq!(rtx.name, "NVIDIA GeForce RTX 4090");
        assert_eq!(rtx.parent, Some(0));
        assert_eq!(rtx.extra["minimum_stock"], json!(2));
        assert_eq!(rtx.extra["purchaseable"], json!(true));
    }

    #[test]
    fn unknown_category_gets_generic_description() {
        assert_eq!(category_description("Fans"), "Computer Fans components");
        assert_eq!(category_description("RAM"), "Random Access Memory - DDR4, DDR5");
    }

    #[test]
    fn tenant_names() {
        let tenant = TenantSpec {
            name: "acme corp".to_string(),
            display_name: None,
            description: String::new(),
            users: vec![],
        };
        assert_eq!(tenant.group_name(), "tenant_acme corp");
        assert_eq!(tenant.root_location_name(), "Acme Corp Warehouse");
        assert_eq!(default_tenants()[0].root_location_name(), "Demo Tenant Warehouse");
    }

    #[test]
    fn tenants_parse_from_json_ignoring_passwords() {
        let raw = r#"[{
            "name": "north",
            "users": [{"username": "n1", "password": "x", "email": "n1@x"}]
        }]"#;
        let tenants: Vec<TenantSpec> = serde_json::from_str(raw).unwrap();
        assert_eq!(tenants[0].users[0].username, "n1");
        assert_eq!(tenants[0].display_name(), "North");
    }
}
