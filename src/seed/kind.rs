//! Resource kinds known to the seeder and their REST endpoints.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Category,
    Location,
    Part,
    Group,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Category,
        ResourceKind::Location,
        ResourceKind::Part,
        ResourceKind::Group,
    ];

    /// List/create endpoint, relative to the API base
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Category => "part/category/",
            ResourceKind::Location => "stock/location/",
            ResourceKind::Part => "part/",
            ResourceKind::Group => "user/group/",
        }
    }

    /// Payload/filter field that points at the parent resource
    pub fn parent_field(self) -> Option<&'static str> {
        match self {
            ResourceKind::Category | ResourceKind::Location => Some("parent"),
            ResourceKind::Part => Some("category"),
            ResourceKind::Group => None,
        }
    }

    pub fn has_description(self) -> bool {
        !matches!(self, ResourceKind::Group)
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Category => "category",
            ResourceKind::Location => "location",
            ResourceKind::Part => "part",
            ResourceKind::Group => "group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
