use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use serde::{Serialize, Deserialize};


#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Delegate,
    Chair,
    Executive,
    Developer,
    Admin,
    Other(String),
}

impl Role {
    /// Absent and blank roles count as `delegate`.
    pub fn parse(raw: Option<&str>) -> Role {
        let normalized = raw.unwrap_or("").trim().to_lowercase();
        match normalized.as_str() {
            "" | "delegate" => Role::Delegate,
            "chair" => Role::Chair,
            "executive" => Role::Executive,
            "developer" => Role::Developer,
            "admin" => Role::Admin,
            _ => Role::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Delegate => "delegate",
            Role::Chair => "chair",
            Role::Executive => "executive",
            Role::Developer => "developer",
            Role::Admin => "admin",
            Role::Other(s) => s.as_str(),
        }
    }

    /// `executive` becomes `Executive`.
    pub fn display_name(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new()
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Delegate
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(Some(&value))
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewAdminArea,
    DeleteUser,
    ModerateSession,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::ViewAdminArea, Capability::DeleteUser, Capability::ModerateSession];
}

/// Allow-lists of roles per capability.
///
/// Each capability is configured independently. A capability that is
/// missing from the table is granted to nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<Capability, Vec<Role>>", into = "HashMap<Capability, Vec<Role>>")]
pub struct CapabilityTable {
    allow_lists: HashMap<Capability, HashSet<Role>>,
}

impl CapabilityTable {
    pub fn empty() -> Self {
        CapabilityTable { allow_lists: HashMap::new() }
    }

    pub fn with_allow_list<I>(mut self, capability: Capability, roles: I) -> Self where I: IntoIterator<Item = Role> {
        self.allow_lists.insert(capability, roles.into_iter().collect());
        self
    }

    pub fn allows(&self, role: &Role, capability: Capability) -> bool {
        self.allow_lists.get(&capability).map(|roles| roles.contains(role)).unwrap_or(false)
    }

    pub fn capabilities_of(&self, role: &Role) -> Vec<Capability> {
        Capability::ALL.into_iter().filter(|c| self.allows(role, *c)).collect()
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        CapabilityTable::empty()
            .with_allow_list(Capability::ViewAdminArea, [Role::Executive, Role::Developer])
            .with_allow_list(Capability::DeleteUser, [Role::Executive, Role::Developer, Role::Admin])
            .with_allow_list(Capability::ModerateSession, [Role::Chair, Role::Executive, Role::Developer])
    }
}

impl From<HashMap<Capability, Vec<Role>>> for CapabilityTable {
    fn from(value: HashMap<Capability, Vec<Role>>) -> Self {
        CapabilityTable {
            allow_lists: value.into_iter().map(|(c, roles)| (c, roles.into_iter().collect())).collect()
        }
    }
}

impl From<CapabilityTable> for HashMap<Capability, Vec<Role>> {
    fn from(value: CapabilityTable) -> Self {
        value.allow_lists.into_iter().map(|(c, roles)| (c, roles.into_iter().collect())).collect()
    }
}

/// Default-deny check of a raw role label against one capability.
pub fn is_elevated_role(raw: Option<&str>, capability: Capability, table: &CapabilityTable) -> bool {
    table.allows(&Role::parse(raw), capability)
}
