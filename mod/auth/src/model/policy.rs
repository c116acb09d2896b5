use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Role;

/// A gated application area. The set is closed: only sections listed here can
/// appear in the policy table or be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Crm,
    Clientes,
    Leads,
    Proyectos,
    Comercial,
    Dashboard,
    Usuarios,
    Index,
    Config,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Crm => "crm",
            Section::Clientes => "clientes",
            Section::Leads => "leads",
            Section::Proyectos => "proyectos",
            Section::Comercial => "comercial",
            Section::Dashboard => "dashboard",
            Section::Usuarios => "usuarios",
            Section::Index => "index",
            Section::Config => "config",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crm" => Ok(Section::Crm),
            "clientes" => Ok(Section::Clientes),
            "leads" => Ok(Section::Leads),
            "proyectos" => Ok(Section::Proyectos),
            "comercial" => Ok(Section::Comercial),
            "dashboard" => Ok(Section::Dashboard),
            "usuarios" => Ok(Section::Usuarios),
            "index" => Ok(Section::Index),
            "config" => Ok(Section::Config),
            other => Err(format!("unknown section '{}'", other)),
        }
    }
}

/// The static role → permitted-sections table. Built at construction, never
/// persisted. A role without an entry has an empty permission set.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    grants: HashMap<Role, Vec<Section>>,
}

impl AccessPolicy {
    /// Build a policy from explicit (role, sections) rows.
    pub fn new(rows: Vec<(Role, Vec<Section>)>) -> Self {
        Self {
            grants: rows.into_iter().collect(),
        }
    }

    /// Sections permitted for a role; empty when the role has no entry.
    pub fn sections_for(&self, role: Role) -> &[Section] {
        self.grants.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Membership check against a role's permitted set.
    pub fn allows(&self, role: Role, section: Section) -> bool {
        self.sections_for(role).contains(&section)
    }
}

impl Default for AccessPolicy {
    /// The CRM's fixed table: admins see everything, usuarios get the working
    /// sections but not `dashboard`, `usuarios` or `index`.
    fn default() -> Self {
        use Section::*;
        Self::new(vec![
            (
                Role::Admin,
                vec![
                    Crm, Clientes, Leads, Proyectos, Comercial, Dashboard, Usuarios, Index,
                    Config,
                ],
            ),
            (
                Role::Usuario,
                vec![Crm, Clientes, Leads, Proyectos, Comercial, Config],
            ),
        ])
    }
}

/// The outcome of an authorization check, separated from the navigation and
/// alert side effects so it can be tested without a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session present and the section is permitted for its role.
    Allow,
    /// No session; the caller should be sent to the login page.
    DenyNoSession,
    /// Session present but the section is outside the role's permitted set;
    /// the caller should be warned and sent back to the main page.
    DenyForbidden,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_roundtrip() {
        for s in [
            Section::Crm,
            Section::Clientes,
            Section::Leads,
            Section::Proyectos,
            Section::Comercial,
            Section::Dashboard,
            Section::Usuarios,
            Section::Index,
            Section::Config,
        ] {
            assert_eq!(s.as_str().parse::<Section>().unwrap(), s);
        }
        assert!("facturas".parse::<Section>().is_err());
    }

    #[test]
    fn test_default_table() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.sections_for(Role::Admin).len(), 9);
        assert!(policy.allows(Role::Admin, Section::Usuarios));
        assert!(policy.allows(Role::Usuario, Section::Config));
        assert!(!policy.allows(Role::Usuario, Section::Usuarios));
        assert!(!policy.allows(Role::Usuario, Section::Dashboard));
        assert!(!policy.allows(Role::Usuario, Section::Index));
    }

    #[test]
    fn test_missing_role_is_empty_set() {
        let policy = AccessPolicy::new(vec![(Role::Admin, vec![Section::Crm])]);
        assert!(policy.sections_for(Role::Usuario).is_empty());
        assert!(!policy.allows(Role::Usuario, Section::Crm));
    }
}
