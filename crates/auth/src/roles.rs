use core::str::FromStr;

use serde::{Deserialize, Serialize};

use safecity_core::ValidationError;

/// Portal role used for view filtering.
///
/// The set is closed: parsing any other string fails, so a `Role` value in
/// hand is always one of these three.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
    Police,
    Admin,
}

impl Role {
    /// All roles, in the order the registration form offers them.
    pub const ALL: [Role; 3] = [Role::Citizen, Role::Police, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Police => "police",
            Role::Admin => "admin",
        }
    }

    /// Human-readable name shown on the role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Citizen => "Citizen",
            Role::Police => "Police Officer",
            Role::Admin => "Administrator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Citizen => "Report incidents and view community safety data",
            Role::Police => "Manage reports and community safety operations",
            Role::Admin => "Full system access and user management",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the wire value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "police" => Ok(Role::Police),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::unknown_role(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn rejects_unknown_and_miscased_values() {
        for raw in ["superuser", "Admin", " citizen", ""] {
            let err = raw.parse::<Role>().unwrap_err();
            assert_eq!(err, ValidationError::UnknownRole(raw.to_string()));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Police).unwrap(), "\"police\"");
        assert_eq!(serde_json::from_str::<Role>("\"admin\"").unwrap(), Role::Admin);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }
}
