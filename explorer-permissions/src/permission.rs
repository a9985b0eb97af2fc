//! Well-known datasource permission tokens.
//!
//! `create:datasources` is granted on the workspace that owns the
//! application. `manage:datasources` is granted on an individual datasource
//! record.

use explorer_types::PermissionToken;

/// A permission the explorer checks, identified by its wire token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CreateDatasources,
    ManageDatasources,
}

impl Permission {
    /// Returns the token string the data layer uses for this permission.
    pub fn token_str(&self) -> &'static str {
        match self {
            Self::CreateDatasources => "create:datasources",
            Self::ManageDatasources => "manage:datasources",
        }
    }

    pub fn token(&self) -> PermissionToken {
        PermissionToken::new(self.token_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_strings() {
        assert_eq!(Permission::CreateDatasources.token_str(), "create:datasources");
        assert_eq!(Permission::ManageDatasources.token().as_str(), "manage:datasources");
    }
}
