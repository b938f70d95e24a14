// src/services/authorization.rs
//
// Regras de autorização como funções puras: testáveis sem contexto HTTP.

use crate::models::{auth::ROLE_ADMIN, location::Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

impl Decision {
    pub fn is_permit(self) -> bool {
        self == Decision::Permit
    }
}

pub fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r.eq_ignore_ascii_case(role))
}

/// Quem pode alterar ou remover um local: o gerente dele ou um Admin.
/// Um identificador ausente ou não numérico sempre nega.
pub fn can_modify_location(
    caller_id: Option<&str>,
    caller_roles: &[String],
    location: &Location,
) -> Decision {
    let Some(user_id) = caller_id.and_then(|raw| raw.trim().parse::<i32>().ok()) else {
        return Decision::Deny;
    };

    if location.manager_id == Some(user_id) || has_role(caller_roles, ROLE_ADMIN) {
        Decision::Permit
    } else {
        Decision::Deny
    }
}
