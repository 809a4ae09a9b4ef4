use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity of the caller performing an operation.
///
/// Passed explicitly into the service layer so partner scoping and
/// admin-only operations are enforced by the core rather than the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "role", content = "partnerId")]
pub enum Actor {
    Admin,
    Partner(String),
    Public,
}

impl Actor {
    /// The partner id this actor may see, or None for unrestricted access.
    /// Fails closed for public callers, who have no lead visibility at all.
    pub(crate) fn lead_scope(&self) -> Result<Option<&str>> {
        match self {
            Actor::Admin => Ok(None),
            Actor::Partner(id) => Ok(Some(id)),
            Actor::Public => Err(Error::Forbidden("leads are staff-only".into())),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_scope_is_unrestricted() {
        assert_eq!(Actor::Admin.lead_scope().unwrap(), None);
    }

    #[test]
    fn partner_scope_is_their_own_id() {
        let actor = Actor::Partner("p1".into());
        assert_eq!(actor.lead_scope().unwrap(), Some("p1"));
    }

    #[test]
    fn public_scope_is_forbidden() {
        assert!(matches!(
            Actor::Public.lead_scope(),
            Err(Error::Forbidden(_))
        ));
    }
}
