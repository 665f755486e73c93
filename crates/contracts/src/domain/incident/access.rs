use crate::domain::incident::aggregate::Incident;
use crate::system::auth::SessionUser;

/// What a given actor may do with a given incident.
///
/// Evaluated once per render and passed down to the controls, instead of
/// re-deriving the role ad hoc next to every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub const VIEW_ONLY: Capabilities = Capabilities {
        can_view: true,
        can_edit: false,
        can_delete: false,
    };

    pub const FULL: Capabilities = Capabilities {
        can_view: true,
        can_edit: true,
        can_delete: true,
    };
}

/// Authorization policy: administrators and the original author may edit
/// (including status) and delete; every authenticated user may view.
pub fn capabilities(actor: &SessionUser, incident: &Incident) -> Capabilities {
    if actor.is_admin() || actor.username == incident.created_by {
        Capabilities::FULL
    } else {
        Capabilities::VIEW_ONLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::incident::aggregate::IncidentStatus;

    fn incident_by(author: &str) -> Incident {
        Incident {
            id: "inc-1".into(),
            title: "Broken login".into(),
            description: "Login button does nothing on mobile".into(),
            status: IncidentStatus::Open,
            created_by: author.into(),
            updated_by: author.into(),
            created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
            updated_at: "2024-03-01T09:30:00Z".parse().unwrap(),
        }
    }

    fn user(name: &str) -> SessionUser {
        SessionUser {
            username: name.into(),
            email: None,
        }
    }

    #[test]
    fn author_has_full_access() {
        let caps = capabilities(&user("alice"), &incident_by("alice"));
        assert_eq!(caps, Capabilities::FULL);
    }

    #[test]
    fn admin_has_full_access_to_foreign_incidents() {
        let caps = capabilities(&user("admin"), &incident_by("alice"));
        assert_eq!(caps, Capabilities::FULL);
    }

    #[test]
    fn other_users_may_only_view() {
        let caps = capabilities(&user("bob"), &incident_by("alice"));
        assert_eq!(caps, Capabilities::VIEW_ONLY);
        assert!(caps.can_view);
    }
}
