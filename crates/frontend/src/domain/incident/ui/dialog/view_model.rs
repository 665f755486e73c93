use contracts::domain::incident::{Incident, IncidentDraft, IncidentPatch, IncidentStatus};
use contracts::shared::validation::{validate_description, validate_title};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::domain::incident::{api, store::IncidentStore};
use crate::shared::toast::ToastService;

/// Submission lifecycle of one dialog invocation.
///
/// `Idle → Submitting → {Success, Failed}`; a failed dialog goes back to
/// `Submitting` on retry, a closed dialog is simply dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Editable form fields. Status is only honored on update; creates always
/// start as `Open` on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentForm {
    pub title: String,
    pub description: String,
    pub status: IncidentStatus,
}

impl Default for IncidentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: IncidentStatus::Open,
        }
    }
}

impl IncidentForm {
    pub fn from_incident(incident: &Incident) -> Self {
        Self {
            title: incident.title.clone(),
            description: incident.description.clone(),
            status: incident.status,
        }
    }

    /// First violated bound, if any. Checked before every submit so an
    /// invalid form never reaches the network.
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        Ok(())
    }
}

/// Controller behind the incident dialog: owns the form state and drives
/// validation → CSRF-gated mutation → store refresh → notification, in that
/// order, each step waiting for the previous one.
#[derive(Clone)]
pub struct IncidentDialogViewModel {
    /// Incident being edited; `None` means the dialog creates a new one.
    pub target: Option<Incident>,
    pub form: RwSignal<IncidentForm>,
    pub state: RwSignal<DialogState>,
}

impl IncidentDialogViewModel {
    pub fn new(target: Option<Incident>) -> Self {
        let form = target
            .as_ref()
            .map(IncidentForm::from_incident)
            .unwrap_or_default();
        Self {
            target,
            form: RwSignal::new(form),
            state: RwSignal::new(DialogState::Idle),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    /// True while a mutation is in flight. Used as the modal close guard and
    /// to disable the form controls (reactive when read under tracking).
    pub fn is_busy(&self) -> bool {
        self.state.get() == DialogState::Submitting
    }

    /// Create or update, depending on `target`.
    pub fn submit(&self, store: IncidentStore, toasts: ToastService, on_done: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(message) = current.validate() {
            // Short-circuit: no state change, no network call.
            toasts.error(message);
            return;
        }
        if self.is_busy() {
            return;
        }
        self.state.set(DialogState::Submitting);

        let vm = self.clone();
        spawn_local(async move {
            let result = match &vm.target {
                Some(incident) => {
                    let patch = IncidentPatch {
                        title: current.title.clone(),
                        description: current.description.clone(),
                        status: current.status,
                    };
                    api::update_incident(&incident.id, &patch).await
                }
                None => {
                    let draft = IncidentDraft {
                        title: current.title.clone(),
                        description: current.description.clone(),
                    };
                    api::create_incident(&draft).await
                }
            };

            match result {
                Some(confirmation) => {
                    store.refresh().await;
                    vm.state.set(DialogState::Success);
                    if vm.target.is_none() {
                        // Create dialogs clear for the next report; edit
                        // dialogs keep their values until reopened.
                        vm.form.set(IncidentForm::default());
                    }
                    toasts.success(confirmation.message);
                    on_done.run(());
                }
                None => {
                    // Fields stay intact so the user can retry.
                    vm.state.set(DialogState::Failed);
                    toasts.error(if vm.is_edit() {
                        "Something went wrong while updating your incident report"
                    } else {
                        "Something went wrong while creating your incident report"
                    });
                }
            }
        });
    }

    /// Delete the target incident. The caller renders the control only for
    /// actors whose capabilities allow it.
    pub fn delete(&self, store: IncidentStore, toasts: ToastService, on_done: Callback<()>) {
        let Some(incident) = self.target.clone() else {
            return;
        };
        if self.is_busy() {
            return;
        }
        self.state.set(DialogState::Submitting);

        let vm = self.clone();
        spawn_local(async move {
            match api::delete_incident(&incident.id).await {
                Some(confirmation) => {
                    store.refresh().await;
                    vm.state.set(DialogState::Success);
                    toasts.success(confirmation.message);
                    on_done.run(());
                }
                None => {
                    vm.state.set(DialogState::Failed);
                    toasts.error("Something went wrong while deleting your incident report");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_rejected_with_the_exact_bound_message() {
        let form = IncidentForm {
            title: "ok".into(),
            description: "A perfectly valid description".into(),
            status: IncidentStatus::Open,
        };
        assert_eq!(
            form.validate().unwrap_err(),
            "Title must be between 3 and 50 characters long"
        );
    }

    #[test]
    fn long_descriptions_are_rejected_with_the_exact_bound_message() {
        let form = IncidentForm {
            title: "Valid title".into(),
            description: "x".repeat(501),
            status: IncidentStatus::Open,
        };
        assert_eq!(
            form.validate().unwrap_err(),
            "Description must be between 3 and 500 characters long"
        );
    }

    #[test]
    fn title_bound_is_reported_before_the_description_bound() {
        let form = IncidentForm {
            title: "no".into(),
            description: "x".into(),
            status: IncidentStatus::Open,
        };
        assert!(form.validate().unwrap_err().starts_with("Title"));
    }

    #[test]
    fn edit_forms_seed_from_the_incident() {
        let incident = Incident {
            id: "inc-1".into(),
            title: "Broken login".into(),
            description: "Login button does nothing on mobile".into(),
            status: IncidentStatus::InProgress,
            created_by: "alice".into(),
            updated_by: "alice".into(),
            created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
            updated_at: "2024-03-01T09:30:00Z".parse().unwrap(),
        };
        let form = IncidentForm::from_incident(&incident);
        assert_eq!(form.title, "Broken login");
        assert_eq!(form.status, IncidentStatus::InProgress);
    }
}
