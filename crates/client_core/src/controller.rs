//! Root of the directory screen: owns the collection, the form session and
//! the banner, and sequences every mutation as `mutate -> refresh`.

use shared::{
    domain::{EmployeeField, EmployeeId},
    error::GatewayError,
};
use tracing::{info, warn};

use crate::{
    banner::Banner,
    form::{FormError, FormSession},
    gateway::ApiGateway,
    store::{CollectionStore, LoadStatus},
    view::DirectoryView,
};

pub const SAVE_FAILURE_CONTEXT: &str = "Error saving employee";
pub const DELETE_FAILURE_CONTEXT: &str = "Error deleting employee";

/// Blocking yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Booting,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

pub struct DirectoryController<G: ApiGateway> {
    gateway: G,
    store: CollectionStore,
    form: FormSession,
    banner: Banner,
}

impl<G: ApiGateway> DirectoryController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: CollectionStore::new(),
            form: FormSession::new(),
            banner: Banner::default(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn form(&self) -> &FormSession {
        &self.form
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn phase(&self) -> ViewPhase {
        match self.store.status() {
            LoadStatus::Idle => ViewPhase::Booting,
            LoadStatus::Loading => ViewPhase::Loading,
            LoadStatus::Loaded => ViewPhase::Loaded,
            LoadStatus::Failed => ViewPhase::Failed,
        }
    }

    pub fn view(&self) -> DirectoryView {
        DirectoryView::build(&self.store, &self.form, &self.banner)
    }

    /// Shows the list as loading before the first `mount` is awaited.
    pub fn start_loading(&mut self) {
        self.store.mark_loading();
    }

    /// Initial load when the screen comes up.
    pub async fn mount(&mut self) {
        info!("directory mounted");
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        if self.store.refresh(&self.gateway).await == LoadStatus::Failed {
            if let Some(message) = self.store.error() {
                self.banner.show(message);
            }
        }
    }

    pub fn open_create(&mut self) -> Result<(), FormError> {
        self.form.open_create()
    }

    pub fn open_edit(&mut self, id: EmployeeId) -> Result<(), FormError> {
        let employee = self
            .store
            .find(id)
            .ok_or(FormError::UnknownEmployee(id))?;
        self.form.open_edit(employee)
    }

    pub fn set_field(
        &mut self,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.set_field(field, value)
    }

    pub fn cancel(&mut self) {
        self.form.close();
    }

    /// The modal's close control; identical to [`Self::cancel`].
    pub fn close(&mut self) {
        self.cancel();
    }

    /// Saves the open form. A server-side failure lands on the banner and
    /// leaves the form open; local validation failures never hit the network.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        match self.form.submit(&self.gateway).await {
            Ok(_) => {
                self.refresh().await;
                Ok(())
            }
            Err(FormError::Gateway(err)) => {
                warn!(error = %err, status = ?err.status(), "employee save failed");
                self.banner.show(err.display_message(SAVE_FAILURE_CONTEXT));
                Err(FormError::Gateway(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes after asking `confirm`. A "no" makes no calls and changes nothing.
    pub async fn delete(
        &mut self,
        id: EmployeeId,
        confirm: &mut dyn Confirm,
    ) -> Result<DeleteOutcome, GatewayError> {
        let prompt = match self.store.find(id) {
            Some(employee) => format!("Delete employee {}?", employee.full_name),
            None => format!("Delete employee #{id}?"),
        };
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }

        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(employee_id = %id, "employee deleted");
                self.refresh().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                warn!(
                    employee_id = %id,
                    status = ?err.status(),
                    error = %err,
                    "employee delete failed"
                );
                self.banner.show(err.display_message(DELETE_FAILURE_CONTEXT));
                Err(err)
            }
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner.dismiss();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
