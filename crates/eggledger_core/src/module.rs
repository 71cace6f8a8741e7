//! One admin area end to end: events in, store mutations, views out.
//!
//! # Responsibility
//! - Own the area's record store, its modals and a clock.
//! - Execute routed commands in order: validate, mutate, re-render rows and
//!   stats, close the modal, post the outcome notice.
//!
//! # Invariants
//! - Every create or confirmed delete posts exactly one notice.
//! - A rejected create leaves the store unchanged and the form open.
//! - Delete confirmation targets the record id captured when the
//!   confirmation opened, never a position read at confirm time.
//! - Stale positions and ids are no-ops, never panics.
//! - An active search survives mutations: re-rendered rows stay filtered
//!   until a blank query clears it.
//! - A view of a record that gets deleted closes with it.

use crate::clock::Clock;
use crate::modal::{ModalKind, ModalState, StructuralModal, TransientModal};
use crate::model::record::{DomainRecord, RecordId};
use crate::render::{
    render_row, render_rows, render_stats, DisplaySurface, ModalBody, Notice, TableRow,
};
use crate::router::{route, ActionKind, Command, ElementMarker, UiEvent};
use crate::stats::{summarize, Stats};
use crate::store::{RecordStore, StoreResult};
use crate::validate::{FormInput, ValidationFailure};
use log::{debug, info, warn};
use std::sync::Arc;

/// Record captured when a transient modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord<R> {
    pub id: RecordId,
    /// Position at open time; informational only.
    pub index_at_open: usize,
    pub snapshot: R,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No action marker, an unroutable event, or a stale target.
    Ignored,
    Opened(ModalKind),
    Closed(ModalKind),
    Filtered { matches: usize },
    Created(RecordId),
    Rejected(ValidationFailure),
    Deleted(RecordId),
    /// Confirmation referred to a record that no longer exists.
    AlreadyRemoved(RecordId),
}

/// Store, modals and event handling for one record type.
pub struct AdminModule<R: DomainRecord> {
    store: RecordStore<R>,
    create_modal: StructuralModal,
    view_modal: TransientModal<PendingRecord<R>>,
    delete_modal: TransientModal<PendingRecord<R>>,
    search_query: Option<String>,
    clock: Arc<dyn Clock>,
}

impl<R: DomainRecord> AdminModule<R> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(),
            create_modal: StructuralModal::new(),
            view_modal: TransientModal::new(),
            delete_modal: TransientModal::new(),
            search_query: None,
            clock,
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    /// Fresh stats over the current store contents.
    pub fn stats(&self) -> Stats<R::Category> {
        summarize(self.store.all(), self.clock.as_ref())
    }

    pub fn modal_state(&self, modal: ModalKind) -> ModalState {
        match modal {
            ModalKind::Create => self.create_modal.state(),
            ModalKind::View => self.view_modal.state(),
            ModalKind::DeleteConfirm => self.delete_modal.state(),
        }
    }

    pub fn viewing(&self) -> Option<&PendingRecord<R>> {
        self.view_modal.current()
    }

    pub fn pending_delete(&self) -> Option<&PendingRecord<R>> {
        self.delete_modal.current()
    }

    /// Query the table is currently filtered by.
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// Writes rows (filtered by the active search) and stats for the
    /// current store contents.
    pub fn refresh(&self, surface: &mut dyn DisplaySurface) {
        surface.write_rows(R::MODULE, self.visible_rows());
        surface.write_stats(R::MODULE, render_stats(&self.stats()));
    }

    /// Routes and executes one event.
    pub fn handle(&mut self, event: &UiEvent, surface: &mut dyn DisplaySurface) -> Outcome {
        match route(event) {
            Ok(Some(command)) => self.execute(command, surface),
            Ok(None) => Outcome::Ignored,
            Err(err) => {
                debug!(
                    "event=route_skip module={} status=ignored reason={}",
                    R::MODULE,
                    err
                );
                Outcome::Ignored
            }
        }
    }

    pub fn execute(&mut self, command: Command, surface: &mut dyn DisplaySurface) -> Outcome {
        match command {
            Command::OpenCreate => self.open_create(surface),
            Command::Close(modal) => self.close(modal, surface),
            Command::View(index) => self.open_view(index, surface),
            Command::RequestDelete(index) => self.request_delete(index, surface),
            Command::ConfirmDelete => self.confirm_delete(surface),
            Command::SubmitCreate(form) => self.submit_create(&form, surface),
            Command::Filter(query) => self.filter(query.as_str(), surface),
        }
    }

    fn open_create(&mut self, surface: &mut dyn DisplaySurface) -> Outcome {
        self.create_modal.open();
        surface.reset_form(R::MODULE, &R::form_defaults(self.clock.today()));
        surface.set_modal_visible(R::MODULE, ModalKind::Create, true);
        debug!("event=modal_open module={} modal=create", R::MODULE);
        Outcome::Opened(ModalKind::Create)
    }

    fn close(&mut self, modal: ModalKind, surface: &mut dyn DisplaySurface) -> Outcome {
        let was_open = match modal {
            ModalKind::Create => self.create_modal.close(),
            ModalKind::View => self.view_modal.close().is_some(),
            ModalKind::DeleteConfirm => self.delete_modal.close().is_some(),
        };
        surface.set_modal_visible(R::MODULE, modal, false);

        if was_open {
            debug!("event=modal_close module={} modal={}", R::MODULE, modal);
            Outcome::Closed(modal)
        } else {
            Outcome::Ignored
        }
    }

    fn open_view(&mut self, index: usize, surface: &mut dyn DisplaySurface) -> Outcome {
        let pending = match self.pending_at(index) {
            Ok(pending) => pending,
            Err(err) => return self.stale_target(ActionKind::View, &err.to_string()),
        };

        let body = ModalBody {
            title: format!("{} Details", R::LABEL),
            prompt: None,
            fields: pending.snapshot.detail_fields(),
            actions: vec![ElementMarker::action(ActionKind::CloseModal)],
        };
        self.view_modal.open(pending);
        surface.show_modal_body(R::MODULE, ModalKind::View, body);
        surface.set_modal_visible(R::MODULE, ModalKind::View, true);
        Outcome::Opened(ModalKind::View)
    }

    fn request_delete(&mut self, index: usize, surface: &mut dyn DisplaySurface) -> Outcome {
        let pending = match self.pending_at(index) {
            Ok(pending) => pending,
            Err(err) => return self.stale_target(ActionKind::RequestDelete, &err.to_string()),
        };

        let body = ModalBody {
            title: format!("Delete {}", R::LABEL),
            prompt: Some(format!(
                "Are you sure you want to delete this {} record?",
                R::LABEL.to_lowercase()
            )),
            fields: pending.snapshot.detail_fields(),
            actions: vec![
                ElementMarker::action(ActionKind::CloseModal),
                ElementMarker::action(ActionKind::ConfirmDelete),
            ],
        };
        debug!(
            "event=delete_requested module={} id={} index={}",
            R::MODULE,
            pending.id,
            pending.index_at_open
        );
        self.delete_modal.open(pending);
        surface.show_modal_body(R::MODULE, ModalKind::DeleteConfirm, body);
        surface.set_modal_visible(R::MODULE, ModalKind::DeleteConfirm, true);
        Outcome::Opened(ModalKind::DeleteConfirm)
    }

    fn confirm_delete(&mut self, surface: &mut dyn DisplaySurface) -> Outcome {
        let Some(pending) = self.delete_modal.close() else {
            return self.stale_target(ActionKind::ConfirmDelete, "no pending confirmation");
        };

        match self.store.remove_by_id(pending.id) {
            Ok(removed) => {
                if self.viewing().is_some_and(|viewed| viewed.id == removed.id()) {
                    self.view_modal.close();
                    surface.set_modal_visible(R::MODULE, ModalKind::View, false);
                }
                self.refresh(surface);
                surface.set_modal_visible(R::MODULE, ModalKind::DeleteConfirm, false);
                surface.notify(
                    R::MODULE,
                    Notice::success(format!("{} deleted successfully!", R::LABEL)),
                );
                info!(
                    "event=record_delete module={} status=ok id={} remaining={}",
                    R::MODULE,
                    removed.id(),
                    self.store.len()
                );
                Outcome::Deleted(removed.id())
            }
            Err(err) => {
                surface.set_modal_visible(R::MODULE, ModalKind::DeleteConfirm, false);
                surface.notify(
                    R::MODULE,
                    Notice::info(format!("{} record no longer exists.", R::LABEL)),
                );
                warn!(
                    "event=record_delete module={} status=stale id={} reason={}",
                    R::MODULE,
                    pending.id,
                    err
                );
                Outcome::AlreadyRemoved(pending.id)
            }
        }
    }

    fn submit_create(&mut self, form: &FormInput, surface: &mut dyn DisplaySurface) -> Outcome {
        let record = match R::from_form(form) {
            Ok(record) => record,
            Err(failure) => {
                surface.notify(R::MODULE, Notice::error(failure.to_string()));
                info!(
                    "event=record_create module={} status=rejected field={}",
                    R::MODULE,
                    failure.field
                );
                return Outcome::Rejected(failure);
            }
        };

        let message = record.created_message();
        let id = self.store.add(record, self.clock.as_ref());
        self.refresh(surface);
        self.create_modal.close();
        surface.set_modal_visible(R::MODULE, ModalKind::Create, false);
        surface.notify(R::MODULE, Notice::success(message));
        info!(
            "event=record_create module={} status=ok id={} total={}",
            R::MODULE,
            id,
            self.store.len()
        );
        Outcome::Created(id)
    }

    fn filter(&mut self, query: &str, surface: &mut dyn DisplaySurface) -> Outcome {
        let query = query.trim();
        self.search_query = if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        };
        let rows = self.visible_rows();
        let matches = rows.len();
        surface.write_rows(R::MODULE, rows);
        Outcome::Filtered { matches }
    }

    fn visible_rows(&self) -> Vec<TableRow> {
        match &self.search_query {
            Some(query) => self
                .store
                .filter(query, R::search_text)
                .into_iter()
                .map(|(index, record)| render_row(index, record))
                .collect(),
            None => render_rows(self.store.all()),
        }
    }

    fn pending_at(&self, index: usize) -> StoreResult<PendingRecord<R>> {
        let record = self.store.get(index)?;
        Ok(PendingRecord {
            id: record.id(),
            index_at_open: index,
            snapshot: record.data().clone(),
        })
    }

    fn stale_target(&self, action: ActionKind, reason: &str) -> Outcome {
        debug!(
            "event=action_skip module={} action={} status=ignored reason={}",
            R::MODULE,
            action.as_str(),
            reason
        );
        Outcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::{AdminModule, Outcome};
    use crate::clock::FixedClock;
    use crate::modal::{ModalKind, ModalState};
    use crate::model::customer::Customer;
    use crate::render::{NoticeKind, RecordingSurface};
    use crate::router::{ActionKind, ClickTarget, ElementMarker, FormSubmission, UiEvent};
    use crate::validate::FormInput;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn module_with_one_customer(surface: &mut RecordingSurface) -> AdminModule<Customer> {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        let mut module = AdminModule::new(Arc::new(FixedClock::on(today)));
        let form = FormInput::new()
            .with("customer_name", "Achieng")
            .with("customer_phone", "0712 345 678");
        let outcome = module.handle(&UiEvent::Submit(FormSubmission::create(form)), surface);
        assert!(matches!(outcome, Outcome::Created(_)));
        surface.notices.clear();
        module
    }

    #[test]
    fn confirm_for_a_vanished_record_posts_one_info_notice() {
        let mut surface = RecordingSurface::new();
        let mut module = module_with_one_customer(&mut surface);

        module.handle(
            &UiEvent::Click(ClickTarget::marked(ElementMarker::row_action(
                ActionKind::RequestDelete,
                0,
            ))),
            &mut surface,
        );
        let pending = module.pending_delete().expect("confirmation open").id;
        module.store.remove_by_id(pending).expect("record exists");

        let outcome = module.handle(
            &UiEvent::Click(ClickTarget::in_modal(
                ModalKind::DeleteConfirm,
                ElementMarker::action(ActionKind::ConfirmDelete),
            )),
            &mut surface,
        );

        assert_eq!(outcome, Outcome::AlreadyRemoved(pending));
        assert_eq!(module.modal_state(ModalKind::DeleteConfirm), ModalState::Closed);
        assert!(!surface.is_visible(crate::ModuleKind::Customers, ModalKind::DeleteConfirm));
        assert_eq!(surface.notices.len(), 1);
        let notice = surface.last_notice().expect("info notice");
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.message, "Customer record no longer exists.");
    }
}
