//! Composition root owning the three admin areas.

use crate::clock::{Clock, SystemClock};
use crate::model::customer::Customer;
use crate::model::inventory::InventoryEntry;
use crate::model::record::ModuleKind;
use crate::model::sale::Sale;
use crate::module::{AdminModule, Outcome};
use crate::render::DisplaySurface;
use crate::router::UiEvent;
use std::sync::Arc;

/// Customers, inventory and sales, each with its own store.
///
/// Modules share the clock and nothing else.
pub struct Dashboard {
    customers: AdminModule<Customer>,
    inventory: AdminModule<InventoryEntry>,
    sales: AdminModule<Sale>,
}

impl Dashboard {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            customers: AdminModule::new(Arc::clone(&clock)),
            inventory: AdminModule::new(Arc::clone(&clock)),
            sales: AdminModule::new(clock),
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Delivers `event` to the module it is addressed to.
    pub fn handle(
        &mut self,
        module: ModuleKind,
        event: &UiEvent,
        surface: &mut dyn DisplaySurface,
    ) -> Outcome {
        match module {
            ModuleKind::Customers => self.customers.handle(event, surface),
            ModuleKind::Inventory => self.inventory.handle(event, surface),
            ModuleKind::Sales => self.sales.handle(event, surface),
        }
    }

    /// Initial render of every table and stats board.
    pub fn refresh_all(&self, surface: &mut dyn DisplaySurface) {
        self.customers.refresh(surface);
        self.inventory.refresh(surface);
        self.sales.refresh(surface);
    }

    pub fn customers(&self) -> &AdminModule<Customer> {
        &self.customers
    }

    pub fn inventory(&self) -> &AdminModule<InventoryEntry> {
        &self.inventory
    }

    pub fn sales(&self) -> &AdminModule<Sale> {
        &self.sales
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::with_system_clock()
    }
}
