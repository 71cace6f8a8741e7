//! Display-surface contract and view models.
//!
//! # Responsibility
//! - Convert store contents and stats into typed rows/tiles.
//! - Define the only boundary with the presentation layer.
//!
//! # Invariants
//! - Rows carry the record's current store index in their action markers;
//!   those indices are only valid until the next mutation.
//! - Markup and styling belong to the `DisplaySurface` implementation.

use crate::model::record::{DomainRecord, ModuleKind, RecordId, StoredRecord};
use crate::modal::ModalKind;
use crate::router::{ActionKind, ElementMarker};
use crate::stats::Stats;
use crate::validate::FormInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One labeled value in a detail or confirmation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

impl DetailField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub id: RecordId,
    pub cells: Vec<String>,
    pub actions: Vec<ElementMarker>,
}

/// One tile of the stats board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTile {
    pub label: String,
    pub value: String,
}

/// Body of a transient modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalBody {
    pub title: String,
    pub prompt: Option<String>,
    pub fields: Vec<DetailField>,
    /// Markers on the modal's buttons.
    pub actions: Vec<ElementMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// User-visible outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Presentation boundary a module writes into.
pub trait DisplaySurface {
    /// Replaces the module's table body.
    fn write_rows(&mut self, module: ModuleKind, rows: Vec<TableRow>);
    /// Replaces the module's stats board.
    fn write_stats(&mut self, module: ModuleKind, tiles: Vec<StatTile>);
    fn set_modal_visible(&mut self, module: ModuleKind, modal: ModalKind, visible: bool);
    /// Builds a transient modal, replacing any existing one of that kind.
    fn show_modal_body(&mut self, module: ModuleKind, modal: ModalKind, body: ModalBody);
    /// Resets the create form to `values`.
    fn reset_form(&mut self, module: ModuleKind, values: &FormInput);
    fn notify(&mut self, module: ModuleKind, notice: Notice);
}

/// Rows for `records` in store order, with view/delete markers.
pub fn render_rows<R: DomainRecord>(records: &[StoredRecord<R>]) -> Vec<TableRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| render_row(index, record))
        .collect()
}

pub fn render_row<R: DomainRecord>(index: usize, record: &StoredRecord<R>) -> TableRow {
    TableRow {
        index,
        id: record.id(),
        cells: record.data().row_cells(),
        actions: vec![
            ElementMarker::row_action(ActionKind::View, index),
            ElementMarker::row_action(ActionKind::RequestDelete, index),
        ],
    }
}

/// Tiles for the stats board; one per category plus the totals.
pub fn render_stats<K: Ord + std::fmt::Display>(stats: &Stats<K>) -> Vec<StatTile> {
    let mut tiles = vec![
        StatTile {
            label: "Records".to_string(),
            value: stats.record_count.to_string(),
        },
        StatTile {
            label: "Total".to_string(),
            value: stats.total_quantity.to_string(),
        },
    ];
    tiles.extend(stats.category_counts.iter().map(|(category, count)| StatTile {
        label: category.to_string(),
        value: count.to_string(),
    }));
    tiles.push(StatTile {
        label: format!("{:04}-{:02}", stats.period_year, stats.period_month),
        value: stats.current_period_quantity.to_string(),
    });
    tiles
}

/// In-memory surface that keeps the latest state written to it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub rows: BTreeMap<ModuleKind, Vec<TableRow>>,
    pub stats: BTreeMap<ModuleKind, Vec<StatTile>>,
    pub visible_modals: BTreeMap<(ModuleKind, ModalKind), bool>,
    pub modal_bodies: BTreeMap<(ModuleKind, ModalKind), ModalBody>,
    pub forms: BTreeMap<ModuleKind, FormInput>,
    pub notices: Vec<(ModuleKind, Notice)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_for(&self, module: ModuleKind) -> &[TableRow] {
        self.rows.get(&module).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_visible(&self, module: ModuleKind, modal: ModalKind) -> bool {
        self.visible_modals
            .get(&(module, modal))
            .copied()
            .unwrap_or(false)
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last().map(|(_, notice)| notice)
    }
}

impl DisplaySurface for RecordingSurface {
    fn write_rows(&mut self, module: ModuleKind, rows: Vec<TableRow>) {
        self.rows.insert(module, rows);
    }

    fn write_stats(&mut self, module: ModuleKind, tiles: Vec<StatTile>) {
        self.stats.insert(module, tiles);
    }

    fn set_modal_visible(&mut self, module: ModuleKind, modal: ModalKind, visible: bool) {
        self.visible_modals.insert((module, modal), visible);
        if !visible && modal.is_transient() {
            self.modal_bodies.remove(&(module, modal));
        }
    }

    fn show_modal_body(&mut self, module: ModuleKind, modal: ModalKind, body: ModalBody) {
        self.modal_bodies.insert((module, modal), body);
    }

    fn reset_form(&mut self, module: ModuleKind, values: &FormInput) {
        self.forms.insert(module, values.clone());
    }

    fn notify(&mut self, module: ModuleKind, notice: Notice) {
        self.notices.push((module, notice));
    }
}
