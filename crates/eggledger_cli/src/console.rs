//! Plain-text display surface for terminal sessions.

use eggledger_core::{
    DisplaySurface, FormInput, ModalBody, ModalKind, ModuleKind, Notice, NoticeKind, StatTile,
    TableRow,
};
use log::warn;
use std::io::Write;

/// Prints every surface update as indented text lines.
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!("event=console_write module=cli status=error reason={err}");
        }
    }
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn write_rows(&mut self, module: ModuleKind, rows: Vec<TableRow>) {
        self.emit(&format!("[{module}] table ({} rows)", rows.len()));
        if rows.is_empty() {
            self.emit("  (no records)");
        }
        for row in rows {
            self.emit(&format!("  #{} {}", row.index, row.cells.join(" | ")));
        }
    }

    fn write_stats(&mut self, module: ModuleKind, tiles: Vec<StatTile>) {
        let summary = tiles
            .iter()
            .map(|tile| format!("{}={}", tile.label, tile.value))
            .collect::<Vec<_>>()
            .join(" ");
        self.emit(&format!("[{module}] stats {summary}"));
    }

    fn set_modal_visible(&mut self, module: ModuleKind, modal: ModalKind, visible: bool) {
        let state = if visible { "shown" } else { "hidden" };
        self.emit(&format!("[{module}] {modal} modal {state}"));
    }

    fn show_modal_body(&mut self, module: ModuleKind, _modal: ModalKind, body: ModalBody) {
        self.emit(&format!("[{module}] {}", body.title));
        if let Some(prompt) = &body.prompt {
            self.emit(&format!("  {prompt}"));
        }
        for field in &body.fields {
            self.emit(&format!("  {}: {}", field.label, field.value));
        }
    }

    fn reset_form(&mut self, module: ModuleKind, values: &FormInput) {
        if values.is_empty() {
            self.emit(&format!("[{module}] form reset"));
            return;
        }
        let defaults = values
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.emit(&format!("[{module}] form reset ({defaults})"));
    }

    fn notify(&mut self, module: ModuleKind, notice: Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        self.emit(&format!("[{module}] {tag}: {}", notice.message));
    }
}
