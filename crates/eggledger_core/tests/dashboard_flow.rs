use chrono::NaiveDate;
use eggledger_core::{
    ActionKind, ClickTarget, Dashboard, ElementMarker, FixedClock, FormInput, FormSubmission,
    ModalKind, ModuleKind, NoticeKind, Outcome, RecordingSurface, SaleKind, TrayType, UiEvent,
};
use serde_json::json;
use std::sync::Arc;

fn dashboard() -> Dashboard {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    Dashboard::new(Arc::new(FixedClock::on(today)))
}

fn submit(
    dashboard: &mut Dashboard,
    surface: &mut RecordingSurface,
    module: ModuleKind,
    form: FormInput,
) -> Outcome {
    let open = UiEvent::Click(ClickTarget::marked(ElementMarker::action(
        ActionKind::OpenCreate,
    )));
    dashboard.handle(module, &open, surface);
    dashboard.handle(module, &UiEvent::Submit(FormSubmission::create(form)), surface)
}

#[test]
fn initial_refresh_renders_every_area_empty() {
    let dashboard = dashboard();
    let mut surface = RecordingSurface::new();
    dashboard.refresh_all(&mut surface);

    for module in ModuleKind::all() {
        assert!(surface.rows_for(module).is_empty());
        let tiles = &surface.stats[&module];
        assert_eq!(tiles[0].label, "Records");
        assert_eq!(tiles[0].value, "0");
        assert_eq!(tiles.last().map(|tile| tile.label.as_str()), Some("2026-10"));
    }
}

#[test]
fn areas_keep_separate_stores() {
    let mut dashboard = dashboard();
    let mut surface = RecordingSurface::new();

    let customer = FormInput::new()
        .with("customer_name", "Hotel Riverside")
        .with("customer_phone", "0722 111 222");
    assert!(matches!(
        submit(&mut dashboard, &mut surface, ModuleKind::Customers, customer),
        Outcome::Created(_)
    ));

    let delivery = FormInput::new()
        .with("supplier_name", "Kamau Poultry")
        .with("tray_type", "full")
        .with("trays", "10")
        .with("pieces", "300")
        .with("delivery_date", "2026-10-16");
    assert!(matches!(
        submit(&mut dashboard, &mut surface, ModuleKind::Inventory, delivery),
        Outcome::Created(_)
    ));

    let sale = FormInput::new()
        .with("sale_customer", "Hotel Riverside")
        .with("sale_full_trays", "3")
        .with("sale_pieces", "0")
        .with("price_per_tray", "360")
        .with("price_per_piece", "13")
        .with("sale_date", "2026-10-18")
        .with("sale_notes", "Deliver before noon");
    assert!(matches!(
        submit(&mut dashboard, &mut surface, ModuleKind::Sales, sale),
        Outcome::Created(_)
    ));

    assert_eq!(dashboard.customers().store().len(), 1);
    assert_eq!(dashboard.inventory().store().len(), 1);
    assert_eq!(dashboard.sales().store().len(), 1);

    assert_eq!(dashboard.inventory().stats().count_for(TrayType::Full), 1);
    let sales = dashboard.sales().stats();
    assert_eq!(sales.total_quantity, 90);
    assert_eq!(sales.count_for(SaleKind::Trays), 1);

    let sale_row = &surface.rows_for(ModuleKind::Sales)[0];
    assert_eq!(sale_row.cells[3], "KSh 1080.00");
    assert_eq!(sale_row.cells[4], "18/10/2026");

    let (module, notice) = surface.notices.last().expect("sale notice");
    assert_eq!(*module, ModuleKind::Sales);
    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(notice.message.starts_with("Sale added successfully!"));
    assert!(notice.message.contains("Total Amount: KSh 1080.00"));
}

#[test]
fn events_for_one_area_never_touch_another() {
    let mut dashboard = dashboard();
    let mut surface = RecordingSurface::new();

    let customer = FormInput::new()
        .with("customer_name", "Achieng")
        .with("customer_phone", "0712 345 678");
    submit(&mut dashboard, &mut surface, ModuleKind::Customers, customer);

    let delete_first = UiEvent::Click(ClickTarget::marked(ElementMarker::row_action(
        ActionKind::RequestDelete,
        0,
    )));
    assert_eq!(
        dashboard.handle(ModuleKind::Sales, &delete_first, &mut surface),
        Outcome::Ignored
    );
    assert!(dashboard.customers().pending_delete().is_none());
    assert_eq!(dashboard.customers().store().len(), 1);
    assert!(!surface.is_visible(ModuleKind::Customers, ModalKind::DeleteConfirm));
}

#[test]
fn view_models_serialize_for_hosts() {
    let mut dashboard = dashboard();
    let mut surface = RecordingSurface::new();
    let delivery = FormInput::new()
        .with("supplier_name", "Kamau Poultry")
        .with("tray_type", "partial")
        .with("trays", "1")
        .with("pieces", "12")
        .with("delivery_date", "2026-10-16");
    submit(&mut dashboard, &mut surface, ModuleKind::Inventory, delivery);

    let stats = serde_json::to_value(dashboard.inventory().stats()).expect("stats serialize");
    assert_eq!(
        stats,
        json!({
            "record_count": 1,
            "total_quantity": 12,
            "category_counts": { "full": 0, "partial": 1 },
            "current_period_quantity": 12,
            "period_year": 2026,
            "period_month": 10,
        })
    );

    let row = serde_json::to_value(&surface.rows_for(ModuleKind::Inventory)[0])
        .expect("row serializes");
    assert_eq!(row["index"], json!(0));
    assert_eq!(row["actions"][0], json!({ "action": "view", "index": "0" }));

    let record = serde_json::to_value(&dashboard.inventory().store().all()[0])
        .expect("record serializes");
    assert_eq!(record["supplier_name"], json!("Kamau Poultry"));
    assert_eq!(record["tray_type"], json!("partial"));
    assert!(record["id"].is_string());
}
