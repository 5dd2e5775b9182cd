use crate::*;

use table_resize::{
    Bounds, CellId, CellResize, ColumnDef, FixedSide, MemorySurface, Point, ResizeOptions, Size,
    TableResize,
};

fn name_age() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name").with_default_width(200),
        ColumnDef::new("age").with_default_width(100),
    ]
}

fn driver(options: ResizeOptions) -> Driver {
    Driver::new(TableResize::in_memory(name_age(), options))
}

fn cells_on() -> ResizeOptions {
    ResizeOptions::new().with_cell_content_resize(true)
}

/// Two rows of `name`/`age` cells, 200x40 and 100x40.
fn surface() -> MemorySurface {
    let mut s = MemorySurface::new();
    for row in 0..2 {
        s.insert(CellId::new("name", row), Size::new(200, 40), 150);
        s.insert(CellId::new("age", row), Size::new(100, 40), 60);
    }
    s
}

fn corner(bounds: Bounds) -> Point {
    Point::new(bounds.right() - 5.0, bounds.bottom() - 5.0)
}

#[test]
fn header_drag_previews_on_the_next_frame() {
    let mut d = driver(ResizeOptions::new());
    let mut s = surface();

    assert!(d.header_drag_start("name", Point::new(100.0, 10.0), None));
    assert!(d.header("name").unwrap().is_resizing());
    assert_eq!(d.header("name").unwrap().class_name(), "resizing-column");
    assert_eq!(
        d.header("name").unwrap().handle_class(),
        "resize-handle resizing"
    );

    assert_eq!(
        d.header_drag_move("name", Point::new(150.0, 10.0)),
        Some(250)
    );
    // Queued, not committed yet.
    assert_eq!(d.table().column_width("name"), Some(200));

    let report = d.frame(16, &mut s);
    assert_eq!(report.committed, 1);
    assert_eq!(d.table().column_width("name"), Some(250));
    assert_eq!(d.header("name").unwrap().props().width, Some(250));

    // Same final position: nothing left to change.
    assert!(!d.header_drag_stop("name", Point::new(150.0, 10.0), 20));
    let header = d.header("name").unwrap();
    assert!(!header.is_resizing());
    assert_eq!(header.class_name(), "");
    assert_eq!(header.handle_class(), "resize-handle");
}

#[test]
fn header_drag_stop_commits_without_waiting_for_a_frame() {
    let mut d = driver(ResizeOptions::new());
    assert!(d.header_drag_start("name", Point::new(100.0, 0.0), None));
    d.header_drag_move("name", Point::new(150.0, 0.0));
    assert!(d.header_drag_stop("name", Point::new(180.0, 0.0), 5));

    assert_eq!(d.table().column_width("name"), Some(280));
    assert!(!d.table().has_pending_frame());
    assert_eq!(d.header("name").unwrap().props().width, Some(280));
}

#[test]
fn header_drag_clamps_to_column_bounds() {
    let mut d = driver(ResizeOptions::new().with_width_bounds(80, Some(300)));
    assert!(d.header_drag_start("name", Point::new(0.0, 0.0), None));
    let far_left = Point::new(-500.0, 0.0);
    assert_eq!(d.header_drag_move("name", far_left), Some(80));
    let far_right = Point::new(500.0, 0.0);
    assert_eq!(d.header_drag_move("name", far_right), Some(300));
}

#[test]
fn drag_start_uses_measured_width_for_unsized_columns() {
    let columns = vec![ColumnDef::new("name"), ColumnDef::new("age")];
    let mut d = Driver::new(TableResize::in_memory(columns, ResizeOptions::new()));
    assert!(d.header_drag_start("name", Point::new(0.0, 0.0), Some(120)));
    assert_eq!(d.header_drag_move("name", Point::new(30.0, 0.0)), Some(150));
}

#[test]
fn tooltip_follows_the_drag_and_hides_on_stop() {
    let mut d = driver(ResizeOptions::new());
    assert!(!d.header("name").unwrap().tooltip().visible);

    d.header_drag_start("name", Point::new(100.0, 10.0), None);
    let tip = *d.header("name").unwrap().tooltip();
    assert!(tip.visible);
    assert_eq!(tip.label(), "200px");

    d.header_drag_move("name", Point::new(140.0, 12.0));
    let tip = *d.header("name").unwrap().tooltip();
    assert_eq!(tip.label(), "240px");
    assert_eq!(tip.anchor, Point::new(140.0, 12.0));

    let json = serde_json::to_value(tip).unwrap();
    assert_eq!(json["width"], 240);
    assert_eq!(json["visible"], true);

    d.header_drag_stop("name", Point::new(140.0, 12.0), 10);
    assert!(!d.header("name").unwrap().tooltip().visible);
}

#[test]
fn tooltip_stays_hidden_when_disabled() {
    let mut d = driver(ResizeOptions::new().with_width_tooltip(false));
    assert!(d.header_drag_start("name", Point::new(100.0, 10.0), None));
    d.header_drag_move("name", Point::new(140.0, 10.0));
    assert!(!d.header("name").unwrap().tooltip().visible);
}

#[test]
fn last_and_right_pinned_headers_have_no_handle() {
    let columns = vec![
        ColumnDef::new("id")
            .with_default_width(60)
            .with_fixed(FixedSide::Left),
        ColumnDef::new("name").with_default_width(200),
        ColumnDef::new("actions")
            .with_default_width(90)
            .with_fixed(FixedSide::Right),
        ColumnDef::new("age").with_default_width(100),
    ];
    let mut d = Driver::new(TableResize::in_memory(columns, ResizeOptions::new()));

    assert!(d.header("id").unwrap().has_handle());
    assert!(d.header("name").unwrap().has_handle());
    assert!(!d.header("actions").unwrap().has_handle());
    assert!(!d.header("age").unwrap().has_handle());

    assert!(!d.header_drag_start("age", Point::new(0.0, 0.0), None));
    assert_eq!(d.header_drag_move("age", Point::new(40.0, 0.0)), None);
    assert_eq!(d.table().column_width("age"), Some(100));
}

#[test]
fn handle_clicks_never_reach_the_table() {
    let d = driver(ResizeOptions::new());
    assert_eq!(d.header_click("name", true), ClickOutcome::Consumed);
    assert_eq!(d.header_click("name", false), ClickOutcome::PassThrough);
    // No handle on the last column, so the click is the table's.
    assert_eq!(d.header_click("age", true), ClickOutcome::PassThrough);
    assert_eq!(d.header_click("missing", true), ClickOutcome::PassThrough);
}

#[test]
fn double_click_on_handle_auto_sizes_the_column() {
    let mut d = driver(ResizeOptions::new());
    let mut s = surface();
    d.mount_row(0);
    d.mount_row(1);
    s.insert(CellId::new("name", 1), Size::new(200, 40), 340);

    assert_eq!(
        d.header_double_click("name", true, &s, 0),
        ClickOutcome::AutoSized(Some(372))
    );
    assert_eq!(d.table().column_width("name"), Some(372));
    assert_eq!(d.header("name").unwrap().props().width, Some(372));

    assert_eq!(
        d.header_double_click("name", false, &s, 0),
        ClickOutcome::PassThrough
    );
}

#[test]
fn double_click_without_auto_size_is_still_consumed() {
    let mut d = driver(ResizeOptions::new().with_double_click_auto_size(false));
    let s = surface();
    d.mount_row(0);
    assert_eq!(
        d.header_double_click("name", true, &s, 0),
        ClickOutcome::Consumed
    );
    assert_eq!(d.table().column_width("name"), Some(200));
}

#[test]
fn double_click_with_nothing_mounted_measures_nothing() {
    let mut d = driver(ResizeOptions::new());
    let s = surface();
    assert_eq!(
        d.header_double_click("name", true, &s, 0),
        ClickOutcome::AutoSized(None)
    );
    assert_eq!(d.table().column_width("name"), Some(200));
}

#[test]
fn cell_drag_starts_only_in_the_corner() {
    let mut d = driver(cells_on());
    d.mount_row(0);
    let id = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);

    assert!(!d.cell_pointer_down(&id, Point::new(100.0, 20.0), bounds));
    assert!(!d.cell_pointer_down(&id, Point::new(195.0, 10.0), bounds));
    assert!(!d.cell(&id).unwrap().is_resizing());

    assert!(d.cell_pointer_down(&id, corner(bounds), bounds));
    assert!(d.cell(&id).unwrap().is_resizing());
}

#[test]
fn disabled_cells_ignore_gestures_but_receive_row_heights() {
    let columns = vec![
        ColumnDef::new("name").with_default_width(200),
        ColumnDef::new("age")
            .with_default_width(100)
            .with_cell_resize(CellResize::Enabled(false)),
    ];
    let mut d = Driver::new(TableResize::in_memory(columns, cells_on()));
    let mut s = surface();
    d.mount_row(0);

    let age = CellId::new("age", 0);
    let age_bounds = Bounds::new(200.0, 0.0, 100.0, 40.0);
    let age_cell = d.cell(&age).unwrap();
    assert!(!age_cell.is_enabled());
    assert_eq!(age_cell.class_name(), "");
    assert_eq!(age_cell.content_style(), None);
    assert!(!d.cell_pointer_down(&age, corner(age_bounds), age_bounds));

    let name = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);
    assert!(d.cell_pointer_down(&name, corner(bounds), bounds));
    s.resize(&name, Size::new(200, 90));
    d.pointer_up(0);
    d.frame(50, &mut s);

    assert_eq!(s.cell(&age).unwrap().size, Size::new(100, 90));
}

#[test]
fn host_cells_follow_row_heights() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    let select = CellId::new("select", 0);
    let expander = CellId::new("expand", 0);
    s.insert(select.clone(), Size::new(32, 40), 32);
    s.insert(expander.clone(), Size::new(24, 40), 24);

    let disabled = CellResize::Enabled(false);
    let host = d.mount_host_cell("select", 2, 0, Some(&disabled));
    assert!(!host.is_enabled());
    // No declared config: the table default applies.
    assert!(d.mount_host_cell("expand", 3, 0, None).is_enabled());
    assert_eq!(d.cell_count(), 4);
    assert!(d.table().index().contains(&select));

    let name = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);
    assert!(d.cell_pointer_down(&name, corner(bounds), bounds));
    s.resize(&name, Size::new(200, 90));
    d.pointer_up(0);
    d.frame(50, &mut s);

    assert_eq!(s.cell(&select).unwrap().size, Size::new(32, 90));
    assert_eq!(s.cell(&expander).unwrap().size, Size::new(24, 90));
    assert_eq!(d.cell(&select).unwrap().props().row_height, Some(90));

    // Mounted after the commit: picks up the row height right away.
    d.unmount_cell(&select);
    let cell = d.mount_host_cell("select", 2, 0, Some(&disabled));
    assert_eq!(cell.props().row_height, Some(90));
}

#[test]
fn settled_cell_size_reaches_row_and_column() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    d.mount_row(1);

    let id = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);
    assert!(d.cell_pointer_down(&id, corner(bounds), bounds));
    s.resize(&id, Size::new(260, 80));
    d.pointer_up(100);
    assert!(!d.cell(&id).unwrap().is_resizing());
    assert_eq!(d.next_deadline_ms(), Some(150));

    // Still inside the settle delay.
    assert_eq!(d.frame(120, &mut s).settled, 0);
    assert_eq!(s.cell(&CellId::new("age", 0)).unwrap().size.height, 40);

    let report = d.frame(150, &mut s);
    assert_eq!(report.settled, 1);
    assert_eq!(report.committed, 1);

    let size_of = |column: &str, row: usize| s.cell(&CellId::new(column, row)).unwrap().size;
    // Same row, any column: height.
    assert_eq!(size_of("age", 0), Size::new(100, 80));
    assert_eq!(s.row_height(0), Some(80));
    // Same column, other rows: width only.
    assert_eq!(size_of("name", 1), Size::new(260, 40));
    // Neither.
    assert_eq!(size_of("age", 1), Size::new(100, 40));

    assert_eq!(d.table().column_width("name"), Some(260));
    assert_eq!(d.table().row_height(0), Some(80));
    let style = d.cell(&id).unwrap().content_style().unwrap();
    assert_eq!(style.height, Some(80));
}

#[test]
fn pointer_up_without_a_drag_arms_nothing() {
    let mut d = driver(cells_on());
    d.mount_row(0);
    d.pointer_up(10);
    assert_eq!(d.next_deadline_ms(), None);
}

#[test]
fn passive_height_is_reported_and_width_is_not() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    let id = CellId::new("name", 0);

    d.cell_observed(&id, Size::new(200, 40), 0);
    assert_eq!(d.frame(199, &mut s).reported_heights, 0);
    assert_eq!(d.frame(200, &mut s).reported_heights, 1);
    assert_eq!(d.table().row_height(0), Some(40));

    // Within two pixels of the last reported height.
    d.cell_observed(&id, Size::new(200, 42), 300);
    assert_eq!(d.frame(500, &mut s).reported_heights, 0);

    // A width-only change is never reported.
    d.cell_observed(&id, Size::new(420, 40), 600);
    assert_eq!(d.frame(800, &mut s).reported_heights, 0);
    assert_eq!(d.table().column_width("name"), Some(200));

    d.cell_observed(&id, Size::new(420, 45), 900);
    assert_eq!(d.frame(1100, &mut s).reported_heights, 1);
    assert_eq!(d.table().row_height(0), Some(45));
    assert_eq!(d.table().column_width("name"), Some(200));
}

#[test]
fn passive_observations_debounce_to_the_latest() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    let id = CellId::new("name", 0);

    d.cell_observed(&id, Size::new(200, 60), 0);
    d.cell_observed(&id, Size::new(200, 70), 150);
    assert_eq!(d.frame(200, &mut s).reported_heights, 0);
    assert_eq!(d.frame(350, &mut s).reported_heights, 1);
    assert_eq!(d.table().row_height(0), Some(70));
}

#[test]
fn passive_observation_is_dropped_while_dragging() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    let id = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);

    d.cell_observed(&id, Size::new(200, 90), 0);
    assert!(d.cell_pointer_down(&id, corner(bounds), bounds));
    assert_eq!(d.frame(200, &mut s).reported_heights, 0);
    assert_eq!(d.table().row_height(0), None);
}

#[test]
fn drag_flag_is_read_when_the_observation_fires() {
    let mut d = driver(cells_on());
    let mut s = surface();
    d.mount_row(0);
    let id = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);

    // Armed while idle, then a drag starts and ends before the debounce fires.
    d.cell_observed(&id, Size::new(200, 90), 0);
    assert!(d.cell_pointer_down(&id, corner(bounds), bounds));
    d.pointer_up(20);

    let settled = d.frame(70, &mut s);
    assert_eq!(settled.settled, 1);
    assert_eq!(d.table().row_height(0), Some(40));

    let observed = d.frame(200, &mut s);
    assert_eq!(observed.reported_heights, 1);
    assert_eq!(d.table().row_height(0), Some(90));
}

#[test]
fn cell_observations_are_ignored_when_disabled() {
    let mut d = driver(ResizeOptions::new());
    let mut s = surface();
    d.mount_row(0);
    d.cell_observed(&CellId::new("name", 0), Size::new(200, 90), 0);
    assert_eq!(d.next_deadline_ms(), None);
    assert_eq!(d.frame(500, &mut s), FrameReport::default());
}

#[test]
fn content_style_carries_cell_bounds() {
    let columns = vec![
        ColumnDef::new("name")
            .with_default_width(200)
            .with_cell_resize(CellResize::Custom(
                table_resize::CellResizeConfig::default()
                    .with_height(60, 50, Some(120))
                    .with_max_width(400),
            )),
        ColumnDef::new("age").with_default_width(100),
    ];
    let mut d = Driver::new(TableResize::in_memory(columns, cells_on()));
    d.mount_row(0);
    let cell = d.cell(&CellId::new("name", 0)).unwrap();
    let style = cell.content_style().unwrap();
    assert_eq!(
        style,
        ContentStyle {
            min_width: 80,
            max_width: Some(400),
            min_height: 50,
            max_height: Some(120),
            height: Some(60),
        }
    );
    assert_eq!(cell.class_name(), "resizable-cell");
}

#[test]
fn remounting_a_cell_replaces_its_timers() {
    let mut d = driver(cells_on());
    d.mount_row(0);
    let id = CellId::new("name", 0);
    d.cell_observed(&id, Size::new(200, 90), 0);
    assert_eq!(d.next_deadline_ms(), Some(200));

    let props = d.table().render_columns()[0].body_cell(0, None);
    d.mount_cell(props);
    assert_eq!(d.next_deadline_ms(), None);
    assert_eq!(d.cell_count(), 2);
    assert!(d.table().index().contains(&id));
}

#[test]
fn unmounted_cells_leave_the_index() {
    let mut d = driver(cells_on());
    d.mount_row(0);
    let id = CellId::new("age", 0);
    assert!(d.unmount_cell(&id));
    assert!(!d.unmount_cell(&id));
    assert!(!d.table().index().contains(&id));
    assert_eq!(d.cell_count(), 1);
}

#[test]
fn teardown_cancels_every_deadline() {
    let store = table_resize::MemoryStore::new();
    let shared: table_resize::SharedStore = std::sync::Arc::new(store.clone());
    let table = TableResize::new(name_age(), cells_on().with_persistence("w"), Some(shared));
    let mut d = Driver::new(table);
    let mut s = surface();
    d.mount_row(0);
    d.mount_row(1);

    let id = CellId::new("name", 0);
    let bounds = Bounds::new(0.0, 0.0, 200.0, 40.0);
    d.cell_observed(&CellId::new("age", 1), Size::new(100, 70), 0);
    assert!(d.cell_pointer_down(&id, corner(bounds), bounds));
    d.pointer_up(10);
    assert!(d.table_mut().commit_header_width("age", 140, 10));
    assert!(d.table().has_pending_save());
    assert_eq!(d.next_deadline_ms(), Some(60));

    d.teardown();
    assert_eq!(d.cell_count(), 0);
    assert!(d.table().index().is_empty());
    assert_eq!(d.next_deadline_ms(), None);

    assert_eq!(d.frame(5_000, &mut s), FrameReport::default());
    assert_eq!(s.cell(&CellId::new("age", 0)).unwrap().size.height, 40);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn teardown_mid_header_drag_commits_nothing() {
    let mut d = driver(ResizeOptions::new());
    d.header_drag_start("name", Point::new(0.0, 0.0), None);
    d.teardown();
    assert!(!d.header("name").unwrap().is_resizing());
    assert!(!d.header_drag_stop("name", Point::new(80.0, 0.0), 10));
    assert_eq!(d.table().column_width("name"), Some(200));
}

#[test]
fn column_changes_resync_headers() {
    let mut d = driver(ResizeOptions::new());
    let mut next = name_age();
    next.push(ColumnDef::new("email").with_default_width(180));
    d.table_mut().set_columns(next);
    d.sync_headers();

    assert!(d.header("age").unwrap().has_handle());
    assert!(!d.header("email").unwrap().has_handle());

    let email = ColumnDef::new("email").with_default_width(180);
    d.table_mut().set_columns(vec![email]);
    d.sync_headers();
    assert!(d.header("name").is_none());
    assert_eq!(d.headers().count(), 1);
}
