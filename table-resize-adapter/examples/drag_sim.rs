use table_resize::{
    Bounds, CellId, ColumnDef, MemorySurface, Point, ResizeOptions, Size, TableResize,
};
use table_resize_adapter::Driver;

fn main() {
    // Example: a header drag and a cell corner drag driven by a virtual clock.
    //
    // An adapter would:
    // - forward pointer and resize-observer events to the driver
    // - call frame(now_ms, surface) from its frame loop / timers
    // - re-render from the header props and cell styles afterwards
    let columns = vec![
        ColumnDef::new("name").with_default_width(200),
        ColumnDef::new("age").with_default_width(100),
    ];
    let options = ResizeOptions::new().with_cell_content_resize(true);
    let table = TableResize::in_memory(columns, options);
    let mut d = Driver::new(table);

    let mut surface = MemorySurface::new();
    for row in 0..3 {
        surface.insert(CellId::new("name", row), Size::new(200, 40), 180);
        surface.insert(CellId::new("age", row), Size::new(100, 40), 40);
        d.mount_row(row);
    }

    let mut now_ms = 0u64;
    d.header_drag_start("name", Point::new(200.0, 10.0), None);
    for x in [210.0, 230.0, 260.0] {
        now_ms += 16;
        d.header_drag_move("name", Point::new(x, 10.0));
        if let Some(h) = d.header("name") {
            println!("t={now_ms} tooltip={}", h.tooltip().label());
        }
        d.frame(now_ms, &mut surface);
    }
    d.header_drag_stop("name", Point::new(260.0, 10.0), now_ms);
    println!("name width={:?}", d.table().column_width("name"));

    let cell = CellId::new("age", 1);
    let bounds = Bounds::new(260.0, 40.0, 100.0, 40.0);
    d.cell_pointer_down(&cell, Point::new(355.0, 75.0), bounds);
    surface.resize(&cell, Size::new(140, 72));
    d.pointer_up(now_ms);

    while let Some(due) = d.next_deadline_ms() {
        now_ms = due;
        let report = d.frame(now_ms, &mut surface);
        println!("t={now_ms} {report:?}");
    }

    for row in 0..3 {
        println!(
            "row {row}: name={:?} age={:?}",
            surface.cell(&CellId::new("name", row)).map(|b| b.size),
            surface.cell(&CellId::new("age", row)).map(|b| b.size),
        );
    }
}
