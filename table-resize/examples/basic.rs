// Example: commit widths, persist them, and read them back on the next "page load".
use std::sync::Arc;

use table_resize::{ColumnDef, MemoryStore, ResizeEvent, ResizeOptions, SharedStore, TableResize};

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name")
            .with_title("Name")
            .with_default_width(200),
        ColumnDef::new("age")
            .with_title("Age")
            .with_default_width(100),
        ColumnDef::new("address").with_title("Address"),
    ]
}

fn main() {
    let store = MemoryStore::new();
    let shared: SharedStore = Arc::new(store.clone());
    let options = ResizeOptions::new()
        .with_persistence("users-table")
        .with_on_change(Some(|e: &ResizeEvent| println!("event: {e:?}")));

    let mut t = TableResize::new(columns(), options.clone(), Some(shared.clone()));
    t.commit_header_width("name", 260, 0);
    // Inside the dead zone: discarded.
    t.commit_header_width("name", 261, 10);
    t.tick(600);
    println!("stored={:?}", store.raw("users-table"));

    let reloaded = TableResize::new(columns(), options, Some(shared));
    for c in reloaded.render_columns() {
        println!(
            "{:>8} width={:?} handle={}",
            c.key(),
            c.width,
            c.header.has_handle()
        );
    }
}
