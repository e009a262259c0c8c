//! A small list UI driven by a store, rendered to stdout.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use itemstore::labels::render_title;
use itemstore::{AppState, Item, Locale, MemoryStorage, Store, StoreConfig};

fn render(state: &AppState, locale: Locale) {
    for item in &state.list {
        let marker = if item.selected { '>' } else { ' ' };
        println!("{marker} {:>3}  {}", item.code, render_title(item, locale));
    }
    println!();
}

fn main() -> itemstore::Result<()> {
    let locale = Locale::English;
    let storage = MemoryStorage::new();
    let store = Store::with_config(
        AppState::new(vec![
            Item::new(1, "Name of item"),
            Item::new(2, "Some item"),
            Item::new(3, "Headphones"),
        ]),
        storage.clone(),
        StoreConfig::default().with_locale(locale),
    )?;

    let renders = Arc::new(AtomicUsize::new(0));
    let renders_clone = renders.clone();
    let subscription = store.subscribe(move || {
        renders_clone.fetch_add(1, Ordering::SeqCst);
    });

    println!("=== Initial ===");
    render(&store.get_state()?, locale);

    println!("=== Add two entries ===");
    store.add_item()?;
    store.add_item()?;
    render(&store.get_state()?, locale);

    println!("=== Select 2, then 3 three times ===");
    store.select_item(2)?;
    for _ in 0..3 {
        store.select_item(3)?;
    }
    render(&store.get_state()?, locale);

    println!("=== Delete 1 ===");
    store.delete_item(1)?;
    render(&store.get_state()?, locale);

    subscription.unsubscribe();
    store.add_item()?;

    println!("listener saw {} changes", renders.load(Ordering::SeqCst));
    println!("stored counter: {:?}", store.current_code());
    println!("state as JSON: {}", store.get_state()?.to_json()?);

    Ok(())
}
