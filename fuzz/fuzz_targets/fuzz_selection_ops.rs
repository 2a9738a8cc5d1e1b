#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tapline_selection::{
    ChoiceMode, ItemId, SelectionConfig, SelectionStore, Stateful,
};

#[derive(Debug, Arbitrary)]
enum Op {
    Mode(u8),
    Check(u8, bool),
    Clear,
    Insert(u8),
    Remove(u8),
    Move(u8, u8),
    SaveRestore,
}

#[derive(Debug, Arbitrary)]
struct Input {
    initial: u8,
    window: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 256 {
        return;
    }
    let mut next_id: ItemId = 0;
    let mut items: Vec<ItemId> = (0..u64::from(input.initial % 64)).collect();
    next_id += items.len() as ItemId;

    let mut store = SelectionStore::new(SelectionConfig {
        search_window: usize::from(input.window % 32),
        ..SelectionConfig::default()
    });

    for op in &input.ops {
        match *op {
            Op::Mode(m) => {
                let mode = match m % 3 {
                    0 => ChoiceMode::None,
                    1 => ChoiceMode::Single,
                    _ => ChoiceMode::Multiple,
                };
                let _ = store.set_choice_mode(mode, items.as_slice());
            }
            Op::Check(pos, checked) => {
                let _ = store.set_item_checked(usize::from(pos), checked, items.as_slice());
            }
            Op::Clear => {
                let _ = store.clear_choices();
            }
            Op::Insert(pos) => {
                let at = usize::from(pos).min(items.len());
                items.insert(at, next_id);
                next_id += 1;
                let _ = store.on_data_set_changed(items.as_slice());
            }
            Op::Remove(pos) => {
                if !items.is_empty() {
                    items.remove(usize::from(pos) % items.len());
                }
                let _ = store.on_data_set_changed(items.as_slice());
            }
            Op::Move(from, to) => {
                if !items.is_empty() {
                    let id = items.remove(usize::from(from) % items.len());
                    let at = usize::from(to).min(items.len());
                    items.insert(at, id);
                }
                let _ = store.on_data_set_changed(items.as_slice());
            }
            Op::SaveRestore => {
                let saved = store.save_state();
                let mut fresh = SelectionStore::new(*store.config());
                fresh
                    .try_restore_state(saved)
                    .expect("a saved record always validates");
                store = fresh;
            }
        }

        let checked: Vec<usize> = store.checked_positions().collect();
        assert_eq!(checked.len(), store.checked_count(), "count drift");
        match store.choice_mode() {
            ChoiceMode::None => assert_eq!(store.checked_count(), 0),
            ChoiceMode::Single => assert!(store.checked_count() <= 1),
            ChoiceMode::Multiple => {}
        }
        if store.tracks_ids() {
            for (id, pos) in store.checked_id_positions() {
                assert_eq!(items.get(pos), Some(&id), "identity not at its position");
                assert!(store.is_item_checked(pos));
            }
            assert_eq!(store.checked_ids().len(), store.checked_count());
        }
    }
});
