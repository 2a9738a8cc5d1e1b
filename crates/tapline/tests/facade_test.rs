//! End-to-end use of the facade: configure, tap, persist.

use std::time::Duration;

use tapline::prelude::*;
use tapline::{PersistError, SelectionPersistState};

/// Ten 50px rows.
struct Rows {
    ids: Vec<ItemId>,
    clicked: Vec<usize>,
}

impl Rows {
    fn new() -> Self {
        Self {
            ids: (0..10).map(|i| 70 + i).collect(),
            clicked: Vec::new(),
        }
    }
}

impl ItemSource for Rows {
    fn item_count(&self) -> usize {
        self.ids.len()
    }

    fn item_id(&self, position: usize) -> Option<ItemId> {
        self.ids.get(position).copied()
    }

    fn has_stable_ids(&self) -> bool {
        true
    }
}

impl ItemClickListener for Rows {
    fn on_item_click(&mut self, position: usize, _id: ItemId) -> bool {
        self.clicked.push(position);
        true
    }
}

impl ListHost for Rows {
    fn hit_test(&self, point: Point) -> Option<usize> {
        let row = (point.y / 50.0) as usize;
        (point.y >= 0.0 && row < self.ids.len()).then_some(row)
    }
}

fn tap(list: &mut ListInteraction, host: &mut Rows, row: usize, at: Instant) {
    let y = row as f32 * 50.0 + 25.0;
    let _ = list.on_touch(&TouchFrame::down(0, 10.0, y, at), host);
    let _ = list.on_touch(
        &TouchFrame::up(0, 10.0, y, at + Duration::from_millis(40)),
        host,
    );
}

#[test]
fn configured_interaction_taps_without_double_tap_delay() {
    let mut config = InteractionConfig::default();
    config.gesture.double_tap_enabled = false;
    let mut list = config.build_interaction();
    let mut host = Rows::new();
    list.set_choice_mode(ChoiceMode::Multiple, &mut host);

    let t0 = Instant::now();
    tap(&mut list, &mut host, 2, t0);
    tap(&mut list, &mut host, 2, t0 + Duration::from_millis(100));
    tap(&mut list, &mut host, 6, t0 + Duration::from_millis(200));

    // Two quick taps on row 2 are two toggles, not a double tap.
    assert_eq!(host.clicked, [2, 2, 6]);
    assert!(!list.is_item_checked(2, &host));
    assert!(list.is_item_checked(6, &host));
}

#[test]
fn saved_selection_survives_a_new_interaction() -> tapline::Result<()> {
    let mut host = Rows::new();
    let mut list = ListInteraction::default();
    list.set_choice_mode(ChoiceMode::Multiple, &mut host);
    list.set_item_checked(1, true, &mut host);
    list.set_item_checked(8, true, &mut host);
    let saved = list.save_selection();

    let mut restored = ListInteraction::default();
    restored.restore_selection(saved, &mut host)?;
    assert_eq!(restored.selection().checked_ids(), [71, 78]);
    assert_eq!(restored.selection().checked_count(), 2);
    Ok(())
}

#[test]
fn corrupt_record_surfaces_as_persist_error() {
    let mut host = Rows::new();
    let mut list = ListInteraction::default();
    let record = SelectionPersistState {
        choice_mode: ChoiceMode::Single,
        checked_positions: vec![(1, true), (4, true)],
        checked_ids: Vec::new(),
        checked_count: 2,
        tracks_ids: false,
    };

    let result: tapline::Result<()> = list
        .restore_selection(record, &mut host)
        .map_err(tapline::Error::from);
    let err = result.unwrap_err();
    assert_eq!(err.error_type(), "persist");
    assert!(matches!(
        err,
        tapline::Error::Persist(PersistError::TooManyChecked { count: 2, .. })
    ));
    // The failed restore left the store untouched.
    assert_eq!(list.selection().choice_mode(), ChoiceMode::None);
}

#[cfg(feature = "config")]
#[test]
fn config_file_drives_the_reconcile_window() -> tapline::Result<()> {
    use std::io::Write as _;

    let mut file = tempfile::NamedTempFile::new().map_err(tapline::ConfigError::Io)?;
    writeln!(file, "[selection]\nsearch_window = 2").map_err(tapline::ConfigError::Io)?;
    let config = InteractionConfig::from_toml_file(file.path())?.validated()?;
    assert_eq!(config.selection.search_window, 2);

    let mut host = Rows::new();
    let mut list = config.build_interaction();
    list.set_choice_mode(ChoiceMode::Multiple, &mut host);
    list.set_item_checked(0, true, &mut host);

    // Push the checked item three rows down: outside a window of two.
    for _ in 0..3 {
        host.ids.insert(0, 999);
    }
    let report = list.on_data_set_changed(&mut host);
    assert_eq!(report.dropped, [70]);
    assert_eq!(list.selection().checked_count(), 0);
    Ok(())
}
