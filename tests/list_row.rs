use std::cell::RefCell;
use std::rc::Rc;

use tessella::prelude::*;
use tessella::widgets::TextSlot;

fn row() -> ListRow {
    ListRow::new(&Theme::default())
}

fn recorded(row: &mut ListRow) -> Rc<RefCell<Vec<ListRowEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    row.connect(move |e| sink.borrow_mut().push(e.clone()));
    events
}

#[test]
fn test_visible_slots_match_texts_for_any_length() {
    let mut row = row();
    for n in [0usize, 3, 1, 5, 0, 2] {
        let texts: Vec<String> = (0..n).map(|i| format!("row {}", i)).collect();
        row.set_texts(texts.clone());

        assert_eq!(row.visible_slots(), (0..n).collect::<Vec<_>>().as_slice());
        assert_eq!(row.visible_texts(), texts.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(row.pool_len() >= n);
    }
    assert_eq!(row.pool_len(), 5);
}

#[test]
fn test_shrink_then_grow_scenario() {
    let mut row = row();
    row.set_texts(["A", "B", "C"]);
    row.set_texts(["X", "Y"]);
    assert_eq!(row.visible_texts(), vec!["X", "Y"]);
    assert_eq!(row.pool_len(), 3);

    row.set_texts(["P", "Q", "R", "S"]);
    assert_eq!(row.visible_texts(), vec!["P", "Q", "R", "S"]);
    assert_eq!(row.visible_slots(), &[0, 1, 2, 3]);
    assert!(row.pool_len() >= 4);
}

#[test]
fn test_surviving_indices_keep_their_slot() {
    let mut row = row();
    row.set_texts(["A", "B", "C"]);
    let before: Vec<*const TextSlot> = (0..3)
        .map(|i| row.slot(i).unwrap() as *const TextSlot)
        .collect();

    row.set_texts(["A"]);
    row.set_texts(["A", "B2", "C2", "D"]);
    for (i, ptr) in before.iter().enumerate() {
        assert_eq!(row.slot(i).unwrap() as *const TextSlot, *ptr);
    }
    assert_eq!(row.slot(0).unwrap().text(), "A");
}

#[test]
fn test_retained_slots_keep_stale_content() {
    let mut row = row();
    row.set_texts(["A", "B", "C"]);
    row.set_texts(["X"]);
    assert_eq!(row.slot(2).map(|s| s.text()), Some("C"));
    assert!(!row.visible_slots().contains(&2));
}

#[test]
fn test_empty_list_retains_pool() {
    let mut row = row();
    row.set_texts(["A", "B"]);
    row.set_texts(Vec::<String>::new());
    assert_eq!(row.pool_len(), 2);
    assert!(row.visible_slots().is_empty());
}

#[test]
fn test_interactive_toggle_reaches_every_slot() {
    let mut empty = row();
    empty.set_interactive(true);
    empty.set_interactive(false);
    assert!(!empty.is_interactive());
    assert_eq!(empty.pool_len(), 0);

    let mut row = row();
    row.set_texts(["A", "B", "C"]);
    row.set_texts(["A"]);
    row.set_interactive(true);
    row.set_interactive(false);
    for i in 0..row.pool_len() {
        assert!(!row.slot(i).unwrap().attachment().interactive);
    }
}

#[test]
fn test_new_slots_take_current_attributes() {
    let mut row = row();
    row.set_texts(["A"]);
    let font = Font::new(FontFamily::Monospace, 22.0).weight(FontWeight::BOLD);
    row.set_font(font.clone());
    row.set_horizontal_alignment(HorizontalAlignment::Right);
    row.set_interactive(true);
    row.set_text_height(18.0);
    row.set_texts(["A", "B", "C"]);

    for i in 0..3 {
        let slot = row.slot(i).unwrap();
        assert_eq!(slot.font(), &font);
        assert_eq!(slot.horizontal_alignment(), HorizontalAlignment::Right);
        assert!(slot.attachment().interactive);
        assert_eq!(slot.attachment().thickness, 18.0);
    }
}

#[test]
fn test_setters_notify_only_on_change() {
    let mut row = row();
    let events = recorded(&mut row);

    row.set_font(row.font().clone());
    row.set_vertical_alignment(row.vertical_alignment());
    row.set_interactive(false);
    row.set_text_height(row.text_height());
    assert!(events.borrow().is_empty());

    row.set_vertical_alignment(VerticalAlignment::Top);
    row.set_text_height(40.0);
    assert_eq!(
        *events.borrow(),
        vec![
            ListRowEvent::VerticalAlignmentChanged,
            ListRowEvent::TextHeightChanged
        ]
    );
}

#[test]
fn test_set_text_out_of_range_is_ignored() {
    let mut row = row();
    row.set_texts(["A"]);
    let events = recorded(&mut row);

    row.set_text(3, "Z");
    assert_eq!(row.pool_len(), 1);
    row.set_text(0, "Z");
    assert_eq!(row.visible_texts(), vec!["Z"]);
    assert_eq!(row.texts(), &["A".to_string()]);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_action_mutation_resyncs_from_texts() {
    let mut row = row();
    let events = recorded(&mut row);
    row.set_texts(["A", "B"]);
    row.set_text(1, "edited");

    row.push_action(Action::new("Open"));
    assert_eq!(row.visible_texts(), vec!["A", "B"]);
    assert_eq!(row.action_count(), 1);
    assert_eq!(row.action_at(0).map(Action::label), Some("Open"));

    row.clear_actions();
    row.clear_actions();
    assert_eq!(
        *events.borrow(),
        vec![
            ListRowEvent::TextsChanged,
            ListRowEvent::ActionsChanged,
            ListRowEvent::ActionsChanged
        ]
    );
}

#[test]
fn test_press_on_interactive_slot_activates_it() {
    let mut row = row();
    row.set_padding(Padding::all(0.0));
    row.set_text_height(10.0);
    row.set_texts(["A", "B"]);
    row.layout(Constraints::loose(Size::new(100.0, 100.0)));
    let events = recorded(&mut row);

    let press = Event::MouseDown {
        x: 5.0,
        y: 15.0,
        button: MouseButton::Left,
    };
    assert_eq!(row.event(&press), EventResponse::Ignored);

    row.set_interactive(true);
    assert_eq!(row.event(&press), EventResponse::Handled);
    assert_eq!(events.borrow().last(), Some(&ListRowEvent::SlotActivated(1)));
}

#[test]
fn test_structural_changes_schedule_layout() {
    let mut row = row();
    drain_pending_jobs();
    row.set_texts(["A"]);
    let jobs = drain_pending_jobs();
    assert!(jobs.contains(&Job {
        widget_id: row.id(),
        job_type: JobType::Layout
    }));
    assert!(row.needs_layout());
}
