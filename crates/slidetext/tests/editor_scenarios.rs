use std::sync::Arc;

use slidetext::content::starter_deck;
use slidetext::navigation::Direction;
use slidetext::{
    ContainerRect, Deck, Editor, ItemId, ItemPatch, ItemTemplate, PointerEvent, PointerPos,
    Position, Slide, SlideId, StyleInput,
};

fn single_empty_slide() -> Deck {
    Deck::from_slides(vec![Slide::new(SlideId::new("s1"), "bg.jpg")])
}

fn grab(editor: &mut Editor, item: &ItemId, rect: ContainerRect) {
    editor.handle_pointer(PointerEvent::DownOnItem {
        item: item.clone(),
        pointer: PointerPos::new(rect.left, rect.top),
        rect,
    });
}

#[test]
fn add_drag_release_end_to_end() {
    let mut editor = Editor::new(single_empty_slide());

    let id = editor.add_text().expect("active slide exists");
    assert_eq!(editor.selected_item().unwrap().position, Position::new(0.5, 0.5));

    grab(&mut editor, &id, ContainerRect::new(0.0, 0.0, 200.0, 400.0));
    editor.handle_pointer(PointerEvent::Move(PointerPos::new(40.0, 80.0)));
    assert_eq!(editor.selected_item().unwrap().position, Position::new(0.2, 0.2));

    editor.handle_pointer(PointerEvent::Up);
    let after_release = editor.deck().clone();
    for (x, y) in [(0.0, 0.0), (199.0, 399.0), (-50.0, 900.0)] {
        editor.handle_pointer(PointerEvent::Move(PointerPos::new(x, y)));
    }
    assert!(editor.deck().ptr_eq(&after_release));
    assert_eq!(editor.selected_item().unwrap().position, Position::new(0.2, 0.2));
}

#[test]
fn sweep_moves_monotonically_from_corner_to_corner() {
    let mut editor = Editor::new(single_empty_slide());
    let id = editor.add_text().unwrap();
    let rect = ContainerRect::new(100.0, 100.0, 300.0, 500.0);
    grab(&mut editor, &id, rect);

    let mut last = Position::new(0.0, 0.0);
    let steps = 40;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let x = -1000.0 + t * 3000.0;
        let y = -1000.0 + t * 3000.0;
        editor.handle_pointer(PointerEvent::Move(PointerPos::new(x, y)));
        let pos = editor.selected_item().unwrap().position;
        if step == 0 {
            assert_eq!(pos, Position::new(0.0, 0.0));
        }
        assert!(pos.x >= last.x && pos.y >= last.y);
        assert!((0.0..=1.0).contains(&pos.x) && (0.0..=1.0).contains(&pos.y));
        last = pos;
    }
    assert_eq!(last, Position::new(1.0, 1.0));
}

#[test]
fn navigation_clears_selection_regardless_of_prior_state() {
    let mut editor = Editor::new(starter_deck());
    grab(
        &mut editor,
        &ItemId::new("t1"),
        ContainerRect::new(0.0, 0.0, 100.0, 100.0),
    );
    assert!(editor.selected_id().is_some());

    assert!(editor.navigate(2));
    assert!(editor.selected_id().is_none());
    assert!(!editor.is_dragging());
    assert!(!editor.controls().has_selection);

    editor.handle_pointer(PointerEvent::Move(PointerPos::new(0.0, 0.0)));
    assert_eq!(
        editor.deck().item(0, &ItemId::new("t1")).unwrap().position,
        Position::new(0.2, 0.2)
    );
}

#[test]
fn edits_on_one_slide_never_leak_into_another() {
    let mut editor = Editor::new(starter_deck());
    let original = editor.deck().clone();

    editor.add_text();
    editor.apply_style(StyleInput::Text("only here".into()));
    editor.apply_style(StyleInput::FontSize("90".into()));
    grab(
        &mut editor,
        &ItemId::new("t1"),
        ContainerRect::new(0.0, 0.0, 50.0, 50.0),
    );
    editor.handle_pointer(PointerEvent::Move(PointerPos::new(50.0, 0.0)));
    editor.handle_pointer(PointerEvent::Cancel);

    let deck = editor.deck();
    assert_eq!(deck.slide(0).unwrap().items.len(), 2);
    for index in 1..deck.len() {
        assert!(Arc::ptr_eq(&deck.slides()[index], &original.slides()[index]));
        assert_eq!(deck.slide(index), original.slide(index));
    }
}

#[test]
fn unknown_item_edits_return_equal_deck() {
    let deck = starter_deck();
    let ghost = ItemId::new("ghost");
    assert_eq!(deck.update_item(0, &ghost, &ItemPatch::text("boo")), deck);
    assert_eq!(deck.move_item(1, &ghost, Position::new(0.9, 0.9)), deck);
    assert_eq!(deck.update_item(7, &ItemId::new("t1"), &ItemPatch::text("x")), deck);
}

#[test]
fn add_goes_to_active_slide_only() {
    let mut editor = Editor::new(starter_deck()).with_template(ItemTemplate::default());
    assert!(editor.step(Direction::Forward));
    let before = editor.deck().clone();
    let id = editor.add_text().unwrap();

    let deck = editor.deck();
    assert_eq!(deck.slide(1).unwrap().items.len(), 2);
    assert_eq!(deck.slide(1).unwrap().items[1].id, id);
    assert!(Arc::ptr_eq(
        &deck.slide(1).unwrap().items[0],
        &before.slide(1).unwrap().items[0]
    ));
    assert_eq!(deck.slide(0), before.slide(0));
    assert_eq!(deck.slide(2), before.slide(2));
}

#[test]
fn starting_slide_is_clamped() {
    let editor = Editor::new(starter_deck()).starting_at(99);
    assert_eq!(editor.active_index(), Some(2));
}
