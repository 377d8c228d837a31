use std::cell::RefCell;
use std::rc::Rc;

use tagfield::{FieldEvent, FormField, TagController};

#[test]
fn test_seeded_field_add_remove_round_trip() {
    let field = FormField::new("colors").with_value("red,blue");
    let mut controller = TagController::new(field, "colors");

    assert_eq!(controller.value(), vec!["red", "blue"]);

    assert!(controller.add("green"));
    assert_eq!(controller.value(), vec!["red", "blue", "green"]);

    assert!(controller.remove("blue"));
    assert_eq!(controller.value(), vec!["red", "green"]);
    assert_eq!(controller.field().value(), "red,green");
}

fn assert_consistent(controller: &TagController) {
    assert_eq!(controller.field().value(), controller.value().join(","));
    assert!(controller.value().iter().all(|t| !t.is_empty() && !t.contains(',')));
    let chips: Vec<&str> = controller.chips().iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(chips, controller.value());
}

#[test]
fn test_field_value_tracks_every_mutation() {
    let mut controller = TagController::new(FormField::new("tags"), "tags");

    controller.add("a, b");
    assert_consistent(&controller);
    controller.add("b,c,,d ");
    assert_consistent(&controller);
    controller.remove("a");
    assert_consistent(&controller);
    controller.remove("zzz");
    assert_consistent(&controller);
    controller.remove_last();
    assert_consistent(&controller);
    assert_eq!(controller.value(), vec!["b", "c"]);

    controller.set_value(vec!["x", "y", "x"]);
    assert_consistent(&controller);
    controller.add("");
    assert_consistent(&controller);
    assert_eq!(controller.value(), vec!["x", "y"]);
}

#[test]
fn test_listeners_get_one_input_and_one_change_per_mutation() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&events);
    let mut field = FormField::new("tags");
    field.subscribe(move |event, _| recorder.borrow_mut().push(event));
    let mut controller = TagController::new(field, "tags");

    controller.add("a,b");
    controller.add("a");
    controller.remove("missing");
    controller.remove("a");

    assert_eq!(
        *events.borrow(),
        vec![
            FieldEvent::Input,
            FieldEvent::Change,
            FieldEvent::Input,
            FieldEvent::Change,
        ]
    );
}
