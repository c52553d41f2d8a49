use tasktalk_core::{IndexOutOfRange, Task, TaskKind, TaskList};

fn basic(description: &str) -> Task {
    Task::create(description, TaskKind::Basic).unwrap()
}

fn list_of(descriptions: &[&str]) -> TaskList {
    let mut tasks = TaskList::new();
    for description in descriptions {
        tasks.add(basic(description));
    }
    tasks
}

#[test]
fn add_returns_one_based_index() {
    let mut tasks = TaskList::new();
    assert_eq!(tasks.add(basic("first")), 1);
    assert_eq!(tasks.add(basic("second")), 2);
    assert_eq!(tasks.len(), 2);
}

#[test]
fn get_returns_task_added_at_position() {
    let tasks = list_of(&["a", "b", "c"]);
    for (index, expected) in [(1, "a"), (2, "b"), (3, "c")] {
        assert_eq!(tasks.get(index).unwrap().description(), expected);
    }
}

#[test]
fn indices_outside_range_are_rejected() {
    let tasks = list_of(&["a", "b"]);
    for index in [0, 3, 4, usize::MAX] {
        assert_eq!(
            tasks.get(index).unwrap_err(),
            IndexOutOfRange { index, len: 2 }
        );
    }

    let empty = TaskList::new();
    let err = empty.get(1).unwrap_err();
    assert_eq!(err, IndexOutOfRange { index: 1, len: 0 });
    assert!(err.to_string().contains("empty"));
}

#[test]
fn out_of_range_message_names_valid_range() {
    let tasks = list_of(&["a"]);
    assert_eq!(
        tasks.get(5).unwrap_err().to_string(),
        "task 5 does not exist; pick a number from 1 to 1"
    );
}

#[test]
fn remove_shifts_later_tasks_up() {
    let mut tasks = list_of(&["a", "b", "c"]);
    let removed = tasks.remove(2).unwrap();

    assert_eq!(removed.description(), "b");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks.get(2).unwrap().description(), "c");
    assert!(tasks.remove(3).is_err());
    assert_eq!(tasks.len(), 2);
}

#[test]
fn mark_at_sets_and_clears_done() {
    let mut tasks = list_of(&["a", "b"]);

    assert!(tasks.mark_at(2, true).unwrap().is_done());
    assert!(tasks.mark_at(2, true).unwrap().is_done());
    assert!(!tasks.get(1).unwrap().is_done());
    assert!(!tasks.mark_at(2, false).unwrap().is_done());
    assert!(tasks.mark_at(9, true).is_err());
}

#[test]
fn find_is_case_insensitive_and_keeps_order() {
    let tasks = list_of(&["Read BOOK", "buy milk", "return book", "booking"]);
    let matches = tasks
        .find_by_keyword("book")
        .into_iter()
        .map(|(index, task)| (index, task.description().to_string()))
        .collect::<Vec<_>>();

    assert_eq!(
        matches,
        vec![
            (1, "Read BOOK".to_string()),
            (3, "return book".to_string()),
            (4, "booking".to_string()),
        ]
    );
}

#[test]
fn find_with_blank_keyword_matches_nothing() {
    let tasks = list_of(&["a", "b"]);
    assert!(tasks.find_by_keyword("").is_empty());
    assert!(tasks.find_by_keyword("   ").is_empty());
    assert!(tasks.find_by_keyword("zzz").is_empty());
}
