use std::fs;
use tasktalk_core::{
    Assistant, DispatchError, FileTaskRepository, InMemoryTaskRepository, SessionState,
    FAREWELL_MESSAGE, NO_MATCHES_MESSAGE, NO_TASKS_MESSAGE,
};

fn fresh_assistant() -> Assistant<InMemoryTaskRepository> {
    Assistant::start(InMemoryTaskRepository::new(), "TaskTalk")
}

#[test]
fn todo_reply_echoes_task_and_count() {
    let mut assistant = fresh_assistant();

    let reply = assistant.execute("todo read book").unwrap();

    assert!(reply.contains("[T][ ] read book"), "reply: {reply}");
    assert!(reply.contains("1 task"), "reply: {reply}");
    assert_eq!(assistant.tasks().len(), 1);
}

#[test]
fn mark_reply_shows_done_task() {
    let mut assistant = fresh_assistant();
    assistant.execute("todo read book").unwrap();

    let reply = assistant.execute("mark 1").unwrap();
    assert!(reply.contains("[T][X] read book"), "reply: {reply}");

    let reply = assistant.execute("unmark 1").unwrap();
    assert!(reply.contains("[T][ ] read book"), "reply: {reply}");
}

#[test]
fn deadline_reply_shows_due_date() {
    let mut assistant = fresh_assistant();

    let reply = assistant
        .execute("deadline submit report /by 2024-12-01")
        .unwrap();

    assert!(
        reply.contains("[D][ ] submit report (by: 2024-12-01)"),
        "reply: {reply}"
    );
}

#[test]
fn delete_out_of_range_keeps_count() {
    let mut assistant = fresh_assistant();
    assistant.execute("todo read book").unwrap();

    let reply = assistant.execute("delete 5").unwrap();

    assert!(reply.contains("does not exist"), "reply: {reply}");
    assert!(reply.contains("1 to 1"), "reply: {reply}");
    assert_eq!(assistant.tasks().len(), 1);
}

#[test]
fn oversized_index_is_reported_out_of_range() {
    let mut assistant = fresh_assistant();
    assistant.execute("todo read book").unwrap();

    let reply = assistant.execute("delete 99999999999999999999999").unwrap();

    assert!(reply.contains("does not exist"), "reply: {reply}");
    assert!(reply.contains("1 to 1"), "reply: {reply}");
    assert_eq!(assistant.tasks().len(), 1);
}

#[test]
fn borrowed_repository_keeps_saves_visible_to_caller() {
    let repo = InMemoryTaskRepository::new();
    {
        let mut assistant = Assistant::start(&repo, "TaskTalk");
        assistant.execute("todo read book").unwrap();
        assistant.execute("mark 1").unwrap();
        assistant.execute("list").unwrap();
    }

    assert_eq!(repo.save_count(), 2);
    assert_eq!(repo.records().unwrap(), "1 | T | read book\n");
}

#[test]
fn inverted_event_is_rejected_without_adding() {
    let mut assistant = fresh_assistant();

    let reply = assistant
        .execute("event trip /from 2024-01-10 /to 2024-01-05")
        .unwrap();

    assert!(reply.contains("can't add that task"), "reply: {reply}");
    assert!(reply.contains("cannot end"), "reply: {reply}");
    assert!(assistant.tasks().is_empty());
    assert_eq!(assistant.repository().save_count(), 0);
}

#[test]
fn find_lists_matches_or_fixed_message() {
    let mut assistant = fresh_assistant();
    assistant.execute("todo read book").unwrap();
    assistant.execute("todo buy milk").unwrap();

    let reply = assistant.execute("find book").unwrap();
    assert!(reply.contains("1.[T][ ] read book"), "reply: {reply}");
    assert!(!reply.contains("milk"), "reply: {reply}");

    assert_eq!(assistant.execute("find xyz").unwrap(), NO_MATCHES_MESSAGE);
    assert_eq!(assistant.execute("find").unwrap(), NO_MATCHES_MESSAGE);
}

#[test]
fn list_numbers_tasks_in_order() {
    let mut assistant = fresh_assistant();
    assert_eq!(assistant.execute("list").unwrap(), NO_TASKS_MESSAGE);

    assistant.execute("todo read book").unwrap();
    assistant
        .execute("event trip /from 2024-01-05 /to 2024-01-10")
        .unwrap();

    assert_eq!(
        assistant.execute("list").unwrap(),
        "Here are the tasks in your list:\n\
         1.[T][ ] read book\n\
         2.[E][ ] trip (from: 2024-01-05 to: 2024-01-10)"
    );
}

#[test]
fn delete_reports_removed_task_and_new_count() {
    let mut assistant = fresh_assistant();
    assistant.execute("todo read book").unwrap();
    assistant.execute("todo buy milk").unwrap();

    let reply = assistant.execute("delete 1").unwrap();

    assert!(reply.contains("[T][ ] read book"), "reply: {reply}");
    assert!(reply.contains("Now you have 1 task in the list."), "reply: {reply}");
    assert_eq!(assistant.tasks().get(1).unwrap().description(), "buy milk");
}

#[test]
fn saves_exactly_once_per_successful_mutation() {
    let mut assistant = fresh_assistant();
    let script = [
        ("todo read book", 1),
        ("deadline submit report /by 2024-12-01", 2),
        ("list", 2),
        ("find book", 2),
        ("mark 1", 3),
        ("mark 1", 4),
        ("mark 7", 4),
        ("unmark 1", 5),
        ("delete 9", 5),
        ("todo", 5),
        ("nonsense", 5),
        ("delete 2", 6),
    ];

    for (input, expected_saves) in script {
        assistant.execute(input).unwrap();
        assert_eq!(
            assistant.repository().save_count(),
            expected_saves,
            "after `{input}`"
        );
    }
    assert_eq!(
        assistant.repository().records().unwrap(),
        "0 | T | read book\n"
    );
}

#[test]
fn invalid_input_replies_with_reason() {
    let mut assistant = fresh_assistant();

    assert_eq!(
        assistant.execute("todo").unwrap(),
        "The description of a todo cannot be empty."
    );
    assert_eq!(
        assistant.execute("dance").unwrap(),
        "Sorry, I don't know what `dance` means."
    );
    assert!(assistant
        .execute("deadline report")
        .unwrap()
        .contains("Usage: deadline"));
    assert!(assistant
        .execute("mark one")
        .unwrap()
        .contains("not a valid task number"));
}

#[test]
fn bye_terminates_session() {
    let mut assistant = fresh_assistant();

    assert_eq!(assistant.state(), SessionState::Running);
    assert_eq!(assistant.execute("bye").unwrap(), FAREWELL_MESSAGE);
    assert_eq!(assistant.state(), SessionState::Terminated);

    assert_eq!(
        assistant.execute("todo read book").unwrap_err(),
        DispatchError::SessionTerminated
    );
    assert!(assistant.tasks().is_empty());
    assert!(assistant
        .get_response("list")
        .contains("no further input"));
}

#[test]
fn startup_imports_existing_records() {
    let repo = InMemoryTaskRepository::with_records(
        "1 | T | read book\nbroken line\n0 | D | submit report | 2024-12-01\n",
    );
    let mut assistant = Assistant::start(repo, "TaskTalk");

    assert_eq!(assistant.tasks().len(), 2);
    assert_eq!(
        assistant.startup_notices()[0],
        "I found a memory file! Your tasks have been imported."
    );
    assert!(assistant.startup_notices()[1].contains("line 2"));
    assert!(assistant
        .execute("list")
        .unwrap()
        .contains("1.[T][X] read book"));
}

#[test]
fn startup_creates_missing_store_and_greets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let assistant = Assistant::start(FileTaskRepository::new(&path), "Duke");

    assert_eq!(
        assistant.greeting(),
        "Hello, I'm Duke!\nWhat can I do for you?"
    );
    assert_eq!(
        assistant.startup_notices(),
        [format!("{} not found. File has been created.", path.display())]
    );
    assert!(path.exists());
}

#[test]
fn storage_failures_do_not_stop_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let repo = FileTaskRepository::new(blocker.join("tasks.txt"));
    let mut assistant = Assistant::start(repo, "TaskTalk");

    assert!(assistant.startup_notices()[0].contains("Starting with an empty list"));
    assert!(assistant.tasks().is_empty());

    let reply = assistant.execute("todo read book").unwrap();
    assert!(reply.contains("[T][ ] read book"), "reply: {reply}");
    assert!(reply.contains("Warning: I couldn't save"), "reply: {reply}");
    assert_eq!(assistant.tasks().len(), 1);

    let reply = assistant.execute("mark 1").unwrap();
    assert!(reply.contains("[T][X] read book"), "reply: {reply}");
}

#[test]
fn mutations_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    {
        let mut assistant = Assistant::start(FileTaskRepository::new(&path), "TaskTalk");
        assistant.execute("todo read book").unwrap();
        assistant
            .execute("event trip /from 2024-01-05 1000 /to 2024-01-10")
            .unwrap();
        assistant.execute("mark 2").unwrap();
        assistant.execute("bye").unwrap();
    }

    let mut assistant = Assistant::start(FileTaskRepository::new(&path), "TaskTalk");
    assert_eq!(
        assistant.execute("list").unwrap(),
        "Here are the tasks in your list:\n\
         1.[T][ ] read book\n\
         2.[E][X] trip (from: 2024-01-05 10:00 to: 2024-01-10)"
    );
}
