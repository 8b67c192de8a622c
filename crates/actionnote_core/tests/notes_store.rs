use actionnote_core::db::open_db_in_memory;
use actionnote_core::{
    ActionItemListQuery, ActionItemRepository, ActionItemService, NoteRepository, NoteService,
    RepoError, ServiceError, SqliteActionItemRepository, SqliteNoteRepository, ValidationError,
};
use rusqlite::Connection;

#[test]
fn create_note_trims_content_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service.create_note("  Meeting notes from today \n").unwrap();
    assert_eq!(created.content, "Meeting notes from today");
    assert!(created.id > 0);
    assert!(!created.created_at.is_empty());

    let loaded = service.get_note(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_note_rejects_blank_content() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let err = service.create_note(" \n\t ").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidInput(ValidationError::EmptyText { field: "content" })
    ));
    assert_eq!(service.list_notes().unwrap().count, 0);
}

#[test]
fn get_missing_note_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let err = service.get_note(42).unwrap_err();
    assert!(matches!(err, ServiceError::NoteNotFound(42)));
    assert_eq!(err.to_string(), "Note with id 42 not found");
}

#[test]
fn notes_list_is_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let first = service.create_note("first").unwrap();
    let second = service.create_note("second").unwrap();

    let listed = service.list_notes().unwrap();
    assert_eq!(listed.count, 2);
    assert_eq!(listed.items[0].id, second.id);
    assert_eq!(listed.items[1].id, first.id);
}

#[test]
fn action_items_bulk_insert_preserves_order_and_links_note() {
    let conn = open_db_in_memory().unwrap();
    let note_id = SqliteNoteRepository::try_new(&conn)
        .unwrap()
        .create_note("source")
        .unwrap();
    let repo = SqliteActionItemRepository::try_new(&conn).unwrap();

    let ids = repo
        .create_action_items(&["one".to_string(), "two".to_string()], Some(note_id))
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] < ids[1]);

    let first = repo.get_action_item(ids[0]).unwrap().unwrap();
    assert_eq!(first.text, "one");
    assert_eq!(first.note_id, Some(note_id));
    assert!(!first.done);
}

#[test]
fn empty_bulk_insert_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActionItemRepository::try_new(&conn).unwrap();

    assert!(repo.create_action_items(&[], None).unwrap().is_empty());
    assert!(repo
        .list_action_items(&ActionItemListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn list_action_items_filters_by_note() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::try_new(&conn).unwrap();
    let note_a = notes.create_note("a").unwrap();
    let note_b = notes.create_note("b").unwrap();
    let repo = SqliteActionItemRepository::try_new(&conn).unwrap();
    repo.create_action_items(&["a1".to_string(), "a2".to_string()], Some(note_a))
        .unwrap();
    repo.create_action_items(&["b1".to_string()], Some(note_b))
        .unwrap();
    repo.create_action_items(&["loose".to_string()], None)
        .unwrap();

    let service = ActionItemService::new(repo);
    let all = service.list_action_items(None).unwrap();
    assert_eq!(all.count, 4);
    assert_eq!(all.items[0].text, "loose");

    let only_a = service.list_action_items(Some(note_a)).unwrap();
    let texts: Vec<&str> = only_a.items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(texts, vec!["a2", "a1"]);
}

#[test]
fn mark_done_toggles_and_reports_missing_items() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActionItemRepository::try_new(&conn).unwrap();
    let ids = repo.create_action_items(&["ship".to_string()], None).unwrap();
    let service = ActionItemService::new(repo);

    let result = service.mark_done(ids[0], true).unwrap();
    assert!(result.done);
    assert!(service.get_action_item(ids[0]).unwrap().done);

    service.mark_done(ids[0], false).unwrap();
    assert!(!service.get_action_item(ids[0]).unwrap().done);

    let err = service.mark_done(999, true).unwrap_err();
    assert!(matches!(err, ServiceError::ActionItemNotFound(999)));
    assert_eq!(err.to_string(), "Action item with id 999 not found");
}

#[test]
fn deleting_note_unlinks_its_action_items() {
    let conn = open_db_in_memory().unwrap();
    let note_id = SqliteNoteRepository::try_new(&conn)
        .unwrap()
        .create_note("temporary")
        .unwrap();
    let repo = SqliteActionItemRepository::try_new(&conn).unwrap();
    let ids = repo
        .create_action_items(&["survives".to_string()], Some(note_id))
        .unwrap();

    conn.execute("DELETE FROM notes WHERE id = ?1;", [note_id])
        .unwrap();

    let item = repo.get_action_item(ids[0]).unwrap().unwrap();
    assert_eq!(item.note_id, None);
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteNoteRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));

    let err = SqliteActionItemRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable(_)));
}
