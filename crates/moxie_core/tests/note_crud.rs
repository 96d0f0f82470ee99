use moxie_core::db::open_db_in_memory;
use moxie_core::db::schema::create_schema;
use moxie_core::{
    NewNote, NoteId, NoteRepository, NoteService, NoteServiceError, RepoError,
    SqliteNoteRepository,
};
use rusqlite::Connection;

fn ready_connection() -> Connection {
    let conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();
    conn
}

fn note_count(conn: &Connection) -> usize {
    SqliteNoteRepository::try_new(conn)
        .unwrap()
        .find_all()
        .unwrap()
        .len()
}

#[test]
fn empty_store_has_no_notes() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    assert!(service.list_notes().unwrap().is_empty());
}

#[test]
fn create_returns_note_with_positive_id_assigned() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service.create_note("Test title", "Test content").unwrap();

    assert!(created.id.get() > 0);
    assert_eq!(created.title, "Test title");
    assert_eq!(created.content, "Test content");
}

#[test]
fn created_notes_get_unique_ids_and_are_listed() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let first = service.create_note("Awesome", "Awesome content").unwrap();
    let second = service.create_note("Another title", "Another content").unwrap();
    assert_ne!(first.id, second.id);

    let listed = service.list_notes().unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn note_can_be_found_by_id() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let first = service.create_note("Awesome", "Awesome content").unwrap();
    service.create_note("Another title", "Another content").unwrap();

    let found = service.get_note(first.id).unwrap();

    assert_eq!(found, Some(first));
}

#[test]
fn unknown_id_is_not_found() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    assert_eq!(service.get_note(NoteId::new(42)).unwrap(), None);
}

#[test]
fn find_all_orders_by_id() {
    let conn = ready_connection();
    conn.execute_batch(
        "INSERT INTO note (id, title, content) VALUES (30, 'c', 'c');
         INSERT INTO note (id, title, content) VALUES (10, 'a', 'a');
         INSERT INTO note (id, title, content) VALUES (20, 'b', 'b');",
    )
    .unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let ids: Vec<i64> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|note| note.id.get())
        .collect();

    assert_eq!(ids, vec![10, 20, 30]);
}

#[test]
fn service_rejects_blank_title_and_content_without_writing() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    for title in ["", "   "] {
        let err = service.create_note(title, "test content").unwrap_err();
        assert!(matches!(err, NoteServiceError::Validation(_)));
        assert!(err.to_string().contains("title"));
    }
    for content in ["", "   "] {
        let err = service.create_note("test title", content).unwrap_err();
        assert!(matches!(err, NoteServiceError::Validation(_)));
        assert!(err.to_string().contains("content"));
    }

    assert_eq!(note_count(&conn), 0);
}

#[test]
fn storage_rejects_blank_title_and_content() {
    let conn = ready_connection();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    for title in ["", "   "] {
        let err = repo.create_note(&NewNote::new(title, "test content")).unwrap_err();
        match err {
            RepoError::ConstraintViolation(details) => {
                assert!(details.contains("note_non_blank_title"), "{details}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    for content in ["", "   "] {
        let err = repo.create_note(&NewNote::new("test title", content)).unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(ref d) if d.contains("content")));
    }

    assert_eq!(note_count(&conn), 0);
}

#[test]
fn storage_rejects_null_title_and_content() {
    let conn = ready_connection();

    let err = conn
        .execute("INSERT INTO note (title, content) VALUES (NULL, 'x');", [])
        .unwrap_err();
    assert!(err.to_string().contains("note.title"));

    let err = conn
        .execute("INSERT INTO note (title, content) VALUES ('x', NULL);", [])
        .unwrap_err();
    assert!(err.to_string().contains("note.content"));

    assert_eq!(note_count(&conn), 0);
}

#[test]
fn r_n_t_and_backslash_are_preserved() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service.create_note("rnt\\", "rnt\\").unwrap();
    let found = service.get_note(created.id).unwrap().unwrap();

    assert_eq!(found.title, "rnt\\");
    assert_eq!(found.content, "rnt\\");
}

#[test]
fn create_from_json_persists_note() {
    let conn = ready_connection();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service
        .create_note_from_json(r#"{"title": "How to do X?", "content": "Like this."}"#)
        .unwrap();
    assert_eq!(created.title, "How to do X?");

    let err = service.create_note_from_json("not json").unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidJson(_)));

    let err = service
        .create_note_from_json(r#"{"title": "a", "content": "b", "bogus": 1}"#)
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidJson(_)));
    assert!(err.to_string().contains("bogus"));
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn repository_requires_existing_schema() {
    let conn = open_db_in_memory().unwrap();

    let err = SqliteNoteRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("note")));

    conn.execute_batch("CREATE TABLE note (id INTEGER PRIMARY KEY, title TEXT NOT NULL);")
        .unwrap();
    let err = SqliteNoteRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredColumn {
            table: "note",
            column: "content"
        }
    ));
    let message = err.to_string();
    assert!(message.contains("run schema migrations"), "{message}");
    assert!(!message.contains("upgrade-schema"), "{message}");
}
