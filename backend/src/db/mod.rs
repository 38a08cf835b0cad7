//! SQLite persistence for the pages edited through the admin.
//!
//! Every request opens its own connection with [`open`], which also creates
//! the `pages` table on first use. Errors are reported as strings and mapped
//! to HTTP responses by the handlers.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// One editable page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageRecord {
    pub id: i64,
    pub title: String,
    pub url_segment: String,
    pub content: String,
    /// File name of the uploaded attachment, if any.
    pub attachment: Option<String>,
    pub is_published: bool,
    /// Draft differs from the published version.
    pub is_modified: bool,
}

/// Opens the database at `path`, creating the schema when missing.
pub fn open(path: &Path) -> Result<Connection, String> {
    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            url_segment TEXT NOT NULL DEFAULT '',
            content TEXT NOT NULL DEFAULT '',
            attachment TEXT,
            is_published INTEGER NOT NULL DEFAULT 0,
            is_modified INTEGER NOT NULL DEFAULT 0
        );",
    )
    .map_err(|e| e.to_string())
}

/// Inserts a starter page when the table is empty, so a fresh install has
/// something to edit.
pub fn seed(conn: &Connection) -> Result<(), String> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))
        .map_err(|e| e.to_string())?;
    if count == 0 {
        insert_page(
            conn,
            &PageRecord {
                title: "Home".to_string(),
                url_segment: "home".to_string(),
                content: "<p>Welcome to your new site.</p>".to_string(),
                ..Default::default()
            },
        )?;
        log::info!("Seeded pages table with a home page");
    }
    Ok(())
}

/// Inserts `page` (ignoring its `id`) and returns the new id.
pub fn insert_page(conn: &Connection, page: &PageRecord) -> Result<i64, String> {
    conn.execute(
        "INSERT INTO pages (title, url_segment, content, attachment, is_published, is_modified)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            page.title,
            page.url_segment,
            page.content,
            page.attachment,
            page.is_published,
            page.is_modified
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(conn.last_insert_rowid())
}

/// Loads one page; `Ok(None)` when no page has that id.
pub fn get_page(conn: &Connection, id: i64) -> Result<Option<PageRecord>, String> {
    conn.query_row(
        "SELECT id, title, url_segment, content, attachment, is_published, is_modified
         FROM pages WHERE id = ?1",
        params![id],
        |row| {
            Ok(PageRecord {
                id: row.get(0)?,
                title: row.get(1)?,
                url_segment: row.get(2)?,
                content: row.get(3)?,
                attachment: row.get(4)?,
                is_published: row.get(5)?,
                is_modified: row.get(6)?,
            })
        },
    )
    .optional()
    .map_err(|e| e.to_string())
}

pub fn update_page(conn: &Connection, page: &PageRecord) -> Result<(), String> {
    let changed = conn
        .execute(
            "UPDATE pages
             SET title = ?1, url_segment = ?2, content = ?3, attachment = ?4,
                 is_published = ?5, is_modified = ?6
             WHERE id = ?7",
            params![
                page.title,
                page.url_segment,
                page.content,
                page.attachment,
                page.is_published,
                page.is_modified,
                page.id
            ],
        )
        .map_err(|e| e.to_string())?;
    if changed == 0 {
        return Err(format!("Page {} not found", page.id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn seed_only_inserts_into_empty_table() {
        let conn = memory();
        seed(&conn).unwrap();
        seed(&conn).unwrap();

        let home = get_page(&conn, 1).unwrap().unwrap();
        assert_eq!(home.title, "Home");
        assert!(get_page(&conn, 2).unwrap().is_none());
    }

    #[test]
    fn update_round_trips_every_column() {
        let conn = memory();
        let id = insert_page(
            &conn,
            &PageRecord {
                title: "About".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let page = PageRecord {
            id,
            title: "About us".to_string(),
            url_segment: "about-us".to_string(),
            content: "<p>Hi</p>".to_string(),
            attachment: Some("team.png".to_string()),
            is_published: true,
            is_modified: false,
        };
        update_page(&conn, &page).unwrap();

        assert_eq!(get_page(&conn, id).unwrap(), Some(page));
    }

    #[test]
    fn updating_missing_page_fails() {
        let conn = memory();
        let err = update_page(
            &conn,
            &PageRecord {
                id: 42,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, "Page 42 not found");
    }

    #[test]
    fn open_creates_schema_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.sqlite");
        let conn = open(&path).unwrap();
        seed(&conn).unwrap();
        drop(conn);

        let conn = open(&path).unwrap();
        assert!(get_page(&conn, 1).unwrap().is_some());
    }
}
