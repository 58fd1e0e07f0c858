//! Row-level reads and writes shared by repositories, seeding and backup

#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_row, from_rusqlite, from_rusqlite_write, Result};
use chrono::Utc;
use renova_core::model::{AboutData, Entity, SortOrder};
use rusqlite::{Connection, OptionalExtension};

fn order_clause<E: Entity>() -> &'static str {
    match E::SORT {
        SortOrder::Descending(_) => "ORDER BY sort_key DESC, seq DESC",
        SortOrder::Insertion => "ORDER BY seq ASC",
    }
}

fn decode<E: Entity>(id: &str, body: &str) -> Result<E> {
    serde_json::from_str(body).map_err(|e| corrupt_row(E::COLLECTION.table(), id, e))
}

/// All records of a collection in listing order
pub fn read_all<E: Entity>(conn: &Connection) -> Result<Vec<E>> {
    let sql = format!(
        "SELECT id, body FROM {} {}",
        E::COLLECTION.table(),
        order_clause::<E>()
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.iter().map(|(id, body)| decode::<E>(id, body)).collect()
}

pub fn read_one<E: Entity>(conn: &Connection, id: &str) -> Result<Option<E>> {
    let sql = format!("SELECT body FROM {} WHERE id = ?1", E::COLLECTION.table());
    let body: Option<String> = conn
        .query_row(&sql, [id], |row| row.get(0))
        .optional()
        .map_err(from_rusqlite)?;
    body.map(|body| decode::<E>(id, &body)).transpose()
}

/// Look a record up by its unique attribute
pub fn read_by_unique_key<E: Entity>(conn: &Connection, key: &str) -> Result<Option<E>> {
    let sql = format!(
        "SELECT id, body FROM {} WHERE unique_key = ?1",
        E::COLLECTION.table()
    );
    let row: Option<(String, String)> = conn
        .query_row(&sql, [key], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()
        .map_err(from_rusqlite)?;
    row.map(|(id, body)| decode::<E>(&id, &body)).transpose()
}

/// Insert a new record; a taken unique key is `AlreadyExists`
pub fn insert_new<E: Entity>(conn: &Connection, record: &E) -> Result<()> {
    let table = E::COLLECTION.table();
    let unique_key = record.unique_key();
    let sql = format!(
        "INSERT INTO {} (id, sort_key, unique_key, body, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        table
    );
    conn.execute(
        &sql,
        rusqlite::params![
            record.id(),
            record.sort_key(),
            unique_key,
            serde_json::to_string(record)?,
            Utc::now().timestamp(),
        ],
    )
    .map_err(|e| from_rusqlite_write(table, unique_key.as_deref(), e))?;
    Ok(())
}

/// Insert or replace a record keyed by id (seeding and import)
pub fn upsert_record<E: Entity>(conn: &Connection, record: &E) -> Result<()> {
    let table = E::COLLECTION.table();
    let unique_key = record.unique_key();
    let sql = format!(
        "INSERT INTO {} (id, sort_key, unique_key, body, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            sort_key = excluded.sort_key,
            unique_key = excluded.unique_key,
            body = excluded.body,
            updated_at = excluded.updated_at",
        table
    );
    conn.execute(
        &sql,
        rusqlite::params![
            record.id(),
            record.sort_key(),
            unique_key,
            serde_json::to_string(record)?,
            Utc::now().timestamp(),
        ],
    )
    .map_err(|e| from_rusqlite_write(table, unique_key.as_deref(), e))?;
    Ok(())
}

/// Rewrite an existing row; returns the number of rows touched
pub fn rewrite_record<E: Entity>(conn: &Connection, record: &E) -> Result<usize> {
    let table = E::COLLECTION.table();
    let unique_key = record.unique_key();
    let sql = format!(
        "UPDATE {} SET sort_key = ?2, unique_key = ?3, body = ?4, updated_at = ?5 WHERE id = ?1",
        table
    );
    conn.execute(
        &sql,
        rusqlite::params![
            record.id(),
            record.sort_key(),
            unique_key,
            serde_json::to_string(record)?,
            Utc::now().timestamp(),
        ],
    )
    .map_err(|e| from_rusqlite_write(table, unique_key.as_deref(), e))
}

pub fn delete_record(conn: &Connection, table: &str, id: &str) -> Result<usize> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", table);
    conn.execute(&sql, [id]).map_err(from_rusqlite)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(from_rusqlite)
}

pub fn read_about(conn: &Connection) -> Result<Option<AboutData>> {
    let body: Option<String> = conn
        .query_row("SELECT body FROM about WHERE id = 1", [], |row| row.get(0))
        .optional()
        .map_err(from_rusqlite)?;
    match body {
        Some(body) => Ok(Some(serde_json::from_str(&body)?)),
        None => Ok(None),
    }
}

pub fn write_about(conn: &Connection, about: &AboutData) -> Result<()> {
    conn.execute(
        "INSERT INTO about (id, body, updated_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        rusqlite::params![serde_json::to_string(about)?, Utc::now().timestamp()],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}
