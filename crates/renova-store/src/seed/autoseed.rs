//! One-time auto-seeding
//!
//! The first access to a collection seeds the default dataset if the table
//! is empty and records the collection in `seed_log`. A logged collection is
//! never seeded again automatically, even after all its rows are deleted.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::rows;
use chrono::Utc;
use renova_core::defaults;
use renova_core::model::Entity;
use rusqlite::{Connection, OptionalExtension, Transaction};

/// `seed_log` key of the about-page singleton
pub const ABOUT_KEY: &str = "about";

fn is_seeded(conn: &Connection, key: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM seed_log WHERE collection = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(found.is_some())
}

/// Record `key` as seeded
pub fn mark_seeded(conn: &Connection, key: &str, row_count: usize) -> Result<()> {
    conn.execute(
        "INSERT INTO seed_log (collection, seeded_at, row_count) VALUES (?1, ?2, ?3)
         ON CONFLICT(collection) DO UPDATE SET
            seeded_at = excluded.seeded_at,
            row_count = excluded.row_count",
        rusqlite::params![key, Utc::now().timestamp(), row_count as i64],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Forget every seed record so the next access seeds again
pub fn forget_seeds(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM seed_log", [])
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Keys present in `seed_log`, sorted
pub fn seeded_collections(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT collection FROM seed_log ORDER BY collection")
        .map_err(from_rusqlite)?;
    let keys = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(keys)
}

fn seed_once(
    conn: &mut Connection,
    key: &str,
    seed: impl FnOnce(&Transaction) -> Result<usize>,
) -> Result<()> {
    if is_seeded(conn, key)? {
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    let inserted = if rows::count_rows(&tx, key)? == 0 {
        seed(&tx)?
    } else {
        0
    };
    mark_seeded(&tx, key, inserted)?;
    tx.commit().map_err(from_rusqlite)?;

    if inserted > 0 {
        tracing::info!(collection = key, row_count = inserted, "seeded default dataset");
    }
    Ok(())
}

/// Seed the default records of `E` unless already done
pub fn ensure_seeded<E: Entity>(conn: &mut Connection) -> Result<()> {
    seed_once(conn, E::COLLECTION.table(), |tx| insert_seed::<E>(tx))
}

pub fn ensure_about_seeded(conn: &mut Connection) -> Result<()> {
    seed_once(conn, ABOUT_KEY, |tx| {
        rows::write_about(tx, &defaults::about())?;
        Ok(1)
    })
}

/// Write the default records of `E` (replacing same-id rows)
pub fn insert_seed<E: Entity>(conn: &Connection) -> Result<usize> {
    let records = E::seed_data();
    for record in &records {
        rows::upsert_record(conn, record)?;
    }
    Ok(records.len())
}
