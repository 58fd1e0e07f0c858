//! Whole-store export, import, clear and reset

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use crate::errors::{from_rusqlite, Result};
use crate::images;
use crate::repo::rows;
use crate::seed::autoseed::{forget_seeds, insert_seed, mark_seeded, ABOUT_KEY};
use renova_core::defaults;
use renova_core::model::{
    AboutData, Car, Collection, Entity, InboxMessage, NewsPost, SortOrder, StoredImage,
    Testimonial, User,
};
use rusqlite::{Connection, Transaction};
use serde::{Deserialize, Serialize};

/// Portable dump of a local store, one key per collection
///
/// On import only the keys present are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cars: Option<Vec<Car>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<NewsPost>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox: Option<Vec<InboxMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<StoredImage>>,
}

/// Rows written per key by an import or reset
pub type RestoreReport = BTreeMap<String, usize>;

/// Read everything as stored, without triggering auto-seed
pub fn export(conn: &Connection) -> Result<LocalSnapshot> {
    Ok(LocalSnapshot {
        cars: Some(rows::read_all::<Car>(conn)?),
        news: Some(rows::read_all::<NewsPost>(conn)?),
        testimonials: Some(rows::read_all::<Testimonial>(conn)?),
        inbox: Some(rows::read_all::<InboxMessage>(conn)?),
        about: rows::read_about(conn)?,
        users: Some(rows::read_all::<User>(conn)?),
        images: Some(images::read_all_images(conn)?),
    })
}

fn replace_collection<E: Entity>(tx: &Transaction, records: &[E]) -> Result<usize> {
    let table = E::COLLECTION.table();
    tx.execute(&format!("DELETE FROM {}", table), [])
        .map_err(from_rusqlite)?;
    // Insert oldest first so listing ties keep their order after a round trip
    let oldest_first: Box<dyn Iterator<Item = &E>> = match E::SORT {
        SortOrder::Descending(_) => Box::new(records.iter().rev()),
        SortOrder::Insertion => Box::new(records.iter()),
    };
    for record in oldest_first {
        rows::upsert_record(tx, record)?;
    }
    mark_seeded(tx, table, records.len())?;
    Ok(records.len())
}

/// Replace the collections present in `snapshot`, atomically
pub fn import(conn: &mut Connection, snapshot: &LocalSnapshot) -> Result<RestoreReport> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut report = RestoreReport::new();

    if let Some(cars) = &snapshot.cars {
        report.insert("cars".into(), replace_collection(&tx, cars)?);
    }
    if let Some(news) = &snapshot.news {
        report.insert("news".into(), replace_collection(&tx, news)?);
    }
    if let Some(testimonials) = &snapshot.testimonials {
        report.insert("testimonials".into(), replace_collection(&tx, testimonials)?);
    }
    if let Some(inbox) = &snapshot.inbox {
        report.insert("inbox".into(), replace_collection(&tx, inbox)?);
    }
    if let Some(users) = &snapshot.users {
        report.insert("users".into(), replace_collection(&tx, users)?);
    }
    if let Some(about) = &snapshot.about {
        rows::write_about(&tx, about)?;
        mark_seeded(&tx, ABOUT_KEY, 1)?;
        report.insert(ABOUT_KEY.into(), 1);
    }
    if let Some(stored) = &snapshot.images {
        tx.execute("DELETE FROM images", []).map_err(from_rusqlite)?;
        for image in stored {
            images::insert_image(&tx, image)?;
        }
        report.insert("images".into(), stored.len());
    }

    tx.commit().map_err(from_rusqlite)?;
    tracing::info!(keys = report.len(), "imported local snapshot");
    Ok(report)
}

fn wipe(tx: &Transaction) -> Result<()> {
    for collection in Collection::ALL {
        tx.execute(&format!("DELETE FROM {}", collection.table()), [])
            .map_err(from_rusqlite)?;
    }
    tx.execute_batch("DELETE FROM about; DELETE FROM images; DELETE FROM session;")
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Delete all data, images and the session
///
/// Collections stay empty afterwards; they are not auto-seeded again.
pub fn clear(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    wipe(&tx)?;
    for collection in Collection::ALL {
        mark_seeded(&tx, collection.table(), 0)?;
    }
    mark_seeded(&tx, ABOUT_KEY, 0)?;
    tx.commit().map_err(from_rusqlite)?;
    tracing::info!("cleared local store");
    Ok(())
}

/// Wipe everything and write the default dataset immediately
pub fn reset(conn: &mut Connection) -> Result<RestoreReport> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    wipe(&tx)?;
    forget_seeds(&tx)?;

    let mut report = RestoreReport::new();
    report.insert("cars".into(), insert_seed::<Car>(&tx)?);
    report.insert("news".into(), insert_seed::<NewsPost>(&tx)?);
    report.insert("testimonials".into(), insert_seed::<Testimonial>(&tx)?);
    report.insert("inbox".into(), insert_seed::<InboxMessage>(&tx)?);
    report.insert("users".into(), insert_seed::<User>(&tx)?);
    rows::write_about(&tx, &defaults::about())?;
    report.insert(ABOUT_KEY.into(), 1);

    for (key, count) in &report {
        mark_seeded(&tx, key, *count)?;
    }
    tx.commit().map_err(from_rusqlite)?;
    tracing::info!("reset local store to defaults");
    Ok(report)
}
