use async_trait::async_trait;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::UploadRecord;
use super::tables::*;
use super::{InsertError, UploadRepository};

impl Database {
    // ========================================================================
    // Upload operations
    // ========================================================================

    /// Store an upload record and index its remote key.
    ///
    /// Returns `false` without writing when the remote key is already indexed.
    /// The check and the write share one transaction.
    pub fn insert_upload(&self, record: &UploadRecord) -> Result<bool, DatabaseError> {
        debug_assert!(!record.id.is_empty(), "upload id must not be empty");
        debug_assert!(
            !record.remote_key.is_empty(),
            "upload remote key must not be empty"
        );

        let write_txn = self.begin_write()?;
        let taken = write_txn
            .open_table(UPLOAD_KEYS)?
            .get(record.remote_key.as_str())?
            .is_some();
        if taken {
            write_txn.abort()?;
            return Ok(false);
        }

        {
            let mut key_table = write_txn.open_table(UPLOAD_KEYS)?;
            key_table.insert(record.remote_key.as_str(), record.id.as_str())?;

            let mut table = write_txn.open_table(UPLOADS)?;
            let data = rmp_serde::to_vec_named(record)?;
            table.insert(record.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    /// Get an upload by its UUID
    pub fn get_upload(&self, id: &str) -> Result<Option<UploadRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(UPLOADS)?;

        match table.get(id)? {
            Some(data) => {
                let record: UploadRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Get all uploads, ordered by id
    pub fn get_all_uploads(&self) -> Result<Vec<UploadRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(UPLOADS)?;

        let mut uploads = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let record: UploadRecord = rmp_serde::from_slice(value.value())?;
            uploads.push(record);
        }

        Ok(uploads)
    }
}

#[async_trait]
impl UploadRepository for Database {
    async fn insert(&self, record: &UploadRecord) -> Result<(), InsertError> {
        if self.insert_upload(record)? {
            Ok(())
        } else {
            Err(InsertError::Conflict {
                remote_key: record.remote_key.clone(),
            })
        }
    }
}
