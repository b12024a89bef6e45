use redb::TableDefinition;

/// Upload records: uuid -> UploadRecord (msgpack)
pub const UPLOADS: TableDefinition<&str, &[u8]> = TableDefinition::new("uploads");

/// Remote key index: remote_key -> uuid (enforces one record per key)
pub const UPLOAD_KEYS: TableDefinition<&str, &str> = TableDefinition::new("upload_keys");
