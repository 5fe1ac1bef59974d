//! Shared encode/decode helpers for SQLite ↔ domain type conversions.

use uuid::Uuid;

use crate::persistence::PersistenceError;

// ── identifiers ────────────────────────────────────────────────────────

/// Decode a `TEXT` identifier column. `column` names the source for the
/// error message.
pub fn decode_uuid(column: &str, raw: &str) -> Result<Uuid, PersistenceError> {
    Uuid::parse_str(raw)
        .map_err(|_| PersistenceError::Corrupt(format!("{column} is not a UUID: {raw:?}")))
}

// ── booleans ───────────────────────────────────────────────────────────

pub fn encode_bool(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub fn decode_bool(value: i64) -> bool {
    value != 0
}

// ── error classification ───────────────────────────────────────────────

/// Translate constraint violations reported by SQLite into typed
/// persistence errors. Anything else stays a plain `Sqlx` error.
pub fn classify_sqlx_error(err: sqlx::Error) -> PersistenceError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return PersistenceError::UniqueViolation(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return PersistenceError::ForeignKeyViolation(db_err.message().to_string());
        }
    }
    PersistenceError::Sqlx(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_roundtrip() {
        assert!(decode_bool(encode_bool(true)));
        assert!(!decode_bool(encode_bool(false)));
    }

    #[test]
    fn decode_uuid_rejects_garbage() {
        let err = decode_uuid("cards.id", "nope").unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt(msg) if msg.contains("cards.id")));
    }

    #[test]
    fn decode_uuid_accepts_hyphenated() {
        let id = Uuid::new_v4();
        assert_eq!(decode_uuid("packs.id", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn non_database_errors_are_not_reclassified() {
        let err = classify_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
