//! SQLite-backed implementation of [`CardRepository`].

use cards::{Card, CardId, NewCard, PackId};
use sqlx::SqlitePool;

use super::helpers::{classify_sqlx_error, decode_bool, decode_uuid, encode_bool};
use crate::persistence::traits::CardRepository;
use crate::persistence::{now_timestamp, PersistenceError};

/// Row type for card queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct CardRow {
    id: String,
    pack_id: String,
    question: String,
    answer: String,
    rating: i64,
    last_wrong: i64,
    created_at: i64,
}

impl TryFrom<CardRow> for Card {
    type Error = PersistenceError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Card {
            id: CardId::from(decode_uuid("cards.id", &row.id)?),
            pack_id: PackId::from(decode_uuid("cards.pack_id", &row.pack_id)?),
            question: row.question,
            answer: row.answer,
            rating: row.rating as i32,
            last_wrong: decode_bool(row.last_wrong),
            created_at: row.created_at as u64,
        })
    }
}

const CARD_COLUMNS: &str = "id, pack_id, question, answer, rating, last_wrong, created_at";

pub struct SqliteCardRepository {
    pool: SqlitePool,
}

impl SqliteCardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_cards(&self, pack_id: PackId, order_by: &str) -> Result<Vec<Card>, PersistenceError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE pack_id = ? ORDER BY {order_by}");
        let rows: Vec<CardRow> = sqlx::query_as(&sql)
            .bind(pack_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Card::try_from).collect()
    }
}

impl CardRepository for SqliteCardRepository {
    async fn create_card(&self, data: &NewCard) -> Result<Card, PersistenceError> {
        let card = Card {
            id: CardId::new(),
            pack_id: data.pack_id,
            question: data.question.clone(),
            answer: data.answer.clone(),
            rating: data.rating,
            last_wrong: false,
            created_at: now_timestamp(),
        };

        sqlx::query(
            r#"
            INSERT INTO cards (id, pack_id, question, answer, rating, last_wrong, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(card.id.to_string())
        .bind(card.pack_id.to_string())
        .bind(&card.question)
        .bind(&card.answer)
        .bind(i64::from(card.rating))
        .bind(encode_bool(card.last_wrong))
        .bind(card.created_at as i64)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;

        Ok(card)
    }

    async fn list_cards(&self, pack_id: PackId) -> Result<Vec<Card>, PersistenceError> {
        self.fetch_cards(pack_id, "created_at, rowid").await
    }

    async fn delete_card(&self, pack_id: PackId, card_id: CardId) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ? AND pack_id = ?")
            .bind(card_id.to_string())
            .bind(pack_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_review_cards(&self, pack_id: PackId) -> Result<Vec<Card>, PersistenceError> {
        self.fetch_cards(pack_id, "last_wrong DESC, rating ASC, created_at, rowid")
            .await
    }

    async fn set_last_wrong(
        &self,
        pack_id: PackId,
        card_id: CardId,
        last_wrong: bool,
    ) -> Result<bool, PersistenceError> {
        let result = sqlx::query("UPDATE cards SET last_wrong = ? WHERE id = ? AND pack_id = ?")
            .bind(encode_bool(last_wrong))
            .bind(card_id.to_string())
            .bind(pack_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::sqlite::{Database, SqlitePackRepository};
    use crate::persistence::traits::PackRepository;
    use cards::NewPack;

    async fn setup() -> (Database, SqliteCardRepository, PackId) {
        let db = Database::new_in_memory().await.unwrap();
        let packs = SqlitePackRepository::new(db.pool().clone());
        let pack = packs
            .create_pack(&NewPack::new("Spanish", None).unwrap())
            .await
            .unwrap();
        let repo = SqliteCardRepository::new(db.pool().clone());
        (db, repo, pack.id)
    }

    fn new_card(pack_id: PackId, question: &str, rating: Option<i32>) -> NewCard {
        NewCard::new(pack_id, question, "answer", rating).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_roundtrip() {
        let (_db, repo, pack_id) = setup().await;

        let created = repo
            .create_card(&new_card(pack_id, "perro", Some(3)))
            .await
            .unwrap();
        assert_eq!(created.rating, 3);
        assert!(!created.last_wrong);

        let list = repo.list_cards(pack_id).await.unwrap();
        assert_eq!(list, vec![created]);
    }

    #[tokio::test]
    async fn test_create_for_missing_pack_is_fk_violation() {
        let (db, repo, _pack_id) = setup().await;

        let result = repo.create_card(&new_card(PackId::new(), "gato", None)).await;
        assert!(
            matches!(result, Err(PersistenceError::ForeignKeyViolation(_))),
            "expected ForeignKeyViolation, got {:?}",
            result
        );

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_pack() {
        let (_db, repo, pack_id) = setup().await;
        let card = repo
            .create_card(&new_card(pack_id, "casa", None))
            .await
            .unwrap();

        assert!(!repo.delete_card(PackId::new(), card.id).await.unwrap());
        assert_eq!(repo.list_cards(pack_id).await.unwrap().len(), 1);

        assert!(repo.delete_card(pack_id, card.id).await.unwrap());
        assert!(repo.list_cards(pack_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_last_wrong_toggles_flag() {
        let (_db, repo, pack_id) = setup().await;
        let card = repo
            .create_card(&new_card(pack_id, "agua", None))
            .await
            .unwrap();

        assert!(repo.set_last_wrong(pack_id, card.id, true).await.unwrap());
        assert!(repo.list_cards(pack_id).await.unwrap()[0].last_wrong);

        assert!(repo.set_last_wrong(pack_id, card.id, false).await.unwrap());
        assert!(!repo.list_cards(pack_id).await.unwrap()[0].last_wrong);
    }

    #[tokio::test]
    async fn test_set_last_wrong_unknown_card_matches_nothing() {
        let (_db, repo, pack_id) = setup().await;
        assert!(!repo
            .set_last_wrong(pack_id, CardId::new(), true)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_review_order_puts_wrong_cards_first() {
        let (_db, repo, pack_id) = setup().await;

        let easy = repo
            .create_card(&new_card(pack_id, "uno", Some(5)))
            .await
            .unwrap();
        let hard = repo
            .create_card(&new_card(pack_id, "dos", Some(1)))
            .await
            .unwrap();
        let missed = repo
            .create_card(&new_card(pack_id, "tres", Some(9)))
            .await
            .unwrap();
        repo.set_last_wrong(pack_id, missed.id, true).await.unwrap();

        let order: Vec<CardId> = repo
            .list_review_cards(pack_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(order, vec![missed.id, hard.id, easy.id]);
    }
}
