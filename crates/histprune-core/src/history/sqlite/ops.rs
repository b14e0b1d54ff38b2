//! Search, delete and seeding operations on the `urls`/`visits` tables.

use async_trait::async_trait;
use sqlx::Row;

use super::db::SqliteHistory;
use crate::history::{HistoryError, HistoryRecord, HistoryStore, SearchQuery};

/// Build a `LIKE` pattern matching `text` anywhere, with `\` as escape.
fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

impl SqliteHistory {
    /// Records whose URL or title contains `query.text` (ASCII case-insensitive),
    /// most recently visited first.
    pub async fn search_records(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<HistoryRecord>, HistoryError> {
        let limit = i64::try_from(query.max_results).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            r#"
            SELECT url, title, visit_count, last_visit_time
            FROM urls
            WHERE (url LIKE ?1 ESCAPE '\' OR title LIKE ?1 ESCAPE '\')
              AND last_visit_time >= ?2
            ORDER BY last_visit_time DESC, id DESC
            LIMIT ?3
            "#,
        )
        .bind(like_pattern(&query.text))
        .bind(query.start_time)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let url: Option<String> = row.get("url");
            out.push(HistoryRecord {
                url: url.unwrap_or_default(),
                title: row.get("title"),
                visit_count: row.get("visit_count"),
                last_visit_time: row.get("last_visit_time"),
            });
        }
        Ok(out)
    }

    /// Delete the `urls` rows with exactly this URL and their visits.
    /// Returns the number of `urls` rows removed.
    pub async fn remove_url(&self, url: &str) -> Result<u64, HistoryError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            DELETE FROM visits
            WHERE url IN (SELECT id FROM urls WHERE url = ?1)
            "#,
        )
        .bind(url)
        .execute(&mut *tx)
        .await?;
        let removed = sqlx::query(
            r#"
            DELETE FROM urls
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tx.commit().await?;
        Ok(removed)
    }

    /// Record a visit, creating the `urls` row on first sight.
    pub async fn add_visit(
        &self,
        url: &str,
        title: Option<&str>,
        visit_time: i64,
    ) -> Result<(), HistoryError> {
        let mut tx = self.pool.begin().await?;
        let existing = sqlx::query(
            r#"
            SELECT id FROM urls
            WHERE url = ?1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&mut *tx)
        .await?;

        let url_id: i64 = match existing {
            Some(row) => {
                let id: i64 = row.get("id");
                sqlx::query(
                    r#"
                    UPDATE urls
                    SET visit_count = visit_count + 1,
                        last_visit_time = MAX(last_visit_time, ?1),
                        title = COALESCE(?2, title)
                    WHERE id = ?3
                    "#,
                )
                .bind(visit_time)
                .bind(title)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                id
            }
            None => sqlx::query(
                r#"
                INSERT INTO urls (url, title, visit_count, typed_count, last_visit_time, hidden)
                VALUES (?1, ?2, 1, 0, ?3, 0)
                "#,
            )
            .bind(url)
            .bind(title)
            .bind(visit_time)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid(),
        };

        sqlx::query(
            r#"
            INSERT INTO visits (url, visit_time)
            VALUES (?1, ?2)
            "#,
        )
        .bind(url_id)
        .bind(visit_time)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// All stored URLs, oldest row first.
    pub async fn list_urls(&self) -> Result<Vec<String>, HistoryError> {
        let rows = sqlx::query(
            r#"
            SELECT url FROM urls
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.get::<Option<String>, _>("url"))
            .collect())
    }

    pub async fn count_visits(&self) -> Result<i64, HistoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM visits")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.search_records(query).await
    }

    async fn delete_url(&self, url: &str) -> Result<(), HistoryError> {
        let removed = self.remove_url(url).await?;
        tracing::debug!(url, removed, "deleted history url");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("x.com"), "%x.com%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(like_pattern(""), "%%");
    }
}
