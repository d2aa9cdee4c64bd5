//! Transaction runner for multi-statement units of work.
//!
//! Every aggregate write goes through [`run_in_transaction`]: the work either
//! commits as a whole or is rolled back as a whole.

use std::future::Future;
use std::pin::Pin;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use recihub_core::RecipeRepositoryError;

/// Future returned by a unit of work; borrows the open transaction for `'c`.
pub type TxFuture<'c, T> =
    Pin<Box<dyn Future<Output = Result<T, RecipeRepositoryError>> + Send + 'c>>;

/// Run `work` inside a single transaction on `pool`.
///
/// - A failure to begin is `TransactionStart`.
/// - A failure inside `work` rolls back and comes back wrapped in
///   `TransactionFailed`. A rollback failure is logged and otherwise ignored
///   so the original cause is what the caller sees.
/// - A failure to commit is `Commit`, even though `work` itself succeeded.
///
/// Dropping the returned future before it completes drops the open
/// transaction, which sqlx rolls back.
///
/// ```ignore
/// let id = run_in_transaction(&pool, "insert recipe", move |conn| {
///     Box::pin(async move { insert_aggregate(conn, recipe).await })
/// })
/// .await?;
/// ```
pub async fn run_in_transaction<T, F>(
    pool: &SqlitePool,
    operation: &'static str,
    work: F,
) -> Result<T, RecipeRepositoryError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> TxFuture<'c, T> + Send,
{
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| RecipeRepositoryError::TransactionStart(e.to_string()))?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| RecipeRepositoryError::Commit(e.to_string()))?;
            debug!(operation, "Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(operation, error = %rollback_err, "Rollback failed");
            }
            debug!(operation, error = %err, "Transaction rolled back");
            Err(RecipeRepositoryError::TransactionFailed(Box::new(err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn recipe_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_named(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<i64, RecipeRepositoryError> {
        let result = sqlx::query("INSERT INTO recipe (name, username) VALUES (?, 'alice')")
            .bind(name)
            .execute(&mut *conn)
            .await
            .map_err(|e| RecipeRepositoryError::store("insert recipe", e))?;
        Ok(result.last_insert_rowid())
    }

    #[tokio::test]
    async fn test_commits_successful_work() {
        let pool = setup_test_database().await.unwrap();

        let id = run_in_transaction(&pool, "test", |conn| {
            Box::pin(async move { insert_named(conn, "Soup").await })
        })
        .await
        .unwrap();

        assert!(id > 0);
        assert_eq!(recipe_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_rolls_back_failed_work() {
        let pool = setup_test_database().await.unwrap();

        let result: Result<(), _> = run_in_transaction(&pool, "test", |conn| {
            Box::pin(async move {
                insert_named(conn, "Soup").await?;
                insert_named(conn, "Stew").await?;
                Err(RecipeRepositoryError::NoIdentityGenerated("ingredient"))
            })
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, RecipeRepositoryError::TransactionFailed(_)));
        assert!(matches!(
            err.root_cause(),
            RecipeRepositoryError::NoIdentityGenerated("ingredient")
        ));
        assert_eq!(recipe_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_dropped_work_rolls_back() {
        let pool = setup_test_database().await.unwrap();

        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            run_in_transaction(&pool, "test", |conn| {
                Box::pin(async move {
                    insert_named(conn, "Soup").await?;
                    std::future::pending::<Result<(), RecipeRepositoryError>>().await
                })
            }),
        )
        .await;

        assert!(cancelled.is_err());
        assert_eq!(recipe_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_begin_failure_is_transaction_start() {
        let pool = setup_test_database().await.unwrap();
        pool.close().await;

        let result =
            run_in_transaction(&pool, "test", |_conn| Box::pin(async move { Ok(()) })).await;

        assert!(matches!(
            result,
            Err(RecipeRepositoryError::TransactionStart(_))
        ));
    }

    #[tokio::test]
    async fn test_commit_failure_is_commit_error() {
        let pool = setup_test_database().await.unwrap();

        // Deferred foreign keys are only checked at COMMIT time
        let result = run_in_transaction(&pool, "test", |conn| {
            Box::pin(async move {
                sqlx::query("PRAGMA defer_foreign_keys = ON")
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| RecipeRepositoryError::store("pragma", e))?;
                sqlx::query(
                    "INSERT INTO ingredient (name, amount, unit, recipeid) VALUES ('Salt', '1', 'tsp', 999)",
                )
                .execute(&mut *conn)
                .await
                .map_err(|e| RecipeRepositoryError::store("insert ingredient", e))?;
                Ok(())
            })
        })
        .await;

        assert!(matches!(result, Err(RecipeRepositoryError::Commit(_))));

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredient")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
