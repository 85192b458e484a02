//! NotificationRepository - Repository per le notifiche admin

use super::{Create, PoolType, Read, Update};
use crate::core::ids::new_id;
use crate::dtos::{CreateNotificationDTO, UpdateNotificationDTO};
use crate::entities::Notification;
use sqlx::Error;

const NOTIFICATION_COLUMNS: &str =
    "id, notification_type, title, message, order_id, is_read, created_at";

pub struct NotificationRepository {
    connection_pool: PoolType,
}

impl NotificationRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Le ultime `limit` notifiche, dalla più recente
    pub async fn find_latest(&self, limit: i64) -> Result<Vec<Notification>, Error> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC, rowid DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(notifications)
    }

    pub async fn count_unread(&self) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE is_read = 0")
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count)
    }

    /// Filtro `isRead = false` -> `isRead = true`; le notifiche già lette non vengono toccate
    pub async fn mark_all_read(&self) -> Result<u64, Error> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE is_read = 0")
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl Create<Notification, CreateNotificationDTO> for NotificationRepository {
    async fn create(&self, data: &CreateNotificationDTO) -> Result<Notification, Error> {
        let notification = Notification {
            id: new_id(),
            notification_type: data.notification_type.clone(),
            title: data.title.clone(),
            message: data.message.clone(),
            order_id: data.order_id.clone(),
            is_read: false,
            created_at: data.created_at,
        };

        sqlx::query(&format!(
            "INSERT INTO notifications ({NOTIFICATION_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&notification.id)
        .bind(&notification.notification_type)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.order_id)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.connection_pool)
        .await?;

        Ok(notification)
    }
}

impl Read<Notification, str> for NotificationRepository {
    async fn read(&self, id: &str) -> Result<Option<Notification>, Error> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(notification)
    }
}

impl Update<Notification, UpdateNotificationDTO, str> for NotificationRepository {
    async fn update(&self, id: &str, data: &UpdateNotificationDTO) -> Result<Notification, Error> {
        // First, get the current notification to ensure it exists
        let current = self.read(id).await?.ok_or(Error::RowNotFound)?;

        let Some(is_read) = data.is_read else {
            return Ok(current);
        };

        sqlx::query("UPDATE notifications SET is_read = ? WHERE id = ?")
            .bind(is_read)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_repository() -> NotificationRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        sqlx::raw_sql(include_str!("../../fixtures/notifications.sql"))
            .execute(&pool)
            .await
            .unwrap();
        NotificationRepository::new(pool)
    }

    #[tokio::test]
    async fn test_mark_all_read_touches_only_unread() {
        let repo = seeded_repository().await;
        let before = repo.read("N3").await.unwrap().unwrap();

        // N1 e N2 sono non lette, N3 è già letta
        assert_eq!(repo.mark_all_read().await.unwrap(), 2);
        assert_eq!(repo.count_unread().await.unwrap(), 0);

        let after = repo.read("N3").await.unwrap().unwrap();
        assert!(after.is_read);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.title, before.title);

        // seconda chiamata: nessuna riga da aggiornare
        assert_eq!(repo.mark_all_read().await.unwrap(), 0);
        assert_eq!(repo.count_unread().await.unwrap(), 0);
    }
}
