use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::{messages, thread_participants, threads, to_datetime};
use crate::errors::{Result, SchoolError};
use crate::models::PaginatedResponse;
use crate::models::messaging::{
    entities::{Message, Thread, ThreadSummary},
    requests::CreateThreadRequest,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

async fn participant_rows<C: ConnectionTrait>(
    conn: &C,
    thread_ids: Vec<i64>,
) -> Result<Vec<thread_participants::Model>> {
    thread_participants::Entity::find()
        .filter(thread_participants::Column::ThreadId.is_in(thread_ids))
        .order_by_asc(thread_participants::Column::UserId)
        .all(conn)
        .await
        .map_err(db_error("Failed to load thread participants"))
}

impl SeaOrmStorage {
    pub async fn create_thread_impl(
        &self,
        req: CreateThreadRequest,
        created_by: i64,
    ) -> Result<Thread> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;
        let now = now_ts();
        let first_message = req.message.filter(|m| !m.trim().is_empty());

        let thread = threads::ActiveModel {
            title: Set(req.title),
            kind: Set(req.kind.to_string()),
            created_by: Set(created_by),
            last_message_at: Set(first_message.as_ref().map(|_| now)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to create thread"))?;

        let first_message_id = match first_message {
            Some(content) => Some(
                messages::ActiveModel {
                    thread_id: Set(thread.id),
                    sender_id: Set(created_by),
                    content: Set(content),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(db_error("Failed to send message"))?
                .id,
            ),
            None => None,
        };

        let members: BTreeSet<i64> = req
            .participant_ids
            .into_iter()
            .chain(std::iter::once(created_by))
            .collect();
        for user_id in &members {
            let is_creator = *user_id == created_by;
            thread_participants::ActiveModel {
                thread_id: Set(thread.id),
                user_id: Set(*user_id),
                joined_at: Set(now),
                last_read_at: Set(is_creator.then_some(now)),
                last_read_message_id: Set(first_message_id.filter(|_| is_creator)),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_error("Failed to add thread participant"))?;
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(thread.into_thread(members.into_iter().collect()))
    }

    pub async fn get_thread_impl(&self, id: i64) -> Result<Option<Thread>> {
        let Some(thread) = threads::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query thread"))?
        else {
            return Ok(None);
        };
        let participants = participant_rows(&self.db, vec![id]).await?;
        Ok(Some(
            thread.into_thread(participants.into_iter().map(|p| p.user_id).collect()),
        ))
    }

    pub async fn is_thread_participant_impl(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        let count = thread_participants::Entity::find()
            .filter(thread_participants::Column::ThreadId.eq(thread_id))
            .filter(thread_participants::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to query thread participant"))?;
        Ok(count > 0)
    }

    /// Messages from others posted after the caller's read mark. Message ids
    /// grow with every insert, so two messages in the same second still order.
    async fn unread_count(
        &self,
        thread_id: i64,
        user_id: i64,
        last_read_message_id: Option<i64>,
    ) -> Result<i64> {
        let mut select = messages::Entity::find()
            .filter(messages::Column::ThreadId.eq(thread_id))
            .filter(messages::Column::SenderId.ne(user_id));
        if let Some(seen) = last_read_message_id {
            select = select.filter(messages::Column::Id.gt(seen));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count unread messages"))?;
        Ok(count as i64)
    }

    /// The caller's threads, most recent activity first.
    pub async fn list_threads_for_user_impl(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<ThreadSummary>> {
        let thread_ids: Vec<i64> = thread_participants::Entity::find()
            .select_only()
            .column(thread_participants::Column::ThreadId)
            .filter(thread_participants::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list threads"))?;

        let select = threads::Entity::find()
            .filter(threads::Column::Id.is_in(thread_ids))
            .order_by_desc(Expr::cust("COALESCE(last_message_at, created_at)"))
            .order_by_desc(threads::Column::Id);
        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list threads")
            .await?;

        let participants = participant_rows(&self.db, rows.iter().map(|t| t.id).collect()).await?;
        let mut members: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut read_marks: HashMap<i64, (Option<i64>, Option<i64>)> = HashMap::new();
        for p in participants {
            members.entry(p.thread_id).or_default().push(p.user_id);
            if p.user_id == user_id {
                read_marks.insert(p.thread_id, (p.last_read_at, p.last_read_message_id));
            }
        }

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let (last_read_at, last_read_message_id) =
                read_marks.get(&row.id).copied().unwrap_or_default();
            let unread_count = self
                .unread_count(row.id, user_id, last_read_message_id)
                .await?;
            let participant_ids = members.remove(&row.id).unwrap_or_default();
            items.push(ThreadSummary {
                thread: row.into_thread(participant_ids),
                unread_count,
                last_read_at: last_read_at.map(to_datetime),
            });
        }

        Ok(PaginatedResponse { items, pagination })
    }

    /// Oldest first.
    pub async fn list_messages_impl(
        &self,
        thread_id: i64,
        page: i64,
        size: i64,
    ) -> Result<PaginatedResponse<Message>> {
        let select = messages::Entity::find()
            .filter(messages::Column::ThreadId.eq(thread_id))
            .order_by_asc(messages::Column::CreatedAt)
            .order_by_asc(messages::Column::Id);
        let (rows, pagination) = self
            .fetch_page(select, page, size, "Failed to list messages")
            .await?;
        Ok(PaginatedResponse {
            items: rows.into_iter().map(|m| m.into_message()).collect(),
            pagination,
        })
    }

    pub async fn send_message_impl(
        &self,
        thread_id: i64,
        sender_id: i64,
        content: String,
    ) -> Result<Message> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;
        let now = now_ts();

        let message = messages::ActiveModel {
            thread_id: Set(thread_id),
            sender_id: Set(sender_id),
            content: Set(content),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to send message"))?;

        let updated = threads::Entity::update_many()
            .col_expr(threads::Column::LastMessageAt, Expr::value(now))
            .filter(threads::Column::Id.eq(thread_id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to update thread"))?;
        if updated.rows_affected == 0 {
            return Err(SchoolError::not_found("Thread not found"));
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(message.into_message())
    }

    pub async fn mark_thread_read_impl(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        let newest: Option<i64> = messages::Entity::find()
            .select_only()
            .column_as(messages::Column::Id.max(), "newest")
            .filter(messages::Column::ThreadId.eq(thread_id))
            .into_tuple::<Option<i64>>()
            .one(&self.db)
            .await
            .map_err(db_error("Failed to query thread messages"))?
            .flatten();

        let mut update = thread_participants::Entity::update_many()
            .col_expr(thread_participants::Column::LastReadAt, Expr::value(now_ts()))
            .filter(thread_participants::Column::ThreadId.eq(thread_id))
            .filter(thread_participants::Column::UserId.eq(user_id));
        if let Some(newest) = newest {
            update = update.col_expr(
                thread_participants::Column::LastReadMessageId,
                Expr::value(newest),
            );
        }
        let result = update
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to mark thread read"))?;
        Ok(result.rows_affected > 0)
    }
}
