use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MessagingService, check_content, missing_users, other_participants, participant_thread};
use crate::models::messaging::requests::{
    CreateThreadRequest, MessageListParams, SendMessageRequest, ThreadListParams,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, current_user, error_response, not_found, respond_on_err, stored,
};

impl MessagingService {
    pub async fn create_thread(
        &self,
        mut req: CreateThreadRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));

        req.title = req.title.trim().to_string();
        if req.title.is_empty() {
            return Ok(bad_request(ErrorCode::MessageInvalid, "Thread title is required"));
        }
        req.participant_ids = other_participants(&req.participant_ids, user.id);
        if req.participant_ids.is_empty() {
            return Ok(bad_request(
                ErrorCode::MessageInvalid,
                "A thread needs at least one other participant",
            ));
        }
        if let Some(message) = req.message.as_deref()
            && !message.trim().is_empty()
        {
            req.message = Some(match check_content(message) {
                Ok(content) => content,
                Err(msg) => return Ok(bad_request(ErrorCode::MessageInvalid, msg)),
            });
        }

        let storage = self.get_storage(request);
        let missing = respond_on_err!(missing_users(storage.as_ref(), &req.participant_ids).await);
        if let Some(id) = missing.first() {
            return Ok(not_found(
                ErrorCode::UserNotFound,
                format!("User {id} not found"),
            ));
        }

        match storage.create_thread(req, user.id).await {
            Ok(thread) => {
                info!(
                    "Thread {} created by {} with {} participants",
                    thread.id,
                    user.username,
                    thread.participant_ids.len()
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(thread, "Thread created")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    /// The caller's threads, most recent activity first.
    pub async fn list_threads(
        &self,
        query: ThreadListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        let threads = respond_on_err!(stored(
            storage
                .list_threads_for_user(user.id, query.pagination.page(), query.pagination.size())
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(threads, "Threads retrieved")))
    }

    pub async fn list_messages(
        &self,
        thread_id: i64,
        query: MessageListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        respond_on_err!(participant_thread(storage.as_ref(), thread_id, user.id).await);

        let messages = respond_on_err!(stored(
            storage
                .list_messages(thread_id, query.pagination.page(), query.pagination.size())
                .await
        ));
        Ok(HttpResponse::Ok().json(ApiResponse::success(messages, "Messages retrieved")))
    }

    pub async fn send_message(
        &self,
        thread_id: i64,
        req: SendMessageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let content = match check_content(&req.content) {
            Ok(content) => content,
            Err(msg) => return Ok(bad_request(ErrorCode::MessageInvalid, msg)),
        };

        let storage = self.get_storage(request);
        respond_on_err!(participant_thread(storage.as_ref(), thread_id, user.id).await);

        match storage.send_message(thread_id, user.id, content).await {
            Ok(message) => {
                Ok(HttpResponse::Created().json(ApiResponse::success(message, "Message sent")))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn mark_read(&self, thread_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = respond_on_err!(current_user(request));
        let storage = self.get_storage(request);
        respond_on_err!(participant_thread(storage.as_ref(), thread_id, user.id).await);

        respond_on_err!(stored(storage.mark_thread_read(thread_id, user.id).await));
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Thread marked as read")))
    }
}
