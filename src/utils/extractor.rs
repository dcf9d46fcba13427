//! Path parameter extractors that answer with the JSON envelope instead of
//! actix's plain-text 404 when an id does not parse.

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{param}': '{raw}'");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, message.clone()));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),+ $(,)?) => {
        $(
            #[doc = concat!("Positive `i64` read from the `{", $param, "}` path segment.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )+
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("id", "42")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.expect("valid id");
        assert_eq!(id, SafeIDI64(42));
    }

    #[actix_web::test]
    async fn test_invalid_ids_are_rejected() {
        for raw in ["abc", "0", "-3"] {
            let req = TestRequest::default()
                .param("student_id", raw)
                .to_http_request();
            let err = SafeStudentIdI64::extract(&req).await.expect_err("invalid id");
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
