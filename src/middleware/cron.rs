use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    Error,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::{
    env,
    future::{ready, Ready},
    rc::Rc,
};

use crate::utils::bearer::extract_bearer;

/// Gates the stats recompute route behind the CRON_SECRET bearer token.
/// Requests are rejected before the wrapped service runs, so a mismatch
/// never touches the database.
pub struct CronAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for CronAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CronAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CronAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct CronAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for CronAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let secret = match env::var("CRON_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                return Box::pin(async {
                    Err(ErrorInternalServerError(json!({
                        "status": "error",
                        "message": "Cron secret not configured"
                    })))
                });
            }
        };

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(extract_bearer);

        match token {
            Some(token) if token == secret => {}
            _ => {
                return Box::pin(async {
                    Err(ErrorUnauthorized(json!({
                        "status": "error",
                        "message": "Invalid or missing authorization token"
                    })))
                });
            }
        }

        let service = self.service.clone();
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn gated_handler() -> HttpResponse {
        HttpResponse::Ok().json(json!({ "status": "success" }))
    }

    #[actix_web::test]
    async fn rejects_missing_or_mismatched_tokens() {
        env::set_var("CRON_SECRET", "topsecret");
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(CronAuthMiddleware)
                    .route("/gated", web::post().to(gated_handler)),
            ),
        )
        .await;

        let requests = [
            test::TestRequest::post().uri("/gated").to_request(),
            test::TestRequest::post()
                .uri("/gated")
                .insert_header(("Authorization", "Bearer wrong"))
                .to_request(),
            test::TestRequest::post()
                .uri("/gated")
                .insert_header(("Authorization", "topsecret"))
                .to_request(),
        ];

        for req in requests {
            match test::try_call_service(&app, req).await {
                Ok(_) => panic!("request should be rejected"),
                Err(err) => assert_eq!(
                    err.as_response_error().status_code(),
                    StatusCode::UNAUTHORIZED
                ),
            }
        }
    }

    #[actix_web::test]
    async fn passes_through_with_matching_secret() {
        env::set_var("CRON_SECRET", "topsecret");
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(CronAuthMiddleware)
                    .route("/gated", web::post().to(gated_handler)),
            ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/gated")
            .insert_header(("Authorization", "Bearer topsecret"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
