//! # JWT 인증 미들웨어
//!
//! 라우트 스코프에 `.wrap()`으로 붙여 Bearer 토큰 검증과 역할 검사를 수행합니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | `Authorization` 헤더 없음, 형식 오류, 만료/위조 토큰 | 401 `{"error": "Authentication error: ..."}` |
//! | 토큰은 유효하지만 요구 역할 없음 | 403 `{"error": "Authorization error: ..."}` |
//! | 통과 | `AuthenticatedUser`를 request extensions에 저장 후 다음 서비스 호출 |
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/admin")
//!         .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!         .service(handlers::doctors::get_all_doctors)
//! );
//! ```
//!
//! 토큰 서비스는 `web::Data<TokenService>` 앱 데이터에서 꺼내 씁니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::config::Role;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    required_role: Role,
}

impl AuthMiddleware {
    /// 유효한 토큰과 `role` 역할을 함께 요구합니다.
    pub fn required_with_role(role: Role) -> Self {
        Self { required_role: role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}
