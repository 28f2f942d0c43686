//! # Data Transfer Objects
//!
//! HTTP 계층과 서비스 계층 사이에서 주고받는 요청/응답 구조체입니다.
//! 엔티티를 직접 노출하지 않고 DTO로 변환하여 비밀번호 해시 같은 민감 정보를 차단합니다.
//!
//! ```text
//! dto/
//! ├── doctors/
//! │   ├── request/   - RegisterDoctorRequest, UpdateDoctorRequest, DoctorLoginRequest
//! │   └── response/  - DoctorResponse, MessageResponse, CountResponse, ...
//! └── page.rs        - Page<T>
//! ```

pub mod doctors;
pub mod page;

pub use doctors::*;
pub use page::Page;
