//! # 서비스 레지스트리
//!
//! 기동 시점에 저장소, 해셔, 서비스를 한 번 조립하여 전역 [`ServiceLocator`]에 등록하고,
//! 등록된 인스턴스를 actix-web 앱 데이터(`web::Data`)로 모든 워커에 공유합니다.
//!
//! `ServiceLocator`는 `TypeId` 기준의 싱글톤 컨테이너입니다. 저장소는
//! `Arc<dyn DoctorRepository>`로 주입되므로 자동 생성 매크로 대신
//! `ServiceLocator::set`으로 직접 등록합니다.
//!
//! ## 초기화 순서
//!
//! ```text
//! 1. 저장소 연결     STORAGE_BACKEND=mongodb → Database::new() + MongoDoctorRepository
//!                   STORAGE_BACKEND=memory  → InMemoryDoctorRepository
//! 2. 저장소 초기화   DoctorRepository::init() (인덱스 생성)
//! 3. 서비스 생성     DoctorService, TokenService → ServiceLocator::set
//! 4. 앱 데이터       ServiceRegistry::from_locator()
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::initialize(StorageConfig::backend()).await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| registry.configure(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use actix_web::web;
use once_cell::sync::Lazy;
use crate::config::StorageBackend;
use crate::db::Database;
use crate::repositories::doctors::{InMemoryDoctorRepository, MongoDoctorRepository};
use crate::repositories::DoctorRepository;
use crate::services::auth::{BcryptPasswordHasher, PasswordHasher, TokenService};
use crate::services::doctors::DoctorService;
use crate::utils::display_terminal::{
    print_boxed_title, print_step_complete, print_step_start, print_sub_task,
};

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

/// 전역 싱글톤 컨테이너
///
/// 타입마다 하나의 `Arc<T>` 인스턴스를 보관합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        let clean_name = type_name.rsplit("::").next().unwrap_or(type_name);
        log::debug!("📦 Registering: {}", clean_name);

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스를 꺼냅니다.
    pub fn get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }
}

/// 조립이 끝난 서비스 묶음
///
/// 내부 값은 모두 `web::Data`(Arc)이므로 `clone`은 참조 카운트만 늘립니다.
#[derive(Clone)]
pub struct ServiceRegistry {
    doctor_service: web::Data<DoctorService>,
    token_service: web::Data<TokenService>,
}

impl ServiceRegistry {
    pub fn new(
        repository: Arc<dyn DoctorRepository>,
        hasher: Arc<dyn PasswordHasher>,
        token_service: TokenService,
    ) -> Self {
        Self {
            doctor_service: web::Data::new(DoctorService::new(repository, hasher)),
            token_service: web::Data::new(token_service),
        }
    }

    /// [`ServiceLocator`]에 등록된 서비스로 레지스트리를 만듭니다.
    pub fn from_locator() -> Result<Self, Box<dyn std::error::Error>> {
        let doctor_service = ServiceLocator::get::<DoctorService>()
            .ok_or("DoctorService is not registered")?;
        let token_service = ServiceLocator::get::<TokenService>()
            .ok_or("TokenService is not registered")?;

        Ok(Self {
            doctor_service: web::Data::from(doctor_service),
            token_service: web::Data::from(token_service),
        })
    }

    /// 환경 설정에 따라 저장소를 연결하고 서비스를 조립합니다.
    pub async fn initialize(backend: StorageBackend) -> Result<Self, Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING DOCTOR RECORD SERVICE");

        print_step_start(1, "Connecting to storage");
        let repository: Arc<dyn DoctorRepository> = match backend {
            StorageBackend::MongoDb => {
                print_sub_task(backend.as_str(), "Connecting...");
                let database = Arc::new(Database::new().await?);
                print_sub_task(database.database_name(), "✓ Connected");
                let repository = MongoDoctorRepository::new(&database);
                ServiceLocator::set(database);
                Arc::new(repository)
            }
            StorageBackend::Memory => {
                print_sub_task(backend.as_str(), "✓ Ready");
                Arc::new(InMemoryDoctorRepository::new())
            }
        };
        print_step_complete(1, "Storage connected");

        print_step_start(2, "Preparing repository");
        repository.init().await?;
        print_sub_task("doctors", "✓ Indexes ready");
        print_step_complete(2, "Repository prepared");

        print_step_start(3, "Creating services");
        let hasher = BcryptPasswordHasher::from_env();
        print_sub_task("password_hasher", &format!("✓ bcrypt cost {}", hasher.cost()));
        ServiceLocator::set(Arc::new(DoctorService::new(repository, Arc::new(hasher))));
        print_sub_task("doctor_service", "✓ Registered");
        ServiceLocator::set(Arc::new(TokenService::from_env()));
        print_sub_task("token_service", "✓ Registered");
        print_step_complete(3, "Services created");

        Self::from_locator()
    }

    /// 앱 데이터 등록. `App::configure`에서 호출합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.doctor_service.clone())
            .app_data(self.token_service.clone());
    }

    pub fn doctor_service(&self) -> web::Data<DoctorService> {
        self.doctor_service.clone()
    }

    pub fn token_service(&self) -> web::Data<TokenService> {
        self.token_service.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        self.doctor_service.backend_name()
    }
}
