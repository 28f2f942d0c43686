//! # 의사 리포지토리 (메모리)
//!
//! 프로세스 메모리에만 저장하는 구현입니다. `STORAGE_BACKEND=memory`로 기동하거나
//! 서비스/라우트 테스트에서 MongoDB 없이 사용합니다.
//!
//! 이메일/전화번호 유일성은 쓰기 락을 잡은 상태에서 확인하므로
//! MongoDB 유니크 인덱스와 같은 보장을 제공합니다.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::{
    core::errors::{AppError, AppResult},
    domain::entities::doctors::{Doctor, DoctorStatus, Gender},
    repositories::{DoctorRepository, DUPLICATE_EMAIL, DUPLICATE_PHONE},
};

/// 메모리 기반 의사 리포지토리
///
/// 삽입 순서대로 `Vec`에 보관합니다.
#[derive(Default)]
pub struct InMemoryDoctorRepository {
    doctors: RwLock<Vec<Doctor>>,
}

impl InMemoryDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Doctor>>> {
        self.doctors
            .read()
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Doctor>>> {
        self.doctors
            .write()
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 조건에 맞는 레코드를 최신 등록 순으로 반환합니다.
    ///
    /// 생성 시각이 같으면 나중에 삽입된 레코드가 앞에 옵니다.
    fn select<F>(&self, predicate: F) -> AppResult<Vec<Doctor>>
    where
        F: Fn(&Doctor) -> bool,
    {
        let doctors = self.read()?;
        let mut selected: Vec<Doctor> = doctors
            .iter()
            .rev()
            .filter(|doctor| predicate(doctor))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(selected)
    }

    fn find_first<F>(&self, predicate: F) -> AppResult<Option<Doctor>>
    where
        F: Fn(&Doctor) -> bool,
    {
        Ok(self.read()?.iter().find(|doctor| predicate(doctor)).cloned())
    }
}

/// `candidate`와 이메일/전화번호가 겹치는 다른 레코드가 있는지 확인합니다.
fn check_unique(doctors: &[Doctor], candidate: &Doctor) -> AppResult<()> {
    let others = doctors.iter().filter(|d| d.id.is_none() || d.id != candidate.id);

    for other in others {
        if other.email == candidate.email {
            return Err(AppError::ConflictError(DUPLICATE_EMAIL.to_string()));
        }
        if other.phone == candidate.phone {
            return Err(AppError::ConflictError(DUPLICATE_PHONE.to_string()));
        }
    }

    Ok(())
}

#[async_trait]
impl DoctorRepository for InMemoryDoctorRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Doctor>> {
        self.find_first(|doctor| doctor.id.as_ref() == Some(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Doctor>> {
        self.find_first(|doctor| doctor.email == email)
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Doctor>> {
        self.find_first(|doctor| doctor.phone == phone)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Doctor>> {
        self.select(|doctor| doctor.name == name)
    }

    async fn find_by_gender(&self, gender: Gender) -> AppResult<Vec<Doctor>> {
        self.select(|doctor| doctor.gender == gender)
    }

    async fn find_by_specialization(&self, specialization: &str) -> AppResult<Vec<Doctor>> {
        self.select(|doctor| doctor.specialization == specialization)
    }

    async fn find_by_status(&self, status: DoctorStatus) -> AppResult<Vec<Doctor>> {
        self.select(|doctor| doctor.status == status)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<Vec<Doctor>> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self
            .select(|_| true)?
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn find_specializations(&self) -> AppResult<Vec<String>> {
        let mut specializations: Vec<String> = self
            .read()?
            .iter()
            .map(|doctor| doctor.specialization.clone())
            .collect();
        specializations.sort();
        specializations.dedup();

        Ok(specializations)
    }

    async fn save(&self, mut doctor: Doctor) -> AppResult<Doctor> {
        let mut doctors = self.write()?;
        check_unique(&doctors, &doctor)?;

        match doctor.id {
            Some(id) => {
                let slot = doctors
                    .iter_mut()
                    .find(|stored| stored.id == Some(id))
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Doctor with ID {} not found.", id.to_hex()))
                    })?;
                *slot = doctor.clone();
            }
            None => {
                doctor.id = Some(ObjectId::new());
                doctors.push(doctor.clone());
            }
        }

        Ok(doctor)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> AppResult<bool> {
        let mut doctors = self.write()?;
        let before = doctors.len();
        doctors.retain(|doctor| doctor.id.as_ref() != Some(id));

        Ok(doctors.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.read()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::doctors::NewDoctor;

    fn doctor(email: &str, phone: &str, specialization: &str) -> Doctor {
        Doctor::new(NewDoctor {
            name: "Dr. Test".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password_hash: "hash".to_string(),
            specialization: specialization.to_string(),
            gender: Gender::Other,
            status: DoctorStatus::Active,
            dob: None,
            image: None,
        })
    }

    #[actix_web::test]
    async fn test_save_assigns_id_and_finds() {
        let repo = InMemoryDoctorRepository::new();
        let saved = repo.save(doctor("a@x.com", "1", "Surgery")).await.unwrap();
        let id = saved.id.unwrap();

        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().email, "a@x.com");
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(repo.find_by_phone("1").await.unwrap().is_some());
        assert!(repo.find_by_phone("2").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_unique_email_and_phone() {
        let repo = InMemoryDoctorRepository::new();
        let first = repo.save(doctor("a@x.com", "1", "Surgery")).await.unwrap();

        let err = repo.save(doctor("a@x.com", "2", "Surgery")).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(msg) if msg == DUPLICATE_EMAIL));

        let err = repo.save(doctor("b@x.com", "1", "Surgery")).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(msg) if msg == DUPLICATE_PHONE));

        // 자기 자신과는 충돌하지 않음
        assert!(repo.save(first).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_page_is_newest_first() {
        let repo = InMemoryDoctorRepository::new();
        for i in 0..5 {
            repo.save(doctor(&format!("{}@x.com", i), &i.to_string(), "Surgery"))
                .await
                .unwrap();
        }

        let page = repo.find_page(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "4@x.com");
        assert_eq!(page[1].email, "3@x.com");

        let last = repo.find_page(4, 2).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].email, "0@x.com");

        assert!(repo.find_page(10, 2).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_specializations_are_distinct_and_sorted() {
        let repo = InMemoryDoctorRepository::new();
        repo.save(doctor("a@x.com", "1", "Surgery")).await.unwrap();
        repo.save(doctor("b@x.com", "2", "Cardiology")).await.unwrap();
        repo.save(doctor("c@x.com", "3", "Surgery")).await.unwrap();

        assert_eq!(
            repo.find_specializations().await.unwrap(),
            vec!["Cardiology".to_string(), "Surgery".to_string()]
        );
        assert_eq!(repo.find_by_specialization("Surgery").await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_delete_by_id() {
        let repo = InMemoryDoctorRepository::new();
        let id = repo.save(doctor("a@x.com", "1", "Surgery")).await.unwrap().id.unwrap();

        assert!(repo.delete_by_id(&id).await.unwrap());
        assert!(!repo.delete_by_id(&id).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }
}
