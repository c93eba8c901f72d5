//! 证书存储与审批流程
//!
//! 新证书一律以 pending 入库，approve 是唯一的状态变更，拒绝即删除。
//! 存储句柄在进程启动时显式构造后注入，不持有任何跨请求状态。

use crate::entities::certificates::{self, CertificateStatus};
use crate::error::{PortalError, Result};
use crate::models::CreateCertificate;
use chrono::Utc;
use std::sync::Arc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

pub type CertificateModel = certificates::Model;

#[derive(Clone, Debug)]
pub struct CertificateStore {
    db: Arc<DatabaseConnection>,
}

impl CertificateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    /// 提交新证书，状态固定为 pending
    pub async fn create(&self, input: CreateCertificate) -> Result<CertificateModel> {
        let now = Utc::now();
        let active = certificates::ActiveModel {
            id: Set(Uuid::new_v4()),
            achievement: Set(input.achievement),
            category: Set(input.category),
            image: Set(input.image),
            date: Set(input.date),
            status: Set(CertificateStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let certificate = active.insert(self.db.as_ref()).await?;
        debug!(id = %certificate.id, "certificate stored");
        Ok(certificate)
    }

    /// 列出全部证书，不过滤、不分页
    pub async fn list(&self) -> Result<Vec<CertificateModel>> {
        let list = certificates::Entity::find()
            .order_by_asc(certificates::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(list)
    }

    /// 将证书置为 approved 并返回更新后的记录；重复审批结果相同
    pub async fn approve(&self, id: Uuid) -> Result<CertificateModel> {
        let certificate = certificates::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| PortalError::not_found(id.to_string()))?;

        let mut active: certificates::ActiveModel = certificate.into();
        active.status = Set(CertificateStatus::Approved);
        active.updated_at = Set(Utc::now().into());

        match active.update(self.db.as_ref()).await {
            Ok(updated) => Ok(updated),
            // deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated) => Err(PortalError::not_found(id.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// 永久删除证书
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = certificates::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(PortalError::not_found(id.to_string()));
        }
        debug!(id = %id, "certificate deleted");
        Ok(())
    }
}

/// 解析路径中的证书标识符；无法解析的标识符不可能命中任何记录，按未找到处理
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| PortalError::not_found(raw))
}
