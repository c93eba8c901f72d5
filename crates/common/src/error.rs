//! Portal 统一错误类型定义
//!
//! 存储层返回的错误类型，HTTP 层再按操作映射为固定的状态码与响应消息。

use thiserror::Error;

/// Portal 统一错误类型
#[derive(Error, Debug)]
pub enum PortalError {
    /// 证书不存在 (404)
    #[error("certificate not found: {0}")]
    NotFound(String),

    /// 字段值无法转换为文本 (500)
    #[error("invalid field value: {0}")]
    InvalidField(String),

    /// 数据库错误 (500)
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl PortalError {
    /// 创建未找到错误
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}

/// Portal Result 类型别名
pub type Result<T> = std::result::Result<T, PortalError>;
