pub mod config;
pub mod entities;
pub mod error;
pub mod models;
pub mod store;

// ============ 重新导出常用类型 ============

// 错误处理
pub use error::PortalError;

// 证书存储
pub use store::CertificateStore;
