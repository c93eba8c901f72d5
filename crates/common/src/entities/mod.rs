pub mod certificates;

pub use certificates::CertificateStatus;
