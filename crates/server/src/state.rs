use portal_common::CertificateStore;

#[derive(Clone)]
pub struct AppState {
    pub store: CertificateStore,
}

impl AppState {
    pub fn new(store: CertificateStore) -> Self {
        Self { store }
    }
}
