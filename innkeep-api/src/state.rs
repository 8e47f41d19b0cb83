use innkeep_core::DataContext;

use crate::session::TokenService;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub secure_cookie: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub data: DataContext,
    pub tokens: TokenService,
    pub auth: AuthConfig,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(data: DataContext, auth: AuthConfig, allowed_origins: Vec<String>) -> Self {
        let tokens = TokenService::new(&auth.secret, auth.expiration);
        Self {
            data,
            tokens,
            auth,
            allowed_origins,
        }
    }
}
