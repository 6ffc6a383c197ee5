use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub city: String,
    pub dashboard_title: String,
    pub nation: String,
    pub news_api_key: String,
    pub news_terms: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("city", &self.city)
            .field("dashboard_title", &self.dashboard_title)
            .field("nation", &self.nation)
            .field("news_api_key", &"[redacted]")
            .field("news_terms", &self.news_terms)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
