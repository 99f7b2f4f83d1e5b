use clap::Args;

/// Settings of the HTTP server, read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "FORMBUILDER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "FORMBUILDER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "FORMBUILDER_PAYLOAD_LIMIT", default_value_t = 1024 * 1024)]
    pub payload_limit: usize,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
