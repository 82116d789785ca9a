use std::env;

pub struct ClientConfig {
    pub api_base_url: String,
    pub token_file: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("TASKFORGE_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/api/v1".to_string()),
            token_file: env::var("TASKFORGE_TOKEN_FILE").unwrap_or_else(|_| {
                let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
                format!("{}/.taskforge/token", home)
            }),
        }
    }

    /// Loads a `.env` file if one is present, then reads the environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::remove_var("TASKFORGE_API_URL");
        env::remove_var("TASKFORGE_TOKEN_FILE");

        let config = ClientConfig::from_env();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api/v1");
        assert!(config.token_file.ends_with(".taskforge/token"));

        // Test custom values
        env::set_var("TASKFORGE_API_URL", "https://tasks.example.com/api/v1");
        env::set_var("TASKFORGE_TOKEN_FILE", "/tmp/taskforge-test-token");

        let config = ClientConfig::from_env();

        assert_eq!(config.api_base_url, "https://tasks.example.com/api/v1");
        assert_eq!(config.token_file, "/tmp/taskforge-test-token");

        env::remove_var("TASKFORGE_API_URL");
        env::remove_var("TASKFORGE_TOKEN_FILE");
    }
}
