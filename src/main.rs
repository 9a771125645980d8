use std::env;

use config::Config;
use dotenvy::dotenv;

use epay_bridge::domain::session::Credentials;
use epay_bridge::models::config::ServerConfig;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let [endpoint, source_key, pin] = args.as_slice() else {
        log::error!("Usage: epay-bridge <endpoint> <source-key> <pin>");
        std::process::exit(1);
    };
    let credentials = Credentials::new(endpoint, source_key, pin);

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(e) = epay_bridge::run(server_config, credentials) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
