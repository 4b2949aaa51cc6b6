//! CLI module
//!
//! Every option can be given as a flag or through its environment variable.

use crate::logging::LogFormat;
use clap::Parser;
use netseg_common::config::{parse_service_list, IsolationProfile, ProbeConfig, ServiceConfig};
use netseg_common::error::CommonError;
use netseg_common::policy::Mode;

/// Network segmentation demo service
#[derive(Parser, Debug, Clone)]
#[command(name = "netseg-service")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SERVICE_NAME                Name of this instance (default: service1)
    PUBLIC_PORT                 Public listener port (default: 8080)
    PRIVATE_PORT                Private listener port (default: 8081)
    APP_MODE                    public | private | all (default: all)
    BIND_HOST                   Bind address (default: 0.0.0.0)
    PRIVATE_LISTENER            Also serve /private/info on PRIVATE_PORT (true/false, 1/0, yes/no)
    KNOWN_SERVICES              Comma separated service registry
    PUBLIC_PEER_URL_TEMPLATE    Public probe base URL, {service} is substituted
    PRIVATE_PEER_URL_TEMPLATE   Private probe base URL, {service} is substituted
    PROBE_TIMEOUT_SECS          Per-probe timeout (default: 5)
    ISOLATION_PROFILE           isolation | blocking (default: isolation)
    SECRET_KEY                  Secret reported by /private/info
    LOG_LEVEL                   Log filter (default: info, falls back to RUST_LOG)
    LOG_FORMAT                  text | json (default: text)
"#)]
pub struct Cli {
    /// Name of this service instance
    #[arg(long, default_value = "service1", env = "SERVICE_NAME")]
    pub service_name: String,

    /// Public listener port
    #[arg(long, default_value = "8080", env = "PUBLIC_PORT")]
    pub public_port: u16,

    /// Private listener port
    #[arg(long, default_value = "8081", env = "PRIVATE_PORT")]
    pub private_port: u16,

    /// Route set served by this instance
    #[arg(long, default_value = "all", env = "APP_MODE")]
    pub mode: Mode,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "BIND_HOST")]
    pub host: String,

    /// Start a second listener on the private port serving only /private/info
    #[arg(
        long,
        env = "PRIVATE_LISTENER",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub private_listener: bool,

    /// Comma separated list of every service in the deployment
    #[arg(long, default_value = "service1,service2,service3", env = "KNOWN_SERVICES")]
    pub known_services: String,

    /// Base URL template for public probes
    #[arg(long, default_value = "http://{service}:8080", env = "PUBLIC_PEER_URL_TEMPLATE")]
    pub public_peer_url_template: String,

    /// Base URL template for private probes
    #[arg(
        long,
        default_value = "http://{service}-private:8081",
        env = "PRIVATE_PEER_URL_TEMPLATE"
    )]
    pub private_peer_url_template: String,

    /// Per-probe timeout in seconds
    #[arg(long, default_value = "5", env = "PROBE_TIMEOUT_SECS")]
    pub probe_timeout_secs: u64,

    /// Vocabulary used to classify private probes
    #[arg(long, default_value = "isolation", env = "ISOLATION_PROFILE")]
    pub isolation_profile: IsolationProfile,

    /// Secret reported by /private/info
    #[arg(long, default_value = "super-secret-key-12345", env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Log filter directive
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Convert the parsed arguments into a validated service configuration
    pub fn into_config(self) -> Result<ServiceConfig, CommonError> {
        let config = ServiceConfig {
            service_name: self.service_name,
            bind_host: self.host,
            public_port: self.public_port,
            private_port: self.private_port,
            mode: self.mode,
            private_listener: self.private_listener,
            secret_key: self.secret_key,
            probe: ProbeConfig {
                known_services: parse_service_list(&self.known_services),
                public_url_template: self.public_peer_url_template,
                private_url_template: self.private_peer_url_template,
                timeout_secs: self.probe_timeout_secs,
                profile: self.isolation_profile,
            },
        };
        config.validate()?;
        Ok(config)
    }
}
