use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{info, warn};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    www_root: String,
    port: u16,
    local: bool,
    worker_threads: usize,
    max_connections: usize,
    read_timeout_secs: u64,
    chunk_size: usize,
    directory_listing: bool,
    extensionless_fallback: bool,
    not_found_template: String,
    server_error_template: String,
    listing_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            www_root: "www".to_string(),
            port: 7878,
            local: true,
            worker_threads: 0,
            max_connections: 1024,
            read_timeout_secs: 30,
            chunk_size: 65536, // 64KB
            directory_listing: true,
            extensionless_fallback: true,
            not_found_template: "static/error404.html".to_string(),
            server_error_template: "static/error500.html".to_string(),
            listing_template: "static/listing.html".to_string(),
        }
    }

    /// 从 TOML 文件载入。文件缺失或格式错误时使用默认配置。
    pub fn from_toml(filename: &str) -> Self {
        match fs::read_to_string(filename) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) => {
                warn!("无法读取配置文件{}：{}，使用默认配置", filename, e);
                Self::new().normalized()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Self {
        let raw_config: Config = match toml::from_str(s) {
            Ok(t) => t,
            Err(e) => {
                warn!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        raw_config.normalized()
    }

    fn normalized(mut self) -> Self {
        if self.worker_threads == 0 {
            self.worker_threads = num_cpus::get();
        }
        if self.max_connections == 0 {
            warn!("max_connections被设置为0，这会阻塞所有连接，因此该值将被改为1。");
            self.max_connections = 1;
        }
        if self.chunk_size == 0 {
            self.chunk_size = 65536;
        }
        info!(
            "www root: {}，最大并发连接数：{}",
            self.www_root, self.max_connections
        );
        self
    }
}

impl Config {
    pub fn www_root(&self) -> &str {
        &self.www_root
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn local(&self) -> bool {
        self.local
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// 0 表示不设置读超时
    pub fn read_timeout_secs(&self) -> u64 {
        self.read_timeout_secs
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn directory_listing(&self) -> bool {
        self.directory_listing
    }

    pub fn extensionless_fallback(&self) -> bool {
        self.extensionless_fallback
    }

    pub fn not_found_template(&self) -> &str {
        &self.not_found_template
    }

    pub fn server_error_template(&self) -> &str {
        &self.server_error_template
    }

    pub fn listing_template(&self) -> &str {
        &self.listing_template
    }
}
