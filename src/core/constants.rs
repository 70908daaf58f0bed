//! 应用程序常量定义
//!
//! 本模块包含全局使用的常量，避免魔数并提供统一的配置值。

/// 构建产物服务器相关常量
pub mod server {
    /// 构建产物服务器地址
    pub const HOST: &str = "latestbuilds.service.couchbase.com";
    /// 产品在服务器上的路径
    pub const PRODUCT_PATH: &str = "couchbase-lite-core";
    /// 产物文件名前缀
    pub const ARTIFACT_PREFIX: &str = "couchbase-lite-core";
}

/// 网络相关常量
pub mod network {
    /// 默认连接超时时间（秒）
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
    /// 默认请求超时时间（秒），大文件下载需要较长时间
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;
    /// User-Agent
    pub const USER_AGENT: &str = concat!("litecore-fetch/", env!("CARGO_PKG_VERSION"));
}

/// 构建号相关常量
pub mod build {
    /// 提交信息中标记构建号的前缀
    pub const COMMIT_TAG: &str = "Build-To-Use:";
    /// 企业版后缀
    pub const ENTERPRISE_SUFFIX: &str = "-EE";
}

/// 扩展相关常量
pub mod extension {
    /// 扩展文件名
    pub const FILE_NAME: &str = "platform_fetch.toml";
}

/// 退出码
pub mod exit_code {
    /// 既没有构建号也没有仓库路径
    pub const MISSING_SOURCE: i32 = -1;
    /// 构建号解析或校验失败
    pub const BAD_BUILD: i32 = 1;
}
