use crate::core::build::BuildIdentifier;
use crate::core::constants::server::{HOST, PRODUCT_PATH};

/// 构建产物所在目录的 URL，只使用版本号和构建号两部分
pub fn build_download_folder(build: &BuildIdentifier) -> String {
    format!(
        "http://{HOST}/builds/latestbuilds/{PRODUCT_PATH}/{}/{}",
        build.version(),
        build.build_number()
    )
}

/// 拼接单个产物的完整 URL
pub fn artifact_url(folder: &str, filename: &str) -> String {
    format!("{}/{}", folder.trim_end_matches('/'), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_suffix_not_in_url() {
        let build = BuildIdentifier::parse("3.1.0-97-EE").unwrap();
        assert_eq!(
            build_download_folder(&build),
            "http://latestbuilds.service.couchbase.com/builds/latestbuilds/couchbase-lite-core/3.1.0/97"
        );
    }

    #[test]
    fn test_artifact_url() {
        assert_eq!(artifact_url("http://host/a/", "f.zip"), "http://host/a/f.zip");
        assert_eq!(artifact_url("http://host/a", "f.zip"), "http://host/a/f.zip");
    }
}
