use clap::builder::PossibleValue;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// 预编译产物的平台/ABI 组合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    AndroidX86_64,
    AndroidX86,
    AndroidArmeabiV7a,
    AndroidArm64V8a,
    Centos6,
    Linux,
    MacOsx,
    Ios,
    WindowsArmStore,
    WindowsWin32,
    WindowsWin32Store,
    WindowsWin64,
    WindowsWin64Store,
}

/// 产物压缩格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl Variant {
    /// 目录顺序排列的全部叶子变体
    pub const ALL: [Variant; 13] = [
        Variant::AndroidX86_64,
        Variant::AndroidX86,
        Variant::AndroidArmeabiV7a,
        Variant::AndroidArm64V8a,
        Variant::Centos6,
        Variant::Linux,
        Variant::MacOsx,
        Variant::Ios,
        Variant::WindowsArmStore,
        Variant::WindowsWin32,
        Variant::WindowsWin32Store,
        Variant::WindowsWin64,
        Variant::WindowsWin64Store,
    ];

    /// 服务器上使用的变体名称
    pub fn name(&self) -> &'static str {
        match self {
            Variant::AndroidX86_64 => "android-x86_64",
            Variant::AndroidX86 => "android-x86",
            Variant::AndroidArmeabiV7a => "android-armeabi-v7a",
            Variant::AndroidArm64V8a => "android-arm64-v8a",
            Variant::Centos6 => "centos6",
            Variant::Linux => "linux",
            Variant::MacOsx => "macosx",
            Variant::Ios => "ios",
            Variant::WindowsArmStore => "windows-arm-store",
            Variant::WindowsWin32 => "windows-win32",
            Variant::WindowsWin32Store => "windows-win32-store",
            Variant::WindowsWin64 => "windows-win64",
            Variant::WindowsWin64Store => "windows-win64-store",
        }
    }

    /// 交给子目录扩展的操作系统名
    pub fn os(&self) -> &'static str {
        match self {
            Variant::AndroidX86_64
            | Variant::AndroidX86
            | Variant::AndroidArmeabiV7a
            | Variant::AndroidArm64V8a => "android",
            Variant::Centos6 => "centos6",
            Variant::Linux => "linux",
            Variant::MacOsx => "macos",
            Variant::Ios => "ios",
            Variant::WindowsArmStore
            | Variant::WindowsWin32
            | Variant::WindowsWin32Store
            | Variant::WindowsWin64
            | Variant::WindowsWin64Store => "windows",
        }
    }

    /// 交给子目录扩展的 ABI，iOS 包含多个架构因此为空
    pub fn abi(&self) -> &'static str {
        match self {
            Variant::AndroidX86_64 => "x86_64",
            Variant::AndroidX86 => "x86",
            Variant::AndroidArmeabiV7a => "armeabi-v7a",
            Variant::AndroidArm64V8a => "arm64-v8a",
            Variant::Centos6 | Variant::Linux | Variant::MacOsx => "x86_64",
            Variant::Ios => "",
            Variant::WindowsArmStore => "arm-store",
            Variant::WindowsWin32 => "x86",
            Variant::WindowsWin32Store => "x86-store",
            Variant::WindowsWin64 => "x86_64",
            Variant::WindowsWin64Store => "x86_64-store",
        }
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        match self {
            Variant::Centos6 | Variant::Linux => ArchiveFormat::TarGz,
            _ => ArchiveFormat::Zip,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| format!("unknown variant: {s}"))
    }
}

/// 命令行可接受的变体参数：叶子变体或聚合名称
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantToken {
    Leaf(Variant),
    /// 全部 Android 变体
    Android,
    /// 全部 Windows 变体
    Windows,
    /// 全部变体
    All,
}

const TOKENS: [VariantToken; 16] = [
    VariantToken::Android,
    VariantToken::Leaf(Variant::AndroidX86_64),
    VariantToken::Leaf(Variant::AndroidX86),
    VariantToken::Leaf(Variant::AndroidArmeabiV7a),
    VariantToken::Leaf(Variant::AndroidArm64V8a),
    VariantToken::Leaf(Variant::Centos6),
    VariantToken::Leaf(Variant::Linux),
    VariantToken::Leaf(Variant::MacOsx),
    VariantToken::Leaf(Variant::Ios),
    VariantToken::Windows,
    VariantToken::Leaf(Variant::WindowsArmStore),
    VariantToken::Leaf(Variant::WindowsWin32),
    VariantToken::Leaf(Variant::WindowsWin32Store),
    VariantToken::Leaf(Variant::WindowsWin64),
    VariantToken::Leaf(Variant::WindowsWin64Store),
    VariantToken::All,
];

impl VariantToken {
    pub fn name(&self) -> &'static str {
        match self {
            VariantToken::Leaf(variant) => variant.name(),
            VariantToken::Android => "android",
            VariantToken::Windows => "windows",
            VariantToken::All => "all",
        }
    }

    /// 展开为叶子变体（目录顺序）
    pub fn expand(&self) -> Vec<Variant> {
        match self {
            VariantToken::Leaf(variant) => vec![*variant],
            VariantToken::Android => families("android"),
            VariantToken::Windows => families("windows"),
            VariantToken::All => Variant::ALL.to_vec(),
        }
    }
}

fn families(os: &str) -> Vec<Variant> {
    Variant::ALL.iter().copied().filter(|v| v.os() == os).collect()
}

impl ValueEnum for VariantToken {
    fn value_variants<'a>() -> &'a [Self] {
        &TOKENS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl fmt::Display for VariantToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 将请求的变体列表展开为去重后的叶子变体，保持首次出现的顺序
pub fn calculate_variants(requested: &[VariantToken]) -> Vec<Variant> {
    let mut result: Vec<Variant> = Vec::with_capacity(Variant::ALL.len());
    for token in requested {
        for variant in token.expand() {
            if !result.contains(&variant) {
                result.push(variant);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_passthrough_keeps_order() {
        let result = calculate_variants(&[
            VariantToken::Leaf(Variant::MacOsx),
            VariantToken::Leaf(Variant::Linux),
        ]);
        assert_eq!(result, vec![Variant::MacOsx, Variant::Linux]);
    }

    #[test]
    fn test_android_aggregate_without_duplicates() {
        let result = calculate_variants(&[
            VariantToken::Android,
            VariantToken::Leaf(Variant::AndroidX86),
            VariantToken::Android,
        ]);
        assert_eq!(
            result,
            vec![
                Variant::AndroidX86_64,
                Variant::AndroidX86,
                Variant::AndroidArmeabiV7a,
                Variant::AndroidArm64V8a,
            ]
        );
    }

    #[test]
    fn test_windows_aggregate() {
        let result = calculate_variants(&[VariantToken::Windows]);
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|v| v.os() == "windows"));
    }

    #[test]
    fn test_all_covers_catalog() {
        let result = calculate_variants(&[
            VariantToken::Leaf(Variant::Ios),
            VariantToken::All,
            VariantToken::Windows,
        ]);
        assert_eq!(result.len(), Variant::ALL.len());
        assert_eq!(result[0], Variant::Ios);
    }

    #[test]
    fn test_token_names_round_trip_through_clap() {
        for token in VariantToken::value_variants() {
            let parsed = VariantToken::from_str(token.name(), false).unwrap();
            assert_eq!(&parsed, token);
        }
        assert!(VariantToken::from_str("solaris", false).is_err());
    }

    #[test]
    fn test_os_abi_table() {
        assert_eq!(Variant::Ios.abi(), "");
        assert_eq!(Variant::MacOsx.os(), "macos");
        assert_eq!(Variant::WindowsWin32Store.abi(), "x86-store");
        assert_eq!("android-arm64-v8a".parse::<Variant>().unwrap(), Variant::AndroidArm64V8a);
        assert_eq!(Variant::Linux.archive_format(), ArchiveFormat::TarGz);
        assert_eq!(Variant::Ios.archive_format().extension(), "zip");
    }
}
