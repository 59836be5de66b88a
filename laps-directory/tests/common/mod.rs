//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use laps_directory::{BindCredentials, DirectoryConfig, LdapDirectory, LdapPath};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 真实目录的测试上下文
pub struct TestContext {
    pub directory: LdapDirectory,
    pub path: LdapPath,
    pub credentials: BindCredentials,
    /// 已知存在且设置了 LAPS 密码的计算机名
    pub computer: String,
}

impl TestContext {
    /// 从环境变量构建：
    /// `LAPS_TEST_DOMAIN`、`LAPS_TEST_USERNAME`、`LAPS_TEST_PASSWORD`、`LAPS_TEST_COMPUTER`，
    /// 可选 `LAPS_TEST_SERVER`。
    pub fn from_env() -> Option<Self> {
        let domain = env::var("LAPS_TEST_DOMAIN").ok()?;
        let server = env::var("LAPS_TEST_SERVER").ok();
        let path = LdapPath::new(&domain, server.as_deref()).ok()?;
        let directory = LdapDirectory::new(DirectoryConfig::default()).ok()?;

        Some(Self {
            directory,
            path,
            credentials: BindCredentials::new(
                env::var("LAPS_TEST_USERNAME").ok()?,
                env::var("LAPS_TEST_PASSWORD").ok()?,
            ),
            computer: env::var("LAPS_TEST_COMPUTER").ok()?,
        })
    }
}
