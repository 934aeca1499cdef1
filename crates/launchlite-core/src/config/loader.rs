//! 统一环境变量加载逻辑
//!
//! 集中维护 fallback 链，避免在业务代码中重复 `or_else` 调用。

use std::env;

/// 加载当前目录下的 `.env` 到环境变量（不覆盖已存在的变量）
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some(eq_pos) = line.find('=') {
                    let key = line[..eq_pos].trim();
                    let mut value = line[eq_pos + 1..].trim();
                    if (value.starts_with('"') && value.ends_with('"'))
                        || (value.starts_with('\'') && value.ends_with('\''))
                    {
                        value = &value[1..value.len() - 1];
                    }
                    if !key.is_empty() && env::var(key).is_err() {
                        env::set_var(key, value);
                    }
                }
            }
        }
    });
}

/// 从主变量或别名链读取环境变量，失败时使用默认值
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// 从主变量或别名链读取，返回 Option（空值视为未设置）
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// 解析布尔型环境变量：1/true/yes 为 true，0/false/no 为 false
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

/// 检查环境变量是否存在（任意主变量或别名）
pub fn env_is_set(primary: &str, aliases: &[&str]) -> bool {
    env::var(primary).is_ok() || aliases.iter().any(|a| env::var(a).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_prefers_primary_over_alias() {
        env::set_var("LLTEST_PRIMARY", "p");
        env::set_var("LLTEST_ALIAS", "a");
        assert_eq!(
            env_or("LLTEST_PRIMARY", &["LLTEST_ALIAS"], || "d".into()),
            "p"
        );
        env::remove_var("LLTEST_PRIMARY");
        assert_eq!(
            env_or("LLTEST_PRIMARY", &["LLTEST_ALIAS"], || "d".into()),
            "a"
        );
        env::remove_var("LLTEST_ALIAS");
        assert_eq!(
            env_or("LLTEST_PRIMARY", &["LLTEST_ALIAS"], || "d".into()),
            "d"
        );
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        env::set_var("LLTEST_BLANK", "   ");
        assert_eq!(env_optional("LLTEST_BLANK", &[]), None);
        env::remove_var("LLTEST_BLANK");
    }

    #[test]
    fn test_env_bool_parses_negations() {
        env::set_var("LLTEST_BOOL", "0");
        assert!(!env_bool("LLTEST_BOOL", &[], true));
        env::set_var("LLTEST_BOOL", "yes");
        assert!(env_bool("LLTEST_BOOL", &[], false));
        env::remove_var("LLTEST_BOOL");
        assert!(env_bool("LLTEST_BOOL", &[], true));
    }
}
