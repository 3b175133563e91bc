use crate::error::{AppError, AppResult};
use crate::models::account::{AccountDirectory, AccountRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    accounts: Vec<AccountRecord>,
}

/// 从 TOML 文件加载账号目录
pub async fn load_account_directory(path: &Path) -> AppResult<AccountDirectory> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| AppError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;

    let directory = parse_account_directory(&content, &path.display().to_string())?;

    tracing::info!(
        "成功加载 {} 个账号: {}",
        directory.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(directory)
}

/// 解析并校验账号表
///
/// - 每个账号至少属于一个分组
/// - 用户名（忽略大小写）不能重复
pub fn parse_account_directory(content: &str, origin: &str) -> AppResult<AccountDirectory> {
    let file: AccountsFile = toml::from_str(content).map_err(|source| AppError::TomlParseFailed {
        path: origin.to_string(),
        source,
    })?;

    let mut seen = HashSet::new();
    for account in &file.accounts {
        if account.groups.is_empty() {
            return Err(AppError::EmptyGroupSet {
                identity: account.identity.clone(),
            });
        }
        if !seen.insert(account.identity.to_lowercase()) {
            return Err(AppError::DuplicateAccount {
                identity: account.identity.clone(),
            });
        }
    }

    if file.accounts.is_empty() {
        tracing::warn!("⚠️ 账号文件 {} 中没有任何账号", origin);
    }

    Ok(AccountDirectory::new(file.accounts))
}
