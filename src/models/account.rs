use serde::Deserialize;

/// 已注册的账号
///
/// 启动时加载一次，之后只读。
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    /// 登录用户名
    #[serde(rename = "username")]
    pub identity: String,
    /// 登录密码
    #[serde(rename = "password")]
    pub secret: String,
    /// 显示名称
    #[serde(rename = "name")]
    pub display_name: String,
    /// 所属分组，至少一个
    #[serde(alias = "category")]
    pub groups: Vec<String>,
}

impl AccountRecord {
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// 账号目录
///
/// 进程级只读注册表，按文件顺序保存账号，不需要任何同步。
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: Vec<AccountRecord>,
}

impl AccountDirectory {
    /// 由已校验的账号列表创建目录（校验见 `loaders::toml_loader`）
    pub fn new(accounts: Vec<AccountRecord>) -> Self {
        Self { accounts }
    }

    /// 按注册顺序返回属于指定分组的账号，没有匹配时返回空列表
    pub fn accounts_in_group(&self, group: &str) -> Vec<AccountRecord> {
        self.accounts
            .iter()
            .filter(|account| account.in_group(group))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// 所有出现过的分组（去重，保持首次出现的顺序）
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for group in self.accounts.iter().flat_map(|a| a.groups.iter()) {
            if !groups.contains(group) {
                groups.push(group.clone());
            }
        }
        groups
    }
}
