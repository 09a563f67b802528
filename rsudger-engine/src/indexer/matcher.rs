use fancy_regex::{Regex, RegexBuilder};

/// 去掉数据源的 PCRE 装饰：前导分隔符 `/` 与尾部 flag 后缀（`/si`、`/i`）
/// 大小写不敏感由编译选项强制开启，flag 本身无需保留
/// 只去掉一个后缀，正文自身以 `/i` 结尾时（如 `wap\/i`）保持原样
pub fn strip_decoration(raw: &str) -> &str {
    match raw.strip_prefix('/') {
        Some(inner) => inner
            .strip_suffix("/si")
            .or_else(|| inner.strip_suffix("/i"))
            .unwrap_or(inner),
        None => raw.strip_suffix("/si").unwrap_or(raw),
    }
}

/// 运行时匹配器
/// 封装回溯型正则（支持反向引用/环视），匹配期可能因回溯超限返回错误
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// 编译正则（强制忽略大小写）
    pub fn compile(pattern: &str, backtrack_limit: usize) -> Result<Self, fancy_regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        builder.case_insensitive(true);
        builder.backtrack_limit(backtrack_limit);
        let regex = builder.build()?;
        Ok(Self { regex })
    }

    /// 是否定义了捕获组（0 号为整体匹配，不算）
    #[inline(always)]
    pub fn has_groups(&self) -> bool {
        self.regex.captures_len() > 1
    }

    /// 简单匹配判断
    #[inline(always)]
    pub fn matches(&self, input: &str) -> Result<bool, fancy_regex::Error> {
        self.regex.is_match(input)
    }

    /// 匹配并取第一个捕获组
    /// 返回：None=未匹配；Some(None)=匹配但分组未参与或为空；Some(Some(v))=捕获值
    pub fn capture_first(
        &self,
        input: &str,
    ) -> Result<Option<Option<String>>, fancy_regex::Error> {
        let Some(captures) = self.regex.captures(input)? else {
            return Ok(None);
        };
        let value = captures
            .get(1)
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(Some(value))
    }

    /// 描述匹配器规则（用于日志/调试输出）
    #[inline(always)]
    pub fn describe(&self) -> &str {
        self.regex.as_str()
    }
}
