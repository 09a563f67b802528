use std::fmt;

/// 签名串日志预览：去掉首尾空白，连续空白折叠为一个空格，超长以 "…" 截断
/// 按空白切分后整段写出片段，不创建 String
pub struct SignaturePreview<'a> {
    signature: &'a str,
    max_chars: usize,
}

impl fmt::Display for SignaturePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut budget = self.max_chars;
        for (idx, token) in self.signature.split_whitespace().enumerate() {
            if idx > 0 {
                if budget == 0 {
                    return f.write_str("…");
                }
                f.write_str(" ")?;
                budget -= 1;
            }

            let len = token.chars().count();
            if len > budget {
                let cut = token
                    .char_indices()
                    .nth(budget)
                    .map_or(token.len(), |(pos, _)| pos);
                f.write_str(&token[..cut])?;
                return f.write_str("…");
            }
            f.write_str(token)?;
            budget -= len;
        }
        Ok(())
    }
}

/// 构造签名串预览
#[inline(always)]
pub fn preview_compact(signature: &str, max_chars: usize) -> SignaturePreview<'_> {
    SignaturePreview {
        signature,
        max_chars,
    }
}
