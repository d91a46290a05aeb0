// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 模板渲染模块
//!
//! 模板在每次请求时从磁盘读取，不做缓存。渲染规则：
//! - 同时含有 `{{` 和 `}}` 的行，把其中指定的占位符替换为计算出的内容；
//! - 所有行直接拼接，不插入换行符。

use std::path::{Path, PathBuf};

use log::error;

use crate::{
    exception::Exception,
    util::{escape_html, sort_dir_entries},
};

/// 读取模板并替换占位符。
pub async fn render(
    template_path: &str,
    placeholder: &str,
    replacement: &str,
) -> Result<String, Exception> {
    let template = match tokio::fs::read_to_string(template_path).await {
        Ok(t) => t,
        Err(e) => {
            error!("无法读取模板{}：{}", template_path, e);
            return Err(Exception::TemplateUnavailable(template_path.to_string()));
        }
    };
    Ok(substitute(&template, placeholder, replacement))
}

fn substitute(template: &str, placeholder: &str, replacement: &str) -> String {
    let mut content = String::with_capacity(template.len() + replacement.len());
    for line in template.lines() {
        if line.contains("{{") && line.contains("}}") {
            content.push_str(&line.replace(placeholder, replacement));
        } else {
            content.push_str(line);
        }
    }
    content
}

/// 列出目录的直接子项，目录在前，其余按名称排序。
pub async fn listing_entries(dir: &Path) -> Result<Vec<PathBuf>, Exception> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        entries.push(entry.path());
    }
    sort_dir_entries(&mut entries);
    Ok(entries)
}

/// 生成目录列表的 HTML 片段。
///
/// 普通文件渲染为指向 `<link_base>/<文件名>` 的链接，子目录只显示名称。
/// `link_base` 是请求中的目录路径，不带结尾的 `/`，根目录为空串。
pub async fn render_listing(dir: &Path, link_base: &str) -> Result<String, Exception> {
    let entries = listing_entries(dir).await?;

    let heading = match dir.file_name() {
        Some(name) => escape_html(&name.to_string_lossy()),
        None => "/".to_string(),
    };

    let mut list = format!("<h2>{}</h2>\n", heading);
    for entry in &entries {
        let name = match entry.file_name() {
            Some(n) => escape_html(&n.to_string_lossy()),
            None => continue,
        };
        if entry.is_file() {
            list.push_str(&format!(
                "<p><a href='{}/{}'>File {}</a></p>\n",
                link_base, name, name
            ));
        } else if entry.is_dir() {
            list.push_str(&format!("<p>Directory {}</p>\n", name));
        }
    }
    Ok(list)
}
