// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协议参数与常量模块
//!
//! - 本服务器会产生的状态码及其原因短语。
//! - 文件后缀名到 MIME 类型的映射表。
//! - 模板占位符与 HTTP 方法、版本的强类型枚举。

use lazy_static::lazy_static;
use std::collections::HashMap;

/// HTTP 协议规定的换行符
pub const CRLF: &str = "\r\n";

/// 找不到后缀映射时使用的 MIME 类型。这是一个编造的类型，浏览器通常会提示下载。
pub const UNKNOWN_MIME: &str = "x-application/x-unknown";

/// 模板页面使用的 MIME 类型
pub const HTML_MIME: &str = "text/html";

/// 目录列表模板中的占位符
pub const LIST_PLACEHOLDER: &str = "{{ list }}";

/// 错误页模板中的占位符，会被替换为 `<code> <reason>`
pub const STATUS_PLACEHOLDER: &str = "{{ status }}";

lazy_static! {
    /// 状态码与原因短语的映射表。
    pub static ref STATUS_CODES: HashMap<u16, &'static str> = {
        let mut map = HashMap::new();
        map.insert(200, "OK");
        map.insert(400, "Bad Request");
        map.insert(403, "Forbidden");
        map.insert(404, "Not Found");
        map.insert(500, "Internal Server Error");
        map.insert(501, "Not Implemented");
        map
    };
}

lazy_static! {
    /// 文件后缀名（小写）到 MIME 类型的映射表。
    pub static ref MIME_TYPES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("txt", "text/plain");
        map.insert("html", "text/html");
        map.insert("htm", "text/html");
        map.insert("css", "text/css");
        map.insert("js", "text/javascript");
        map.insert("java", "text/x-java");
        map.insert("jpeg", "image/jpeg");
        map.insert("jpg", "image/jpeg");
        map.insert("png", "image/png");
        map.insert("gif", "image/gif");
        map.insert("ico", "image/x-icon");
        map.insert("class", "application/java-vm");
        map.insert("jar", "application/java-archive");
        map.insert("zip", "application/zip");
        map.insert("xml", "application/xml");
        map.insert("xhtml", "application/xhtml+xml");
        map
    };
}

/// 状态码对应的原因短语，未登记的状态码返回 `Unknown`。
pub fn reason_phrase(code: u16) -> &'static str {
    STATUS_CODES.get(&code).copied().unwrap_or("Unknown")
}

/// 支持的 HTTP 协议版本
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpVersion {
    V1_0,
    V1_1,
}

/// 支持的请求方法，目前只有 GET
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpRequestMethod {
    Get,
}

use std::fmt;

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HttpVersion::V1_0 => write!(f, "HTTP/1.0"),
            HttpVersion::V1_1 => write!(f, "HTTP/1.1"),
        }
    }
}

impl fmt::Display for HttpRequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HttpRequestMethod::Get => write!(f, "GET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_phrase() {
        assert_eq!(reason_phrase(200), "OK");
        assert_eq!(reason_phrase(403), "Forbidden");
        assert_eq!(reason_phrase(501), "Not Implemented");
        assert_eq!(reason_phrase(999), "Unknown");
    }

    #[test]
    fn test_version_display() {
        assert_eq!(HttpVersion::V1_0.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::V1_1.to_string(), "HTTP/1.1");
    }
}
