// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求行解析模块
//!
//! 本服务器只读取连接上的第一行，标头和正文一概忽略。解析规则刻意保持宽松：
//! 1. 请求行必须以 `GET ` 开头，否则视为不支持的方法（501）。
//! 2. 请求行中任意位置出现 `HTTP/1.1` 或 `HTTP/1.0` 即可，否则视为版本错误（400）。
//! 3. 请求目标是 `GET ` 与第一个版本标记之间的文本（去除首尾空白），不做 URL 解码。

use crate::{exception::Exception, param::*};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

const METHOD_TOKEN: &str = "GET ";

lazy_static! {
    static ref VERSION_TOKEN: Regex = Regex::new(r"HTTP/1\.[01]").unwrap();
}

/// 从请求行解析出的请求，构造后不再修改。
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: HttpRequestMethod,
    /// 原样保留的请求目标（路径加查询字符串）
    target: String,
    version: HttpVersion,
}

impl Request {
    /// 解析一行请求行。行尾的 `\r\n` 或 `\n` 会被忽略。
    pub fn parse(line: &str, id: u128) -> Result<Self, Exception> {
        let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if line.trim().is_empty() {
            debug!("[ID{}]请求行为空", id);
            return Err(Exception::EmptyRequest);
        }

        let rest = match line.strip_prefix(METHOD_TOKEN) {
            Some(r) => r,
            None => {
                debug!("[ID{}]不支持的HTTP请求方法：{}", id, line);
                return Err(Exception::UnSupportedRequestMethod);
            }
        };

        let version_match = match VERSION_TOKEN.find(rest) {
            Some(m) => m,
            None => {
                debug!("[ID{}]不支持的HTTP协议版本：{}", id, line);
                return Err(Exception::UnsupportedHttpVersion);
            }
        };
        let version = match version_match.as_str() {
            "HTTP/1.0" => HttpVersion::V1_0,
            _ => HttpVersion::V1_1,
        };

        let target = rest[..version_match.start()].trim().to_string();

        Ok(Self {
            method: HttpRequestMethod::Get,
            target,
            version,
        })
    }
}

impl Request {
    pub fn method(&self) -> HttpRequestMethod {
        self.method
    }

    /// 请求目标，与客户端发送的一致
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// 请求目标最后一个 `/` 之后的部分，用于推断 MIME 类型。
    pub fn filename(&self) -> &str {
        match self.target.rfind('/') {
            Some(pos) => &self.target[pos + 1..],
            None => &self.target,
        }
    }
}
