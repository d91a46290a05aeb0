// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 定义请求处理与监听过程中可能出现的异常。
//!
//! 文件缺失、不可读、目录等"预期分支"不走这里，而是由 `PathKind` 表达；
//! 只有协议错误和真正的 I/O 故障才会变成 `Exception`。

use std::{fmt, io};

/// 服务器处理请求过程中发生的异常类型。
#[derive(Debug)]
pub enum Exception {
    /// 连接在发送请求行之前就关闭了，或者请求行为空。对应 `400 Bad Request`。
    EmptyRequest,
    /// 请求行不是以 `GET ` 开头。对应 `501 Not Implemented`。
    UnSupportedRequestMethod,
    /// 请求行中找不到 `HTTP/1.1` 或 `HTTP/1.0`。对应 `400 Bad Request`。
    UnsupportedHttpVersion,
    /// 模板文件无法读取。
    TemplateUnavailable(String),
    /// 读写文件或 Socket 时的底层错误。
    Io(io::Error),
    /// 无法绑定监听端口，对整个进程是致命的。
    Bind(io::Error),
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyRequest => write!(f, "Empty request line"),
            UnSupportedRequestMethod => write!(f, "Unsupported request method"),
            UnsupportedHttpVersion => write!(f, "Unsupported HTTP version"),
            TemplateUnavailable(path) => write!(f, "Template {} is unavailable", path),
            Io(e) => write!(f, "I/O error: {}", e),
            Bind(e) => write!(f, "Couldn't bind listener: {}", e),
        }
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Io(e) | Bind(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Exception {
    fn from(e: io::Error) -> Self {
        Io(e)
    }
}

impl Exception {
    /// 该异常在响应中对应的状态码。
    pub fn status_code(&self) -> u16 {
        match self {
            UnSupportedRequestMethod => 501,
            EmptyRequest | UnsupportedHttpVersion => 400,
            TemplateUnavailable(_) | Io(_) | Bind(_) => 500,
        }
    }
}
