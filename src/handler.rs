// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 连接处理器
//!
//! 负责单个连接的完整生命周期：读取请求行 → 解析 → 路径分类 → 构建并发送响应 → 关闭。
//!
//! 处理器从不向调用方返回错误。任何失败都会转换为写回同一连接的错误页，
//! 连接在所有出口上恰好关闭一次，结果以 [`Outcome`] 汇报给调用方。

use std::{path::Path, sync::Arc, time::Duration};

use log::{debug, error, warn};
use tokio::{
    fs::File,
    io::{
        AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
        BufReader,
    },
    time::timeout,
};

use crate::{
    config::Config,
    exception::Exception,
    mime::{is_unknown, mime_type},
    param::{reason_phrase, LIST_PLACEHOLDER, STATUS_PLACEHOLDER},
    path::{FsProbe, LocalFs, PathKind, PathResolver},
    request::Request,
    response::Response,
    template::{self, render_listing},
    util::HtmlBuilder,
};

/// 请求行的最大长度，超出部分不会被读取
const MAX_REQUEST_LINE: u64 = 8192;

/// 单个连接的处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub id: u128,
    /// 成功解析出的请求目标
    pub target: Option<String>,
    /// 写回客户端的状态码
    pub status: u16,
    /// 响应是否完整写出
    pub delivered: bool,
}

pub struct RequestHandler<P = LocalFs> {
    config: Arc<Config>,
    resolver: PathResolver<P>,
}

impl RequestHandler<LocalFs> {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_probe(config, LocalFs)
    }
}

impl<P: FsProbe> RequestHandler<P> {
    pub fn with_probe(config: Arc<Config>, probe: P) -> Self {
        let resolver = PathResolver::with_probe(config.www_root(), probe);
        Self { config, resolver }
    }

    /// 处理一个连接直至关闭。
    pub async fn handle<S>(&self, stream: S, id: u128) -> Outcome
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut stream = BufReader::new(stream);
        let mut target = None;

        let parsed = match self.read_request_line(&mut stream, id).await {
            Ok(line) => Request::parse(&line, id),
            Err(e) => Err(e),
        };

        let response = match parsed {
            Ok(request) => {
                debug!("[ID{}]成功解析请求行，目标：{}", id, request.target());
                target = Some(request.target().to_string());
                self.respond(&request, id).await
            }
            Err(e) => {
                warn!("[ID{}]请求行无效：{}", id, e);
                self.error_response(e.status_code()).await
            }
        };

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                error!("[ID{}]处理请求时发生异常：{}", id, e);
                self.internal_error().await
            }
        };

        let status = response.status_code();
        let delivered = match response.write_to(&mut stream, self.config.chunk_size()).await {
            Ok(sent) => {
                debug!("[ID{}]响应发送完毕，正文{}字节", id, sent);
                true
            }
            Err(e) => {
                // 已经有字节写到连接上了，不再尝试补发 500
                error!("[ID{}]发送响应失败：{}", id, e);
                false
            }
        };

        if let Err(e) = stream.shutdown().await {
            debug!("[ID{}]关闭连接时出错：{}", id, e);
        }

        Outcome {
            id,
            target,
            status,
            delivered,
        }
    }

    async fn read_request_line<R>(&self, reader: &mut R, id: u128) -> Result<String, Exception>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buffer = Vec::new();
        let mut limited = reader.take(MAX_REQUEST_LINE);
        let read = limited.read_until(b'\n', &mut buffer);

        let result = match self.config.read_timeout_secs() {
            0 => read.await,
            secs => match timeout(Duration::from_secs(secs), read).await {
                Ok(r) => r,
                Err(_) => {
                    warn!("[ID{}]等待请求行超时（{}秒）", id, secs);
                    return Err(Exception::EmptyRequest);
                }
            },
        };

        match result? {
            0 => Err(Exception::EmptyRequest),
            _ => Ok(String::from_utf8_lossy(&buffer).into_owned()),
        }
    }

    async fn respond(&self, request: &Request, id: u128) -> Result<Response, Exception> {
        let resolved = self.resolver.resolve(request.target());
        let mime = mime_type(request.filename());
        debug!(
            "[ID{}]映射物理路径：{}，分类：{:?}，MIME类型：{}",
            id,
            resolved.absolute_path.display(),
            resolved.kind,
            mime
        );

        match resolved.kind {
            PathKind::Directory => {
                if self.config.directory_listing() {
                    let link_base = request.target().trim_end_matches('/');
                    self.listing_response(&resolved.absolute_path, link_base)
                        .await
                } else {
                    self.error_response(403).await
                }
            }
            PathKind::File => {
                let file = File::open(&resolved.absolute_path).await?;
                let length = file.metadata().await?.len();
                Ok(Response::from_file(file, length, mime))
            }
            PathKind::Missing => {
                if self.config.extensionless_fallback() && is_unknown(mime) {
                    let parent = resolved.absolute_path.parent().filter(|p| p.is_dir());
                    if let Some(parent) = parent {
                        debug!("[ID{}]无后缀且不存在，改为列出上级目录", id);
                        return self
                            .listing_response(parent, parent_link_base(request.target()))
                            .await;
                    }
                }
                self.error_response(404).await
            }
            PathKind::Unreadable => self.error_response(403).await,
        }
    }

    async fn listing_response(&self, dir: &Path, link_base: &str) -> Result<Response, Exception> {
        let list = render_listing(dir, link_base).await?;
        let html =
            template::render(self.config.listing_template(), LIST_PLACEHOLDER, &list).await?;
        Ok(Response::from_html(200, html))
    }

    /// 400、403、404 使用 404 模板，其余使用 500 模板。
    async fn error_response(&self, code: u16) -> Result<Response, Exception> {
        let template_path = match code {
            400 | 403 | 404 => self.config.not_found_template(),
            _ => self.config.server_error_template(),
        };
        let status = format!("{} {}", code, reason_phrase(code));
        let html = template::render(template_path, STATUS_PLACEHOLDER, &status).await?;
        Ok(Response::from_html(code, html))
    }

    async fn internal_error(&self) -> Response {
        match self.error_response(500).await {
            Ok(r) => r,
            Err(_) => Response::from_html(500, HtmlBuilder::from_status_code(500).build()),
        }
    }
}

/// 请求目标所在目录的路径，不带结尾的 `/`
fn parent_link_base(target: &str) -> &str {
    let trimmed = target.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[..pos],
        None => "",
    }
}
