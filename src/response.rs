// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 响应模块
//!
//! 响应报文固定为：状态行、`Connection: close`、`Content-Type`、
//! 仅文件响应才有的 `Content-Length`、空行，然后是正文。
//! 文件正文按块原样复制；模板正文一次性写出，末尾追加 `\r\n`。

use bytes::Bytes;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncWrite, AsyncWriteExt},
};

use crate::param::{reason_phrase, CRLF, HTML_MIME};

/// 响应正文
#[derive(Debug)]
pub enum Body {
    /// 已打开的文件，按块发送
    File(File),
    /// 渲染好的页面
    Html(Bytes),
}

#[derive(Debug)]
pub struct Response {
    status_code: u16,
    information: String,
    /// 按插入顺序原样输出
    headers: Vec<(String, String)>,
    body: Body,
}

impl Response {
    pub fn from_file(file: File, length: u64, mime: &str) -> Self {
        let mut response = Self::with_code(200, Body::File(file));
        response.push_header("Content-Type", mime);
        response.push_header("Content-Length", &length.to_string());
        response
    }

    pub fn from_html(code: u16, html: String) -> Self {
        let mut response = Self::with_code(code, Body::Html(Bytes::from(html)));
        response.push_header("Content-Type", HTML_MIME);
        response
    }

    fn with_code(code: u16, body: Body) -> Self {
        let mut response = Self {
            status_code: code,
            information: reason_phrase(code).to_string(),
            headers: Vec::with_capacity(3),
            body,
        };
        response.push_header("Connection", "close");
        response
    }

    fn push_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// 写出整个响应并 flush。
    pub async fn write_to<W>(self, sink: &mut W, chunk_size: usize) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        write_header_block(sink, self.status_code, &self.information, &self.headers).await?;
        write_body(sink, self.body, chunk_size).await
    }
}

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 状态行、标头与空行
pub fn header_block(code: u16, information: &str, headers: &[(String, String)]) -> String {
    let status_code: &str = &code.to_string();
    let mut block = ["HTTP/1.1 ", status_code, " ", information, CRLF].concat();
    for (name, value) in headers {
        block.push_str(&[name.as_str(), ": ", value.as_str(), CRLF].concat());
    }
    block.push_str(CRLF);
    block
}

pub async fn write_header_block<W>(
    sink: &mut W,
    code: u16,
    information: &str,
    headers: &[(String, String)],
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    sink.write_all(header_block(code, information, headers).as_bytes())
        .await?;
    sink.flush().await
}

/// 写出正文，返回写出的正文字节数（不含模板正文末尾的 CRLF）。
pub async fn write_body<W>(sink: &mut W, body: Body, chunk_size: usize) -> io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let sent = match body {
        Body::Html(content) => {
            sink.write_all(&content).await?;
            sink.write_all(CRLF.as_bytes()).await?;
            content.len() as u64
        }
        Body::File(mut file) => {
            let mut buffer = vec![0u8; chunk_size.max(1)];
            let mut total_sent = 0u64;
            loop {
                match file.read(&mut buffer).await? {
                    0 => break,
                    n => {
                        sink.write_all(&buffer[..n]).await?;
                        total_sent += n as u64;
                    }
                }
            }
            total_sent
        }
    };
    sink.flush().await?;
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_header_block_order() {
        let response = Response::from_html(404, "x".to_string());
        let block = header_block(
            response.status_code(),
            response.information(),
            response.headers(),
        );
        assert_eq!(
            block,
            "HTTP/1.1 404 Not Found\r\nConnection: close\r\nContent-Type: text/html\r\n\r\n"
        );
    }

    #[test]
    fn test_html_response_has_no_content_length() {
        let response = Response::from_html(200, "<p>hi</p>".to_string());
        assert_eq!(response.header("Content-Length"), None);
        assert_eq!(response.header("content-type"), Some("text/html"));
    }

    #[tokio::test]
    async fn test_write_html_response() {
        let response = Response::from_html(501, "<h1>501</h1>".to_string());
        let mut sink: Vec<u8> = Vec::new();
        let sent = response.write_to(&mut sink, 16).await.unwrap();

        assert_eq!(sent, 12);
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "HTTP/1.1 501 Not Implemented\r\nConnection: close\r\nContent-Type: text/html\r\n\r\n<h1>501</h1>\r\n"
        );
    }

    #[tokio::test]
    async fn test_write_file_response() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let content: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&path, &content).unwrap();

        let file = File::open(&path).await.unwrap();
        let response = Response::from_file(file, content.len() as u64, "application/zip");
        assert_eq!(response.header("Content-Length"), Some("1000"));

        let mut sink: Vec<u8> = Vec::new();
        let sent = response.write_to(&mut sink, 64).await.unwrap();
        assert_eq!(sent, 1000);

        let head = "HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Type: application/zip\r\nContent-Length: 1000\r\n\r\n";
        assert!(sink.starts_with(head.as_bytes()));
        assert_eq!(&sink[head.len()..], &content[..]);
    }

    #[tokio::test]
    async fn test_write_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let file = File::open(&path).await.unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let sent = write_body(&mut sink, Body::File(file), 0).await.unwrap();
        assert_eq!(sent, 0);
        assert!(sink.is_empty());
    }
}
