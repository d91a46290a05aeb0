// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 监听与分发
//!
//! 每个连接在独立的 Tokio 任务上处理。同时处理的连接数由信号量限制，
//! 拿不到许可时不再 accept，多出的客户端留在内核的 backlog 中排队。

use std::{
    future::Future,
    net::{Ipv4Addr, SocketAddrV4},
    sync::Arc,
};

use log::{debug, info};
use tokio::{net::TcpListener, sync::Semaphore};

use crate::{
    config::Config,
    exception::Exception,
    handler::RequestHandler,
    param::reason_phrase,
};

/// 按配置绑定监听端口。`local` 为真时只监听回环地址。
pub async fn bind(config: &Config) -> Result<TcpListener, Exception> {
    let address = match config.local() {
        true => Ipv4Addr::new(127, 0, 0, 1),
        false => Ipv4Addr::new(0, 0, 0, 0),
    };
    let socket = SocketAddrV4::new(address, config.port());
    let listener = TcpListener::bind(socket).await.map_err(Exception::Bind)?;
    info!("服务端将在{}上监听Socket连接", socket);
    Ok(listener)
}

/// 接受连接直到 `shutdown` 完成。accept 本身失败时返回错误，对整个进程是致命的。
pub async fn serve<F>(
    listener: TcpListener,
    handler: Arc<RequestHandler>,
    max_connections: usize,
    shutdown: F,
) -> Result<(), Exception>
where
    F: Future<Output = ()>,
{
    let permits = Arc::new(Semaphore::new(max_connections.max(1)));
    tokio::pin!(shutdown);
    let mut id: u128 = 0;

    loop {
        let permit = tokio::select! {
            _ = &mut shutdown => break,
            permit = Arc::clone(&permits).acquire_owned() => match permit {
                Ok(p) => p,
                Err(_) => break,
            },
        };

        let (stream, addr) = tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => accepted?,
        };
        debug!("[ID{}]新的连接：{}", id, addr);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let outcome = handler.handle(stream, id).await;
            info!(
                "[ID{}] {}, {}, {}, {}, delivered={}",
                outcome.id,
                addr,
                outcome.target.as_deref().unwrap_or("-"),
                outcome.status,
                reason_phrase(outcome.status),
                outcome.delivered,
            );
            drop(permit);
        });
        id += 1;
    }

    info!("主循环接收到停机指令，正在退出...");
    Ok(())
}
