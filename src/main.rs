// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 目录文件服务器
//!
//! 把一个本地目录树通过 HTTP/1.x 提供出去：
//! - 文件原样返回，附带 `Content-Type` 与 `Content-Length`
//! - 目录渲染为文件列表页
//! - 其余情况返回静态错误页
//!
//! 启动顺序：日志 → 配置 → Tokio 运行时 → 绑定端口 → 主循环。

use std::{process, sync::Arc};

use log::{error, info, warn};
use tokio::runtime::Builder;

use tinyserve::{server, Config, Exception, RequestHandler};

fn main() {
    // 1. 日志系统：log4rs，通过外部 YAML 配置级别与输出目的地
    if let Err(e) = log4rs::init_file("config/log4rs.yaml", Default::default()) {
        eprintln!("无法初始化日志系统：{}", e);
    }

    // 2. 配置只构建一次，之后以只读引用传给各组件
    let config = Arc::new(Config::from_toml("config/development.toml"));
    info!("配置文件已载入");

    // 3. 按配置的工作线程数构建运行时
    let runtime = match Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("无法构建Tokio运行时：{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        error!("服务器异常退出：{}", e);
        process::exit(1);
    }
}

async fn run(config: Arc<Config>) -> Result<(), Exception> {
    let listener = server::bind(&config).await?;
    let handler = Arc::new(RequestHandler::new(Arc::clone(&config)));
    server::serve(listener, handler, config.max_connections(), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听Ctrl-C信号：{}，只能通过结束进程停机", e);
        std::future::pending::<()>().await;
    }
    info!("收到停机信号");
}
