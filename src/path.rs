// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 路径解析模块
//!
//! 把请求目标映射到 www 根目录下的物理路径并分类。
//!
//! 根目录与请求目标按字符串直接拼接（目标不以 `/` 开头时补一个），不做 URL 解码。
//! 含有 `..` 段的目标不会访问文件系统，直接归类为 [`PathKind::Unreadable`]，
//! 因此解析结果在字面上总是位于根目录之下。

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

/// 路径分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Missing,
    Unreadable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub absolute_path: PathBuf,
    pub kind: PathKind,
}

/// 路径分类所需的只读文件系统查询。
#[cfg_attr(test, mockall::automock)]
pub trait FsProbe {
    fn is_dir(&self, path: &Path) -> bool;
    fn exists(&self, path: &Path) -> bool;
    fn is_readable(&self, path: &Path) -> bool;
}

/// 直接查询本地文件系统
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FsProbe for LocalFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// 只尝试打开普通文件，FIFO、设备等特殊文件一律视为不可读。
    fn is_readable(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => File::open(path).is_ok(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathResolver<P = LocalFs> {
    root: String,
    probe: P,
}

impl PathResolver<LocalFs> {
    pub fn new(root: &str) -> Self {
        Self::with_probe(root, LocalFs)
    }
}

impl<P: FsProbe> PathResolver<P> {
    pub fn with_probe(root: &str, probe: P) -> Self {
        Self {
            root: root.to_string(),
            probe,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// 解析请求目标。优先级：目录 → 可读文件 → 不存在 → 不可读。
    pub fn resolve(&self, target: &str) -> ResolvedPath {
        let separator = if target.starts_with('/') { "" } else { "/" };
        let absolute_path = PathBuf::from(format!("{}{}{}", self.root, separator, target));

        if is_traversal(target) {
            return ResolvedPath {
                absolute_path,
                kind: PathKind::Unreadable,
            };
        }

        let kind = if self.probe.is_dir(&absolute_path) {
            PathKind::Directory
        } else if !self.probe.exists(&absolute_path) {
            PathKind::Missing
        } else if self.probe.is_readable(&absolute_path) {
            PathKind::File
        } else {
            PathKind::Unreadable
        };

        ResolvedPath {
            absolute_path,
            kind,
        }
    }
}

fn is_traversal(target: &str) -> bool {
    target.split(|c: char| c == '/' || c == '\\').any(|segment| segment == "..")
}
