//! # 目录遍历器
//!
//! 深度优先、先序遍历输入目录下的所有子目录，对每个子目录：
//! 1. 通过 `ImageReader` 列出有效图像文件
//! 2. 逐个打开文件获得 series 数量
//! 3. 每个 series 产生一个 `WorkUnit`
//!
//! 根目录本身的文件不会被枚举，只查询其子目录（及更深层目录）。
//! 每一层的目录项按文件名排序，保证输出确定。
//! 链接循环和无法读取的目录会终止遍历；悬空链接等其他无法读取的条目只报告警告。
//!
//! `units()` 返回惰性、有限、可重复调用的迭代器，与输出文件的写入相互独立。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `reader/`, `utils/report.rs`
//! - 使用 `walkdir` 遍历目录

use crate::error::{Result, SeriesError};
use crate::models::WorkUnit;
use crate::reader::ImageReader;
use crate::utils::report::Reporter;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 目录遍历器
pub struct DirectoryWalker<'a, R: ImageReader> {
    root: PathBuf,
    reader: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: ImageReader> DirectoryWalker<'a, R> {
    /// 创建遍历器；根路径不是目录时立即失败
    pub fn new(root: &Path, reader: &'a R, reporter: &'a dyn Reporter) -> Result<Self> {
        if !root.is_dir() {
            return Err(SeriesError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        let root = std::path::absolute(root).map_err(|e| SeriesError::DirectoryReadError {
            path: root.display().to_string(),
            source: e,
        })?;

        Ok(Self {
            root,
            reader,
            reporter,
        })
    }

    /// 根目录的绝对路径
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 按遍历顺序产生工作单元
    pub fn units(&self) -> WorkUnits<'_, 'a, R> {
        let dirs = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        WorkUnits {
            walker: self,
            dirs,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// 展开单个目录中的所有 (文件, series)
    fn expand(&self, dir: &Path, pending: &mut VecDeque<WorkUnit>) -> Result<()> {
        let mut names = self.reader.list_valid_files(dir)?;
        names.sort();

        for name in names {
            let path = dir.join(&name);
            match self.reader.open(&path) {
                Ok(handle) => {
                    let n_series = self.reader.series_count(&handle);
                    pending.extend((0..n_series).map(|s| WorkUnit::new(path.clone(), s)));
                }
                Err(e) if e.is_recoverable() => {
                    self.reporter.warning(&format!("{}, skipping", e));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

/// 遍历错误是否终止运行
///
/// 链接循环与目录读取失败是致命的；指向不存在目标的链接等非目录项只跳过。
fn is_fatal(e: &walkdir::Error) -> bool {
    e.loop_ancestor().is_some() || e.path().map_or(true, |p| p.is_dir())
}

/// 工作单元迭代器
///
/// 遇到致命错误时产出一次 `Err`，随后结束。
pub struct WorkUnits<'w, 'a, R: ImageReader> {
    walker: &'w DirectoryWalker<'a, R>,
    dirs: walkdir::IntoIter,
    pending: VecDeque<WorkUnit>,
    finished: bool,
}

impl<R: ImageReader> Iterator for WorkUnits<'_, '_, R> {
    type Item = Result<WorkUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(unit) = self.pending.pop_front() {
                return Some(Ok(unit));
            }
            if self.finished {
                return None;
            }

            let entry = match self.dirs.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Ok(entry)) => entry,
                Some(Err(e)) if !is_fatal(&e) => {
                    let path = e.path().unwrap_or(self.walker.root()).display().to_string();
                    self.walker
                        .reporter
                        .warning(&format!("Unreadable entry {}: {}, skipping", path, e));
                    continue;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    let path = e
                        .path()
                        .unwrap_or(self.walker.root())
                        .display()
                        .to_string();
                    return Some(Err(SeriesError::DirectoryReadError {
                        path,
                        source: e.into(),
                    }));
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if let Err(e) = self.walker.expand(entry.path(), &mut self.pending) {
                self.finished = true;
                self.pending.clear();
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PatternReader;
    use crate::utils::report::{Level, MemoryReporter};
    use std::fs;
    use tempfile::tempdir;

    fn image(path: &Path, series: Option<u32>) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"img").unwrap();
        if let Some(n) = series {
            let mut sidecar = path.as_os_str().to_os_string();
            sidecar.push(".series");
            fs::write(PathBuf::from(sidecar), n.to_string()).unwrap();
        }
    }

    fn collect(walker: &DirectoryWalker<'_, PatternReader>) -> Vec<(String, u32)> {
        walker
            .units()
            .map(|u| u.unwrap())
            .map(|u| {
                let rel = u.file_path.strip_prefix(walker.root()).unwrap();
                (rel.display().to_string(), u.series_index)
            })
            .collect()
    }

    #[test]
    fn test_root_files_are_never_enumerated() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("A/two.lif"), Some(2));
        image(&dir.path().join("B/one.tif"), None);
        image(&dir.path().join("loose.tif"), None);

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        assert_eq!(
            collect(&walker),
            vec![
                ("A/two.lif".to_string(), 0),
                ("A/two.lif".to_string(), 1),
                ("B/one.tif".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_preorder_depth_first_sorted() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("a/z.tif"), None);
        image(&dir.path().join("a/deep/x.tif"), None);
        image(&dir.path().join("a/b.tif"), None);
        image(&dir.path().join("b/c.tif"), None);

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        let files: Vec<String> = collect(&walker).into_iter().map(|(p, _)| p).collect();
        assert_eq!(files, vec!["a/b.tif", "a/z.tif", "a/deep/x.tif", "b/c.tif"]);
    }

    #[test]
    fn test_units_are_absolute_and_restartable() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("s/img.czi"), Some(3));

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        let first: Vec<WorkUnit> = walker.units().map(|u| u.unwrap()).collect();
        let second: Vec<WorkUnit> = walker.units().map(|u| u.unwrap()).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert!(first.iter().all(|u| u.file_path.is_absolute()));
    }

    #[test]
    fn test_unopenable_file_is_skipped_with_warning() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("s/a.tif"), None);
        fs::write(dir.path().join("s/b.tif"), b"").unwrap();
        image(&dir.path().join("s/c.tif"), Some(2));

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        let files: Vec<String> = collect(&walker).into_iter().map(|(p, _)| p).collect();
        assert_eq!(files, vec!["s/a.tif", "s/c.tif", "s/c.tif"]);

        let warnings = reporter.messages(Level::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("b.tif"));
    }

    #[test]
    fn test_zero_series_file_emits_nothing() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("s/none.lif"), Some(0));

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();
        assert_eq!(walker.units().count(), 0);
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.tif");
        fs::write(&file, b"img").unwrap();

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        for root in [file, dir.path().join("missing")] {
            let err = DirectoryWalker::new(&root, &reader, &reporter).err().unwrap();
            assert!(matches!(err, SeriesError::NotADirectory { .. }));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_in_root_is_skipped() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("A/a.tif"), None);
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("stale_link")).unwrap();

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        assert_eq!(collect(&walker), vec![("A/a.tif".to_string(), 0)]);
        let warnings = reporter.messages(Level::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("stale_link"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_in_subdirectory_is_skipped() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("A/a.tif"), None);
        std::os::unix::fs::symlink("/nonexistent", dir.path().join("A/notes.txt")).unwrap();
        std::os::unix::fs::symlink("/nonexistent", dir.path().join("A/gone.tif")).unwrap();
        image(&dir.path().join("B/b.tif"), None);

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        let files: Vec<String> = collect(&walker).into_iter().map(|(p, _)| p).collect();
        assert_eq!(files, vec!["A/a.tif", "B/b.tif"]);
        assert_eq!(reporter.messages(Level::Warning).len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_cycle_is_fatal() {
        let dir = tempdir().unwrap();
        image(&dir.path().join("A/a.tif"), None);
        std::os::unix::fs::symlink(dir.path().join("A"), dir.path().join("A/loop")).unwrap();

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();

        let results: Vec<Result<WorkUnit>> = walker.units().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(SeriesError::DirectoryReadError { path, .. }) => assert!(path.ends_with("loop")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_subdirectory_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        image(&dir.path().join("A/a.tif"), None);
        let locked = dir.path().join("B");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // 以 root 运行时权限位不生效
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let reader = PatternReader::default();
        let reporter = MemoryReporter::default();
        let walker = DirectoryWalker::new(dir.path(), &reader, &reporter).unwrap();
        let results: Vec<Result<WorkUnit>> = walker.units().collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(results[0].is_ok());
        assert!(matches!(
            results.last(),
            Some(Err(SeriesError::DirectoryReadError { .. }))
        ));
    }
}
