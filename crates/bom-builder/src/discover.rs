//! 디스크립터 탐색 -- 루트 디렉토리 재귀 순회 및 좌표 수집
//!
//! [`Discoverer`]는 루트 디렉토리를 주어진 순서대로 순회하고, 각 루트 안에서는
//! 파일 이름 기준으로 정렬된 순서로 디스크립터를 찾습니다. 같은 파일 시스템에
//! 대해서는 항상 같은 순서의 결과를 반환합니다.
//!
//! 매칭되는 파일이 없는 루트는 에러가 아니지만, 존재하지 않거나 읽을 수 없는
//! 루트는 I/O 에러로 실행 전체를 중단합니다.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::BomConfig;
use crate::descriptor::{DescriptorDetector, parse_descriptor_bytes};
use crate::error::BomBuilderError;
use crate::types::Coordinate;

/// 디스크립터 탐색기
#[derive(Debug, Clone)]
pub struct Discoverer {
    detector: DescriptorDetector,
    qualifier: Option<String>,
    max_file_size: u64,
}

impl Discoverer {
    /// 설정에서 탐색기를 생성합니다.
    pub fn new(config: &BomConfig) -> Self {
        Self {
            detector: DescriptorDetector::new(config.extension.clone()),
            qualifier: config.qualifier().map(str::to_owned),
            max_file_size: config.max_file_size,
        }
    }

    /// 모든 루트를 순서대로 탐색하여 좌표 목록을 반환합니다.
    ///
    /// 첫 번째 에러에서 즉시 중단하며 부분 결과는 반환하지 않습니다.
    pub fn discover<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Vec<Coordinate>, BomBuilderError> {
        let mut records = Vec::new();

        for root in roots {
            let root = root.as_ref();
            info!(root = %root.display(), "processing descriptors in directory");

            let descriptors = self.find_descriptors(root)?;
            let before = records.len();

            for path in &descriptors {
                let coordinate = self.read_descriptor(path)?;
                debug!(path = %path.display(), coordinate = %coordinate, "descriptor resolved");
                records.push(coordinate);
            }

            info!(
                root = %root.display(),
                descriptors = records.len() - before,
                "directory processed"
            );
        }

        Ok(records)
    }

    /// 루트 아래의 디스크립터 파일 경로를 결정적 순서로 반환합니다.
    ///
    /// - 각 디렉토리 수준에서 파일 이름 순으로 정렬
    /// - 루트 아래의 숨김 항목(`.`으로 시작하는 파일/디렉토리)은 제외
    /// - 디렉토리 심볼릭 링크는 따라가지 않음 (순환 방지)
    /// - 파일을 가리키는 심볼릭 링크는 포함하며, 대상이 없는 링크는 I/O 에러
    pub fn find_descriptors(&self, root: &Path) -> Result<Vec<PathBuf>, BomBuilderError> {
        let metadata = std::fs::metadata(root).map_err(|e| BomBuilderError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(BomBuilderError::io(
                root,
                std::io::Error::other("repository root is not a directory"),
            ));
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        let mut found = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                BomBuilderError::io(path, source)
            })?;

            if !self.detector.is_descriptor(entry.path()) {
                continue;
            }

            if entry.file_type().is_file() {
                found.push(entry.into_path());
            } else if entry.path_is_symlink() {
                let target =
                    std::fs::metadata(entry.path()).map_err(|e| BomBuilderError::io(entry.path(), e))?;
                if target.is_file() {
                    found.push(entry.into_path());
                }
            }
        }

        Ok(found)
    }

    fn read_descriptor(&self, path: &Path) -> Result<Coordinate, BomBuilderError> {
        let metadata = std::fs::metadata(path).map_err(|e| BomBuilderError::io(path, e))?;
        if metadata.len() > self.max_file_size {
            return Err(BomBuilderError::FileTooBig {
                path: path.display().to_string(),
                size: metadata.len(),
                max: self.max_file_size,
            });
        }

        // 인코딩은 디스크립터의 XML 선언을 따르므로 바이트 그대로 넘깁니다.
        let content = std::fs::read(path).map_err(|e| BomBuilderError::io(path, e))?;
        parse_descriptor_bytes(
            &content,
            &path.display().to_string(),
            self.qualifier.as_deref(),
        )
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
