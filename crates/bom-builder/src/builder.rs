//! BOM 빌더 오케스트레이터 -- 탐색, 조립, 출력의 전체 흐름 관리
//!
//! # 내부 아키텍처
//!
//! ```text
//! roots --> Discoverer --> Vec<Coordinate> --> aggregate --> BomDocument --> emit
//!           (root 순서,                        (입력 순서 유지)              (file / stdout)
//!            파일명 정렬)
//! ```
//!
//! 모든 단계는 동기적으로 순서대로 실행되며, 어느 단계든 실패하면 출력 없이
//! 중단합니다.

use std::fmt;

use tracing::info;

use crate::aggregate::{BomDocument, aggregate};
use crate::config::BomConfig;
use crate::discover::Discoverer;
use crate::emit::{EmitOutcome, emit};
use crate::error::BomBuilderError;
use crate::types::Coordinate;

/// 한 번의 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// 생성된 BOM 자체의 좌표
    pub coordinate: Coordinate,
    /// BOM에 포함된 의존성 수
    pub dependency_count: usize,
    /// 출력 결과
    pub outcome: EmitOutcome,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            EmitOutcome::File { path, .. } => write!(
                f,
                "BOM ({}) written to: {}",
                self.coordinate,
                path.display()
            ),
            EmitOutcome::Stdout { .. } => write!(f, "BOM ({}) written to stdout", self.coordinate),
        }
    }
}

/// BOM 빌더
///
/// 검증된 [`BomConfig`]를 소유하며 실행 간에 상태를 유지하지 않습니다.
#[derive(Debug, Clone)]
pub struct BomBuilder {
    config: BomConfig,
    discoverer: Discoverer,
}

impl BomBuilder {
    /// 설정을 검증하고 빌더를 생성합니다.
    pub fn new(config: BomConfig) -> Result<Self, BomBuilderError> {
        config.validate()?;
        let discoverer = Discoverer::new(&config);
        Ok(Self { config, discoverer })
    }

    /// 빌더 설정
    pub fn config(&self) -> &BomConfig {
        &self.config
    }

    /// 디스크립터를 탐색하고 문서를 조립합니다 (출력 없음).
    pub fn build(&self) -> Result<BomDocument, BomBuilderError> {
        let identity = self.config.identity();
        info!(
            bom = %identity,
            qualifier = self.config.qualifier().unwrap_or("<none>"),
            destination = %self.config.destination(),
            roots = self.config.roots.len(),
            "building bom"
        );

        let records = self.discoverer.discover(&self.config.roots)?;
        let document = aggregate(&identity, &records);

        info!(dependencies = document.dependency_count(), "bom assembled");
        Ok(document)
    }

    /// 문서를 조립하고 설정된 대상에 출력합니다.
    pub fn run(&self) -> Result<BuildReport, BomBuilderError> {
        let document = self.build()?;
        let outcome = emit(&document, &self.config.destination())?;

        Ok(BuildReport {
            coordinate: document.identity().coordinate.clone(),
            dependency_count: document.dependency_count(),
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn new_rejects_invalid_config() {
        let result = BomBuilder::new(BomConfig::default());
        assert!(result.is_err(), "config without roots must be rejected");
    }

    #[test]
    fn build_on_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let builder = BomBuilder::new(BomConfig {
            roots: vec![dir.path().to_path_buf()],
            ..BomConfig::default()
        })
        .unwrap();

        let doc = builder.build().unwrap();
        assert_eq!(doc.dependency_count(), 0);
        assert_eq!(doc.identity().coordinate.to_string(), "group:bom:1");
    }

    #[test]
    fn run_writes_file_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("repo");
        std::fs::create_dir(&repo).unwrap();
        std::fs::write(
            repo.join("a.pom"),
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version></project>",
        )
        .unwrap();
        let out = dir.path().join("bom.xml");

        let builder = BomBuilder::new(BomConfig {
            roots: vec![repo],
            output: out.display().to_string(),
            ..BomConfig::default()
        })
        .unwrap();
        let report = builder.run().unwrap();

        assert_eq!(report.dependency_count, 1);
        assert_eq!(
            report.to_string(),
            format!("BOM (group:bom:1) written to: {}", out.display())
        );
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("<version>1-redhat-1</version>"));
    }

    #[test]
    fn failed_run_does_not_create_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bom.xml");

        let builder = BomBuilder::new(BomConfig {
            roots: vec![PathBuf::from("/nonexistent/path/for/test")],
            output: out.display().to_string(),
            ..BomConfig::default()
        })
        .unwrap();

        assert!(builder.run().is_err());
        assert!(!out.exists());
    }
}
