//! BOM 빌더 설정
//!
//! [`BomConfig`]는 한 번의 실행에 필요한 모든 운영자 설정을 담는 불변 값입니다.
//! 전역 상태로 보관하지 않고 [`BomBuilder`](crate::BomBuilder)에 값으로 전달합니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`MKBOM_QUALIFIER=build-1` 형식)
//! 3. 설정 파일 (`--config mkbom.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//!
//! ```
//! use mkbom_builder::{BomConfig, BomConfigBuilder};
//!
//! // TOML 문자열에서 파싱 (빠진 필드는 기본값)
//! let config = BomConfig::parse("group_id = \"com.example\"").unwrap();
//! assert_eq!(config.artifact_id, "bom");
//!
//! // 빌더로 생성
//! let config = BomConfigBuilder::new()
//!     .group_id("com.example")
//!     .roots(vec!["/srv/repo".into()])
//!     .qualifier("build-1")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.qualifier(), Some("build-1"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::BomBuilderError;
use crate::types::{BomIdentity, Coordinate, Destination};

/// 디스크립터 최대 크기 기본값 (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 디스크립터 최대 크기 상한 (100 MiB)
const MAX_FILE_SIZE_LIMIT: u64 = 100 * 1024 * 1024;

/// BOM 빌더 설정
///
/// # 필드
///
/// - **group_id / artifact_id / version**: BOM 자체의 좌표
/// - **name**: `<name>` 요소 값. 비어 있으면 생략
/// - **output**: 출력 파일 경로. `-` 또는 빈 문자열이면 표준 출력
/// - **qualifier**: 모든 의존성 버전 뒤에 붙일 접미사. 비어 있으면 적용 안 함
/// - **roots**: 스캔할 저장소 루트 디렉토리 (순서 유지)
/// - **extension**: 디스크립터 파일 확장자 (점 제외)
/// - **max_file_size**: 디스크립터 최대 크기 (바이트)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BomConfig {
    /// BOM groupId
    pub group_id: String,
    /// BOM artifactId
    pub artifact_id: String,
    /// BOM version
    pub version: String,
    /// BOM `<name>` 값
    pub name: String,
    /// 출력 대상
    pub output: String,
    /// 의존성 버전 접미사
    pub qualifier: String,
    /// 저장소 루트 디렉토리 목록
    pub roots: Vec<PathBuf>,
    /// 디스크립터 확장자
    pub extension: String,
    /// 디스크립터 최대 크기 (바이트)
    pub max_file_size: u64,
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            group_id: "group".to_owned(),
            artifact_id: "bom".to_owned(),
            version: "1".to_owned(),
            name: "Bill of Materials".to_owned(),
            output: "pom.xml".to_owned(),
            qualifier: "redhat-1".to_owned(),
            roots: Vec::new(),
            extension: "pom".to_owned(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl BomConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 루트 디렉토리는 보통 CLI에서 채워지므로 여기서는 검증하지 않습니다.
    /// 검증은 [`BomBuilder::new`](crate::BomBuilder::new)에서 수행됩니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BomBuilderError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BomBuilderError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| BomBuilderError::io(path, e))?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, BomBuilderError> {
        toml::from_str(toml_str).map_err(|e| BomBuilderError::Config {
            field: "<file>".to_owned(),
            reason: e.to_string(),
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MKBOM_{FIELD}` (예: `MKBOM_GROUP_ID`)
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.group_id, "MKBOM_GROUP_ID");
        override_string(&mut self.artifact_id, "MKBOM_ARTIFACT_ID");
        override_string(&mut self.version, "MKBOM_VERSION");
        override_string(&mut self.name, "MKBOM_NAME");
        override_string(&mut self.output, "MKBOM_OUTPUT");
        override_string(&mut self.qualifier, "MKBOM_QUALIFIER");
        override_string(&mut self.extension, "MKBOM_EXTENSION");
        override_u64(&mut self.max_file_size, "MKBOM_MAX_FILE_SIZE");
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `group_id`, `artifact_id`, `version`: 비어 있으면 안 됨
    /// - `roots`: 하나 이상, 각 경로는 비어 있으면 안 됨
    /// - `extension`: 비어 있으면 안 되며 `.` 또는 경로 구분자로 시작할 수 없음
    /// - `max_file_size`: 1-104857600 (100 MiB)
    pub fn validate(&self) -> Result<(), BomBuilderError> {
        for (field, value) in [
            ("group_id", &self.group_id),
            ("artifact_id", &self.artifact_id),
            ("version", &self.version),
        ] {
            if value.trim().is_empty() {
                return Err(BomBuilderError::Config {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                });
            }
        }

        if self.roots.is_empty() {
            return Err(BomBuilderError::Config {
                field: "roots".to_owned(),
                reason: "at least one repository directory required".to_owned(),
            });
        }

        if self.roots.iter().any(|root| root.as_os_str().is_empty()) {
            return Err(BomBuilderError::Config {
                field: "roots".to_owned(),
                reason: "repository directory path must not be empty".to_owned(),
            });
        }

        if self.extension.is_empty()
            || self.extension.starts_with('.')
            || self.extension.contains(['/', '\\'])
        {
            return Err(BomBuilderError::Config {
                field: "extension".to_owned(),
                reason: format!(
                    "'{}' is not a bare file extension (e.g. \"pom\")",
                    self.extension
                ),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(BomBuilderError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }

        Ok(())
    }

    /// BOM 자체의 식별 정보를 반환합니다.
    pub fn identity(&self) -> BomIdentity {
        BomIdentity {
            coordinate: Coordinate::new(&self.group_id, &self.artifact_id, &self.version),
            name: non_empty(&self.name).map(str::to_owned),
        }
    }

    /// 설정된 qualifier를 반환합니다 (비어 있으면 `None`).
    pub fn qualifier(&self) -> Option<&str> {
        non_empty(&self.qualifier)
    }

    /// 출력 대상을 반환합니다.
    pub fn destination(&self) -> Destination {
        Destination::from_setting(&self.output)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// [`BomConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct BomConfigBuilder {
    config: BomConfig,
}

impl BomConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 설정에서 빌더를 시작합니다.
    pub fn from_config(config: BomConfig) -> Self {
        Self { config }
    }

    /// BOM groupId를 설정합니다.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.config.group_id = group_id.into();
        self
    }

    /// BOM artifactId를 설정합니다.
    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.config.artifact_id = artifact_id.into();
        self
    }

    /// BOM version을 설정합니다.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// BOM `<name>` 값을 설정합니다.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// 출력 대상을 설정합니다 (`-`는 표준 출력).
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.config.output = output.into();
        self
    }

    /// 의존성 버전 qualifier를 설정합니다.
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.config.qualifier = qualifier.into();
        self
    }

    /// 저장소 루트 디렉토리 목록을 설정합니다.
    pub fn roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.config.roots = roots;
        self
    }

    /// 디스크립터 확장자를 설정합니다.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    /// 디스크립터 최대 크기를 설정합니다.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<BomConfig, BomBuilderError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
