//! 디스크립터(POM) 탐지 및 좌표 추출
//!
//! [`DescriptorDetector`]는 파일 확장자로 디스크립터 여부를 판별하고,
//! [`parse_descriptor`]는 파싱된 트리에서 좌표 세 필드를 추출합니다.
//!
//! # 필드 조회 규칙
//!
//! 각 필드는 [`FieldLookup`]에 정의된 경로를 순서대로 시도합니다.
//! 요소가 **존재하는** 첫 경로가 선택되며, 그 값이 비어 있으면 에러입니다.
//!
//! | 필드 | 1순위 | 2순위 |
//! |------|-------|-------|
//! | `groupId` | `project/groupId` | `project/parent/groupId` |
//! | `artifactId` | `project/artifactId` | (없음) |
//! | `version` | `project/version` | `project/parent/version` |
//!
//! `artifactId`는 parent에서 상속하지 않습니다.

use std::path::Path;

use crate::error::BomBuilderError;
use crate::types::Coordinate;
use crate::xml::{self, XmlElement};

/// 디스크립터 루트 요소 이름
pub const ROOT_ELEMENT: &str = "project";

/// 필드 조회 전략 -- 순서대로 시도할 하위 요소 경로 목록
#[derive(Debug, Clone, Copy)]
pub struct FieldLookup {
    /// 에러 메시지에 쓰이는 필드명
    pub field: &'static str,
    /// 시도할 경로 (앞쪽이 우선)
    pub paths: &'static [&'static [&'static str]],
}

impl FieldLookup {
    /// `groupId`: 직접 선언 -> parent
    pub const GROUP_ID: Self = Self {
        field: "groupId",
        paths: &[&["groupId"], &["parent", "groupId"]],
    };

    /// `artifactId`: 직접 선언만
    pub const ARTIFACT_ID: Self = Self {
        field: "artifactId",
        paths: &[&["artifactId"]],
    };

    /// `version`: 직접 선언 -> parent
    pub const VERSION: Self = Self {
        field: "version",
        paths: &[&["version"], &["parent", "version"]],
    };

    /// 트리에서 값을 조회합니다.
    ///
    /// 요소가 존재하는 첫 경로의 텍스트(앞뒤 공백 제거)를 반환합니다.
    /// 어느 경로에도 요소가 없으면 `None`입니다.
    pub fn resolve(&self, project: &XmlElement) -> Option<String> {
        self.paths
            .iter()
            .find_map(|path| project.child_path(path))
            .map(|el| el.text().trim().to_owned())
    }
}

/// 디스크립터 탐지기
///
/// 확장자가 일치하는 파일을 디스크립터로 간주합니다 (대소문자 구분).
#[derive(Debug, Clone)]
pub struct DescriptorDetector {
    extension: String,
}

impl DescriptorDetector {
    /// 확장자(점 제외)로 탐지기를 생성합니다.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// 탐지 대상 확장자
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 주어진 경로가 디스크립터인지 확인합니다.
    pub fn is_descriptor(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

impl Default for DescriptorDetector {
    fn default() -> Self {
        Self::new("pom")
    }
}

/// 디스크립터 내용을 파싱하여 좌표를 추출합니다.
///
/// # Arguments
///
/// - `content`: 디스크립터 파일 내용
/// - `source_path`: 원본 파일 경로 (에러 메시지용)
/// - `qualifier`: 설정되어 있으면 버전 뒤에 `-<qualifier>`를 붙임
pub fn parse_descriptor(
    content: &str,
    source_path: &str,
    qualifier: Option<&str>,
) -> Result<Coordinate, BomBuilderError> {
    let project = xml::parse(content).map_err(|e| BomBuilderError::DescriptorParse {
        path: source_path.to_owned(),
        reason: e.to_string(),
    })?;
    extract(&project, source_path, qualifier)
}

/// 파일 바이트열을 파싱하여 좌표를 추출합니다.
///
/// XML 선언의 `encoding`(예: `ISO-8859-1`)이나 바이트 순서 표식에 따라
/// 디코딩합니다. 디코딩 실패는 [`BomBuilderError::DescriptorParse`]입니다.
pub fn parse_descriptor_bytes(
    content: &[u8],
    source_path: &str,
    qualifier: Option<&str>,
) -> Result<Coordinate, BomBuilderError> {
    let project = xml::parse_bytes(content).map_err(|e| BomBuilderError::DescriptorParse {
        path: source_path.to_owned(),
        reason: e.to_string(),
    })?;
    extract(&project, source_path, qualifier)
}

fn extract(
    project: &XmlElement,
    source_path: &str,
    qualifier: Option<&str>,
) -> Result<Coordinate, BomBuilderError> {
    if project.local_name() != ROOT_ELEMENT {
        return Err(BomBuilderError::DescriptorParse {
            path: source_path.to_owned(),
            reason: format!(
                "root element is <{}>, expected <{ROOT_ELEMENT}>",
                project.name()
            ),
        });
    }

    let group_id = require(project, &FieldLookup::GROUP_ID, source_path)?;
    let artifact_id = require(project, &FieldLookup::ARTIFACT_ID, source_path)?;
    let version = require(project, &FieldLookup::VERSION, source_path)?;

    Ok(Coordinate {
        group_id,
        artifact_id,
        version: qualify(&version, qualifier),
    })
}

/// 버전에 qualifier를 붙입니다 (`2.0` + `rc1` -> `2.0-rc1`).
pub fn qualify(version: &str, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(q) if !q.is_empty() => format!("{version}-{q}"),
        _ => version.to_owned(),
    }
}

fn require(
    project: &XmlElement,
    lookup: &FieldLookup,
    source_path: &str,
) -> Result<String, BomBuilderError> {
    match lookup.resolve(project) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(BomBuilderError::MissingField {
            path: source_path.to_owned(),
            field: lookup.field.to_owned(),
        }),
    }
}
