//! 도메인 타입 -- 좌표, BOM 식별자, 출력 대상
//!
//! 디스크립터에서 추출한 좌표와 BOM 자체의 식별 정보를 정의합니다.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 모듈 좌표 (groupId, artifactId, version)
///
/// 디스크립터 파일 하나당 하나씩 생성됩니다.
/// `version`에는 qualifier가 이미 적용되어 있을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// 그룹 식별자
    pub group_id: String,
    /// 아티팩트 식별자
    pub artifact_id: String,
    /// 버전 (qualifier 포함 가능)
    pub version: String,
}

impl Coordinate {
    /// 세 필드로 좌표를 생성합니다.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// 생성할 BOM 자체의 식별 정보
///
/// 입력 디스크립터에서 파생되지 않고 운영자가 지정합니다.
/// qualifier는 이 버전에 적용되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomIdentity {
    /// BOM 좌표
    pub coordinate: Coordinate,
    /// `<name>` 요소 값 (없으면 요소 생략)
    pub name: Option<String>,
}

impl fmt::Display for BomIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({name})", self.coordinate),
            None => write!(f, "{}", self.coordinate),
        }
    }
}

/// BOM 출력 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// 파일 (기존 파일은 덮어씀)
    File(PathBuf),
    /// 표준 출력
    Stdout,
}

impl Destination {
    /// 설정 문자열에서 출력 대상을 결정합니다.
    ///
    /// `-` 또는 빈 문자열은 표준 출력을 의미합니다. 그 외의 값은 공백을
    /// 포함해 그대로 파일 경로로 사용합니다.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "" | "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}
