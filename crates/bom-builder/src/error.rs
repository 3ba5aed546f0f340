//! BOM 빌더 에러 타입
//!
//! [`BomBuilderError`]는 디스크립터 탐색부터 BOM 출력까지 발생할 수 있는
//! 모든 에러를 나타냅니다. 모든 에러는 치명적이며, 부분 결과를 남기지 않고
//! 실행 전체를 중단시킵니다.
//!
//! # 에러 카테고리
//!
//! - **디스크립터 탐색/추출**: `DescriptorParse`, `MissingField`, `FileTooBig`
//! - **파일 I/O**: `Io`
//! - **설정**: `Config`
//! - **직렬화**: `Render`

/// 에러 분류
///
/// CLI는 이 분류를 기준으로 종료 코드를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 디스크립터 파싱 또는 필드 누락
    Discovery,
    /// 루트 디렉토리 / 출력 파일 I/O
    Io,
    /// 설정 값 오류
    Config,
    /// BOM 문서 직렬화 실패
    Render,
}

/// BOM 빌더 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum BomBuilderError {
    /// 디스크립터가 올바른 XML 문서가 아님
    #[error("descriptor parse error: {path}: {reason}")]
    DescriptorParse {
        /// 디스크립터 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 직접 필드와 parent 필드 모두에서 값을 찾지 못함
    #[error("descriptor {path} is missing required field '{field}'")]
    MissingField {
        /// 디스크립터 파일 경로
        path: String,
        /// 누락된 필드명 (예: "artifactId")
        field: String,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: u64,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일/디렉토리 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// BOM 문서 직렬화 실패
    #[error("bom render error: {0}")]
    Render(String),
}

impl BomBuilderError {
    /// 에러의 분류를 반환합니다.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DescriptorParse { .. } | Self::MissingField { .. } | Self::FileTooBig { .. } => {
                ErrorCategory::Discovery
            }
            Self::Io { .. } => ErrorCategory::Io,
            Self::Config { .. } => ErrorCategory::Config,
            Self::Render(_) => ErrorCategory::Render,
        }
    }

    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
