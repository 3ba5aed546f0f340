//! BOM 출력 -- 파일 또는 표준 출력
//!
//! 파일 출력은 대상과 같은 디렉토리에 임시 파일을 만들어 쓰고 flush/sync 후
//! rename으로 교체합니다. 중간에 실패하면 기존 파일은 그대로 남고 임시 파일은
//! drop 시 삭제됩니다.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::aggregate::BomDocument;
use crate::error::BomBuilderError;
use crate::types::Destination;
use crate::xml;

/// 출력 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// 파일에 기록됨
    File {
        /// 기록된 파일 경로
        path: PathBuf,
        /// 기록된 바이트 수
        bytes: usize,
    },
    /// 표준 출력에 기록됨
    Stdout {
        /// 기록된 바이트 수
        bytes: usize,
    },
}

impl EmitOutcome {
    /// 기록된 바이트 수
    pub fn bytes(&self) -> usize {
        match self {
            Self::File { bytes, .. } | Self::Stdout { bytes } => *bytes,
        }
    }
}

/// 문서를 출력 바이트열로 직렬화합니다.
///
/// XML 선언, 개행, 루트 요소, 마지막 개행 순서입니다.
pub fn render(doc: &BomDocument) -> Result<String, BomBuilderError> {
    let mut out = xml::serialize_document(doc.root())
        .map_err(|e| BomBuilderError::Render(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// 직렬화된 문서를 임의의 writer에 기록하고 flush합니다.
///
/// 직렬화 실패는 [`BomBuilderError::Render`], 쓰기 실패는 `target` 경로의
/// [`BomBuilderError::Io`]입니다.
pub fn write_to<W: Write>(
    doc: &BomDocument,
    mut writer: W,
    target: &str,
) -> Result<usize, BomBuilderError> {
    let rendered = render(doc)?;
    writer
        .write_all(rendered.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| BomBuilderError::io(target, e))?;
    Ok(rendered.len())
}

/// 문서를 출력 대상에 기록합니다.
pub fn emit(doc: &BomDocument, destination: &Destination) -> Result<EmitOutcome, BomBuilderError> {
    match destination {
        Destination::File(path) => {
            let bytes = write_file(doc, path)?;
            info!(path = %path.display(), bytes, bom = %doc.identity().coordinate, "bom written");
            Ok(EmitOutcome::File {
                path: path.clone(),
                bytes,
            })
        }
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let bytes = write_to(doc, stdout.lock(), "<stdout>")?;
            debug!(bytes, "bom written to stdout");
            Ok(EmitOutcome::Stdout { bytes })
        }
    }
}

fn write_file(doc: &BomDocument, path: &Path) -> Result<usize, BomBuilderError> {
    // 렌더링 실패는 파일을 만들기 전에 보고합니다.
    let rendered = render(doc)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".mkbom-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| BomBuilderError::io(parent, e))?;

    if let Err(e) = write_synced(&mut tmp, rendered.as_bytes()) {
        return Err(BomBuilderError::io(tmp.path(), e));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| BomBuilderError::io(tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| BomBuilderError::io(path, e.error))?;

    Ok(rendered.len())
}

fn write_synced(tmp: &mut tempfile::NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()
}
