//! BOM 문서 조립
//!
//! [`aggregate`]는 BOM 식별 정보와 좌표 목록으로 Maven POM 형식의 문서 트리를
//! 만듭니다. 입력 순서를 그대로 유지하며 정렬이나 중복 제거를 하지 않습니다.
//!
//! 최상위 필드 사이의 빈 줄과 들여쓰기는 트리에 텍스트 노드로 직접 넣습니다.
//! 이 공백은 출력 형식의 일부이며, 실행마다 같은 바이트열을 보장합니다.

use std::fmt;

use crate::types::{BomIdentity, Coordinate};
use crate::xml::XmlElement;

/// POM 기본 네임스페이스
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
/// XML Schema instance 네임스페이스
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// `xsi:schemaLocation` 속성 값
pub const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";
/// `<modelVersion>` 값
pub const MODEL_VERSION: &str = "4.0.0";

// 레이아웃 공백
const FIELD_BREAK: &str = "\n  ";
const SECTION_BREAK: &str = "\n\n  ";

/// 메모리 내 BOM 문서
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomDocument {
    identity: BomIdentity,
    dependency_count: usize,
    root: XmlElement,
}

impl BomDocument {
    /// BOM 식별 정보
    pub fn identity(&self) -> &BomIdentity {
        &self.identity
    }

    /// `<dependency>` 항목 수
    pub fn dependency_count(&self) -> usize {
        self.dependency_count
    }

    /// `<project>` 루트 요소
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

impl fmt::Display for BomDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BomDocument({}, dependencies={})",
            self.identity.coordinate, self.dependency_count,
        )
    }
}

/// BOM 문서를 조립합니다.
///
/// 실패하지 않습니다. 입력 좌표는 [`Discoverer`](crate::Discoverer)가 이미 검증했습니다.
pub fn aggregate(identity: &BomIdentity, records: &[Coordinate]) -> BomDocument {
    let mut project = XmlElement::new("project");
    project
        .add_namespace(None, POM_NAMESPACE)
        .add_namespace(Some("xsi"), XSI_NAMESPACE)
        .add_attribute("xsi:schemaLocation", SCHEMA_LOCATION);

    project.add_text(FIELD_BREAK);
    project.add_text_element("modelVersion", MODEL_VERSION);
    project.add_text(SECTION_BREAK);

    let coordinate = &identity.coordinate;
    project.add_text_element("groupId", &coordinate.group_id);
    project.add_text(FIELD_BREAK);
    project.add_text_element("artifactId", &coordinate.artifact_id);
    project.add_text(FIELD_BREAK);
    project.add_text_element("version", &coordinate.version);
    project.add_text(SECTION_BREAK);

    if let Some(name) = identity.name.as_deref().filter(|n| !n.is_empty()) {
        project.add_text_element("name", name);
        project.add_text(SECTION_BREAK);
    }

    let management = project.add_element("dependencyManagement");
    management.add_text("\n    ");
    let dependencies = management.add_element("dependencies");
    for record in records {
        dependencies.add_text("\n      ");
        push_dependency(dependencies, record);
    }
    dependencies.add_text("\n    ");
    management.add_text(FIELD_BREAK);

    project.add_text("\n");

    BomDocument {
        identity: identity.clone(),
        dependency_count: records.len(),
        root: project,
    }
}

fn push_dependency(dependencies: &mut XmlElement, record: &Coordinate) {
    const INDENT: &str = "\n        ";

    let dependency = dependencies.add_element("dependency");
    dependency.add_text(INDENT);
    dependency.add_text_element("groupId", &record.group_id);
    dependency.add_text(INDENT);
    dependency.add_text_element("artifactId", &record.artifact_id);
    dependency.add_text(INDENT);
    dependency.add_text_element("version", &record.version);
    dependency.add_text("\n      ");
}
