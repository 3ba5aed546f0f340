//! 최소 XML 트리 -- quick-xml 기반 파싱/직렬화
//!
//! 디스크립터 읽기와 BOM 쓰기에 필요한 만큼만 제공합니다.
//!
//! - 읽기: [`parse`] / [`parse_bytes`] -> [`XmlElement::child`] / [`XmlElement::text`]
//! - 쓰기: [`XmlElement::add_element`] / [`XmlElement::add_text`] /
//!   [`XmlElement::add_namespace`] -> [`serialize_document`]
//!
//! 직렬화는 트리에 들어 있는 공백 텍스트를 그대로 출력하며 들여쓰기를 다시
//! 계산하지 않습니다. 출력 레이아웃은 트리를 만드는 쪽이 결정합니다.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::encoding::Decoder;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

/// XML 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// 문법 오류 (태그 불일치, 잘못된 엔티티 등)
    #[error("malformed xml at byte {position}: {reason}")]
    Syntax {
        /// 오류가 감지된 바이트 위치
        position: u64,
        /// 오류 사유
        reason: String,
    },

    /// 루트 요소가 없음
    #[error("document has no root element")]
    NoRoot,

    /// 루트 요소 뒤에 또 다른 최상위 요소나 텍스트가 있음
    #[error("unexpected content after root element: {0}")]
    TrailingContent(String),

    /// 닫히지 않은 요소
    #[error("unexpected end of document: <{0}> is not closed")]
    Unclosed(String),

    /// 직렬화 실패
    #[error("xml write failed: {0}")]
    Write(String),
}

/// 트리 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// 하위 요소
    Element(XmlElement),
    /// 텍스트 (이스케이프 해제된 값)
    Text(String),
}

/// XML 요소
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// 빈 요소를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 작성된 그대로의 이름 (접두사 포함)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 네임스페이스 접두사를 제외한 이름
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// 하위 노드 목록
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// 하위 요소만 순회합니다.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// 이름이 `name`인 첫 번째 직계 하위 요소를 반환합니다.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.local_name() == name)
    }

    /// 경로를 따라 하위 요소를 찾습니다 (예: `["parent", "groupId"]`).
    pub fn child_path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |current, name| current.child(name))
    }

    /// 직계 텍스트 노드를 이어 붙인 값을 반환합니다.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// 속성 값을 반환합니다.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 속성을 추가합니다.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// 네임스페이스 선언을 추가합니다.
    ///
    /// `prefix`가 `None`이면 기본 네임스페이스(`xmlns`)를 선언합니다.
    pub fn add_namespace(&mut self, prefix: Option<&str>, uri: impl Into<String>) -> &mut Self {
        let key = match prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_owned(),
        };
        self.add_attribute(key, uri)
    }

    /// 텍스트 노드를 추가합니다.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// 하위 요소를 추가하고 그 요소에 대한 참조를 반환합니다.
    pub fn add_element(&mut self, name: impl Into<String>) -> &mut XmlElement {
        let index = self.children.len();
        self.children.push(XmlNode::Element(XmlElement::new(name)));
        match &mut self.children[index] {
            XmlNode::Element(el) => el,
            XmlNode::Text(_) => unreachable!("element was pushed at this index"),
        }
    }

    /// 텍스트 하나만 가진 하위 요소를 추가합니다 (`<name>text</name>`).
    pub fn add_text_element(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.add_element(name).add_text(text);
        self
    }

    /// 트리를 작성된 그대로 직렬화합니다 (선언 없음).
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        self.write_with(&mut writer)?;
        into_string(writer.into_inner())
    }

    fn write_with<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.write_with(writer)?,
                XmlNode::Text(text) => write_event(
                    writer,
                    Event::Text(BytesText::from_escaped(partial_escape(text))),
                )?,
            }
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// XML 선언과 루트 요소를 직렬화합니다.
///
/// 형식: `<?xml version="1.0" encoding="UTF-8"?>` + 개행 + 루트 요소
pub fn serialize_document(root: &XmlElement) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_event(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
    root.write_with(&mut writer)?;
    into_string(writer.into_inner())
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn into_string(bytes: Vec<u8>) -> Result<String, XmlError> {
    String::from_utf8(bytes).map_err(|e| XmlError::Write(e.to_string()))
}

/// 문서를 파싱하여 루트 요소를 반환합니다.
///
/// 입력은 이미 UTF-8 문자열이므로 XML 선언의 `encoding`은 무시합니다.
/// 파일 내용을 그대로 다룰 때는 [`parse_bytes`]를 사용합니다.
///
/// 요소 이름은 작성된 그대로 보존되며 조회는 [`XmlElement::local_name`] 기준입니다.
/// 주석, 처리 명령, DOCTYPE은 무시합니다.
pub fn parse(content: &str) -> Result<XmlElement, XmlError> {
    build_tree(Reader::from_str(content))
}

/// 바이트열 문서를 파싱하여 루트 요소를 반환합니다.
///
/// 바이트 순서 표식(BOM)이나 XML 선언의 `encoding`(예: `ISO-8859-1`)에 따라
/// 디코딩하며, 둘 다 없으면 UTF-8로 간주합니다. 디코딩할 수 없는 바이트는
/// [`XmlError::Syntax`]입니다.
pub fn parse_bytes(content: &[u8]) -> Result<XmlElement, XmlError> {
    build_tree(Reader::from_reader(content))
}

fn build_tree(mut reader: Reader<&[u8]>) -> Result<XmlElement, XmlError> {
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    reason: e.to_string(),
                });
            }
        };
        let position = reader.buffer_position() as u64;
        // 선언을 읽은 뒤에는 선언된 인코딩의 디코더가 반환됩니다.
        let decoder = reader.decoder();

        match event {
            Event::Start(start) => stack.push(element_from_start(&start, decoder, position)?),
            Event::Empty(start) => {
                let element = element_from_start(&start, decoder, position)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // 이름 불일치는 reader가 먼저 Syntax 에러로 보고합니다.
                let element = stack.pop().ok_or_else(|| XmlError::Syntax {
                    position,
                    reason: "closing tag without matching start".to_owned(),
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = decode_escaped(decoder, &text, position)?;
                push_text(&mut stack, &root, value)?;
            }
            Event::CData(data) => {
                let value = decode(decoder, &data, position)?;
                push_text(&mut stack, &root, value)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed(open.name.clone()));
    }

    root.ok_or(XmlError::NoRoot)
}

fn decode(decoder: Decoder, raw: &[u8], position: u64) -> Result<String, XmlError> {
    decoder
        .decode(raw)
        .map(Cow::into_owned)
        .map_err(|e| XmlError::Syntax {
            position,
            reason: e.to_string(),
        })
}

fn decode_escaped(decoder: Decoder, raw: &[u8], position: u64) -> Result<String, XmlError> {
    let decoded = decode(decoder, raw, position)?;
    let value = unescape(&decoded).map_err(|e| XmlError::Syntax {
        position,
        reason: e.to_string(),
    })?;
    Ok(value.into_owned())
}

fn element_from_start(
    start: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<XmlElement, XmlError> {
    let name = decode(decoder, start.name().as_ref(), position)?;
    let mut element = XmlElement::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Syntax {
            position,
            reason: e.to_string(),
        })?;
        let key = decode(decoder, attr.key.as_ref(), position)?;
        let value = decode_escaped(decoder, &attr.value, position)?;
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_some() => Err(XmlError::TrailingContent(format!("<{}>", element.name))),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(
    stack: &mut [XmlElement],
    root: &Option<XmlElement>,
    value: String,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(value));
            Ok(())
        }
        // 루트 바깥의 공백은 허용
        None if value.trim().is_empty() => Ok(()),
        None if root.is_some() => Err(XmlError::TrailingContent(value.trim().to_owned())),
        None => Err(XmlError::Syntax {
            position: 0,
            reason: format!("text before root element: '{}'", value.trim()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_elements_and_text() {
        let root = parse(
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.x</groupId>
  <parent><version>3.0</version></parent>
</project>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "project");
        assert_eq!(root.child("groupId").unwrap().text(), "com.x");
        assert_eq!(root.child_path(&["parent", "version"]).unwrap().text(), "3.0");
        assert!(root.child("artifactId").is_none());
        assert!(root.child_path(&["parent", "groupId"]).is_none());
    }

    #[test]
    fn parse_matches_by_local_name() {
        let root = parse(
            r#"<pom:project xmlns:pom="http://maven.apache.org/POM/4.0.0"><pom:artifactId>lib</pom:artifactId></pom:project>"#,
        )
        .unwrap();
        assert_eq!(root.local_name(), "project");
        assert_eq!(root.child("artifactId").unwrap().text(), "lib");
        assert_eq!(
            root.attribute("xmlns:pom"),
            Some("http://maven.apache.org/POM/4.0.0")
        );
    }

    #[test]
    fn parse_unescapes_entities_and_cdata() {
        let root = parse("<a><b>x &amp; y</b><c><![CDATA[1 < 2]]></c></a>").unwrap();
        assert_eq!(root.child("b").unwrap().text(), "x & y");
        assert_eq!(root.child("c").unwrap().text(), "1 < 2");
    }

    #[test]
    fn parse_ignores_comments() {
        let root = parse("<!-- header --><a><!-- inner --><b>v</b></a>").unwrap();
        assert_eq!(root.child("b").unwrap().text(), "v");
    }

    #[test]
    fn parse_rejects_mismatched_tags() {
        let err = parse("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, XmlError::Syntax { .. }), "got {err:?}");
    }

    #[test]
    fn parse_rejects_unclosed_root() {
        // reader 버전에 따라 EOF에서 직접 보고하거나 Eof 이후 스택 검사로 잡힙니다.
        let err = parse("<project><groupId>x</groupId>").unwrap_err();
        assert!(
            matches!(err, XmlError::Unclosed(ref name) if name == "project")
                || matches!(err, XmlError::Syntax { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn parse_rejects_empty_document() {
        assert!(matches!(parse("").unwrap_err(), XmlError::NoRoot));
        assert!(matches!(parse("   \n").unwrap_err(), XmlError::NoRoot));
    }

    #[test]
    fn parse_rejects_second_root() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, XmlError::TrailingContent(_)));
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert!(parse("not xml at all").is_err());
    }

    #[test]
    fn parse_bytes_decodes_declared_latin1() {
        let mut content =
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<project><name>Caf".to_vec();
        content.push(0xE9);
        content.extend_from_slice(b"</name></project>");

        let root = parse_bytes(&content).unwrap();
        assert_eq!(root.child("name").unwrap().text(), "Caf\u{e9}");
    }

    #[test]
    fn parse_bytes_skips_utf8_byte_order_mark() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(b"<project><groupId>g</groupId></project>");

        let root = parse_bytes(&content).unwrap();
        assert_eq!(root.local_name(), "project");
        assert_eq!(root.child("groupId").unwrap().text(), "g");
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8_text() {
        let content = b"<project><name>bad \xFF byte</name></project>";
        let err = parse_bytes(content).unwrap_err();
        assert!(matches!(err, XmlError::Syntax { .. }), "got {err:?}");
    }

    #[test]
    fn parse_bytes_matches_parse_for_utf8() {
        let content = "<a x=\"1 &amp; 2\"><b>\u{e9}t\u{e9}</b></a>";
        assert_eq!(parse_bytes(content.as_bytes()).unwrap(), parse(content).unwrap());
    }

    #[test]
    fn builder_writes_as_authored() {
        let mut root = XmlElement::new("project");
        root.add_namespace(None, "urn:a")
            .add_namespace(Some("x"), "urn:b")
            .add_attribute("x:loc", "urn:a a.xsd");
        root.add_text("\n  ");
        root.add_text_element("groupId", "g");
        root.add_text("\n");

        assert_eq!(
            root.to_xml_string().unwrap(),
            "<project xmlns=\"urn:a\" xmlns:x=\"urn:b\" x:loc=\"urn:a a.xsd\">\n  <groupId>g</groupId>\n</project>"
        );
    }

    #[test]
    fn builder_escapes_text() {
        let mut root = XmlElement::new("name");
        root.add_text("A & B <C>");
        assert_eq!(
            root.to_xml_string().unwrap(),
            "<name>A &amp; B &lt;C&gt;</name>"
        );
    }

    #[test]
    fn empty_element_is_self_closing() {
        let root = XmlElement::new("dependencies");
        assert_eq!(root.to_xml_string().unwrap(), "<dependencies/>");
    }

    #[test]
    fn serialize_document_prepends_declaration() {
        let mut root = XmlElement::new("a");
        root.add_text("v");
        let out = serialize_document(&root).unwrap();
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>v</a>");
    }

    #[test]
    fn serialized_tree_parses_back() {
        let mut root = XmlElement::new("project");
        root.add_element("parent").add_text_element("groupId", "com.y");
        let reparsed = parse(&serialize_document(&root).unwrap()).unwrap();
        assert_eq!(
            reparsed.child_path(&["parent", "groupId"]).unwrap().text(),
            "com.y"
        );
    }
}
