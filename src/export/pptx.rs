//! Office Open XML package writer.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::template::*;
use super::{ExportSlide, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU, TextRun, normalize};
use crate::deck::Deck;
use crate::error::{PresentifyError, Result};

/// Default file name offered for downloads.
pub const DEFAULT_FILE_NAME: &str = "presentation.pptx";

/// MIME type of a `.pptx` package.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const APPLICATION: &str = "Presentify";

/// Writes export slides as a `.pptx` package.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    title: String,
    created: DateTime<Utc>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PptxWriter {
    pub fn new() -> Self {
        Self {
            title: "Presentation".to_string(),
            created: Utc::now(),
        }
    }

    /// Set the document title stored in the core properties.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Pin the creation timestamp.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Export a deck into an in-memory package.
    pub fn deck_to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        self.to_bytes(&normalize(deck))
    }

    /// Export a deck to `path`.
    pub fn save_deck(&self, deck: &Deck, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write(&normalize(deck), file)?;
        info!(path = %path.display(), slides = deck.len(), "exported presentation");
        Ok(())
    }

    pub fn to_bytes(&self, slides: &[ExportSlide]) -> Result<Vec<u8>> {
        Ok(self.write(slides, Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the full package and hand the writer back.
    pub fn write<W: Write + Seek>(&self, slides: &[ExportSlide], writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut put = |name: &str, body: &str| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(body.as_bytes())?;
            Ok(())
        };

        put("[Content_Types].xml", &content_types_xml(slides.len())?)?;
        put("_rels/.rels", &root_rels_xml()?)?;
        put("docProps/core.xml", &self.core_xml()?)?;
        put("docProps/app.xml", &app_xml(slides.len())?)?;
        put("ppt/presentation.xml", &presentation_xml(slides.len())?)?;
        put("ppt/_rels/presentation.xml.rels", &presentation_rels_xml(slides.len())?)?;
        put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML)?;
        put("ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS)?;
        put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT_XML)?;
        put("ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS)?;
        put("ppt/theme/theme1.xml", THEME_XML)?;

        for (i, slide) in slides.iter().enumerate() {
            let number = i + 1;
            put(&format!("ppt/slides/slide{}.xml", number), &slide_xml(slide)?)?;
            put(&format!("ppt/slides/_rels/slide{}.xml.rels", number), SLIDE_RELS)?;
            debug!(slide = number, runs = slide.runs.len(), "wrote slide");
        }

        Ok(zip.finish()?)
    }

    fn core_xml(&self) -> Result<String> {
        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut xml = String::with_capacity(512);
        xml.push_str(XML_DECLARATION);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
        ));
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(&self.title)).map_err(xml_error)?;
        write!(xml, "<dc:creator>{}</dc:creator>", APPLICATION).map_err(xml_error)?;
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
            stamp
        )
        .map_err(xml_error)?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }
}

/// Escape XML special characters.
/// Escape markup and drop characters XML 1.0 cannot carry at all
/// (C0 controls other than tab, LF and CR, plus U+FFFE/U+FFFF).
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(c),
        }
    }
    out
}

fn xml_error(e: std::fmt::Error) -> PresentifyError {
    PresentifyError::Export(format!("XML formatting failed: {}", e))
}

fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE_PROPS),
        ("/docProps/app.xml", CT_EXTENDED_PROPS),
    ];
    for (part, content_type) in overrides {
        write!(xml, r#"<Override PartName="{}" ContentType="{}"/>"#, part, content_type).map_err(xml_error)?;
    }
    for number in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            number, CT_SLIDE
        )
        .map_err(xml_error)?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

fn root_rels_xml() -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    for (id, rel_type, target) in [
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE_PROPS, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPS, "docProps/app.xml"),
    ] {
        write!(xml, r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#, id, rel_type, target)
            .map_err(xml_error)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn app_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#);
    write!(
        xml,
        "<Application>{}</Application><Slides>{}</Slides>",
        APPLICATION, slide_count
    )
    .map_err(xml_error)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Slides take relationship ids after the master and theme.
fn slide_rel_id(index: usize) -> String {
    format!("rId{}", index + 3)
}

fn presentation_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_DRAWING, NS_REL, NS_MAIN
    )
    .map_err(xml_error)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + i, slide_rel_id(i)).map_err(xml_error)?;
        }
        xml.push_str("</p:sldIdLst>");
    }
    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="{}" cy="{}"/>"#,
        SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU
    )
    .map_err(xml_error)?;
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        REL_SLIDE_MASTER
    )
    .map_err(xml_error)?;
    write!(
        xml,
        r#"<Relationship Id="rId2" Type="{}" Target="theme/theme1.xml"/>"#,
        REL_THEME
    )
    .map_err(xml_error)?;
    for i in 0..slide_count {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            slide_rel_id(i),
            REL_SLIDE,
            i + 1
        )
        .map_err(xml_error)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn slide_xml(slide: &ExportSlide) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide.runs.len() * 768);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_DRAWING, NS_REL, NS_MAIN
    )
    .map_err(xml_error)?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(SP_TREE_HEADER);
    // Shape id 1 is the group itself.
    for (i, run) in slide.runs.iter().enumerate() {
        text_box_xml(&mut xml, i as u32 + 2, run)?;
    }
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

fn text_box_xml(xml: &mut String, shape_id: u32, run: &TextRun) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{0}" name="Text Box {0}"/>"#, shape_id).map_err(xml_error)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

    xml.push_str("<p:spPr><a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, run.x, run.y).map_err(xml_error)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, run.width, run.height).map_err(xml_error)?;
    xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

    xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#);
    // One paragraph per line; the properties repeat on each run.
    for line in run.text.split('\n') {
        write!(xml, r#"<a:p><a:pPr algn="{}"/><a:r>"#, run.align.code()).map_err(xml_error)?;
        run_properties_xml(xml, run)?;
        write!(xml, "<a:t>{}</a:t></a:r></a:p>", escape_xml(line)).map_err(xml_error)?;
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn run_properties_xml(xml: &mut String, run: &TextRun) -> Result<()> {
    write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, run.font_size * 100).map_err(xml_error)?;
    if run.bold {
        xml.push_str(r#" b="1""#);
    }
    if run.italic {
        xml.push_str(r#" i="1""#);
    }
    if run.underline {
        xml.push_str(r#" u="sng""#);
    }
    xml.push_str(r#" dirty="0">"#);
    // Fill precedes the font elements in rPr.
    if let Some(color) = &run.color {
        write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color).map_err(xml_error)?;
    }
    if let Some(face) = &run.font_face {
        write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(face)).map_err(xml_error)?;
    }
    xml.push_str("</a:rPr>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::RunAlign;
    use chrono::TimeZone;
    use std::io::Read;

    fn run(text: &str) -> TextRun {
        TextRun {
            text: text.to_string(),
            x: 10,
            y: 20,
            width: 30,
            height: 40,
            font_size: 24,
            font_face: Some("Georgia".into()),
            color: Some("FF0000".into()),
            bold: true,
            italic: false,
            underline: true,
            align: RunAlign::Center,
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut body = String::new();
        file.read_to_string(&mut body).unwrap();
        body
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(escape_xml("a\u{0}b\u{1b}c\td\r\n"), "abc\td\r\n");
        assert_eq!(escape_xml("x\u{ffff}y\u{fffe}"), "xy");

        let mut xml = String::new();
        text_box_xml(&mut xml, 2, &run("bell\u{7}\u{8}")).unwrap();
        assert!(xml.contains("<a:t>bell</a:t>"));
        assert!(!xml.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn test_text_box_xml() {
        let mut xml = String::new();
        text_box_xml(&mut xml, 2, &run("Q&A\nsecond")).unwrap();
        assert!(xml.contains(r#"<a:off x="10" y="20"/>"#));
        assert!(xml.contains(r#"<a:ext cx="30" cy="40"/>"#));
        assert!(xml.contains(r#"sz="2400" b="1" u="sng""#));
        assert!(xml.contains(r#"<a:srgbClr val="FF0000"/>"#));
        assert!(xml.contains(r#"<a:latin typeface="Georgia"/>"#));
        assert!(xml.contains("<a:t>Q&amp;A</a:t>"));
        assert_eq!(xml.matches(r#"<a:pPr algn="ctr"/>"#).count(), 2);
        assert!(!xml.contains(r#" i="1""#));
    }

    #[test]
    fn test_package_parts() {
        let slides = vec![
            ExportSlide { runs: vec![run("one")] },
            ExportSlide::default(),
        ];
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let bytes = PptxWriter::new()
            .title("Demo")
            .created_at(created)
            .to_bytes(&slides)
            .unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "ppt/presentation.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/theme/theme1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
        assert_eq!(presentation.matches("<p:sldId ").count(), 2);

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Demo</dc:title>"));
        assert!(core.contains(r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-01-02T03:04:05Z</dcterms:created>"#));
        assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("<p:spTree>"));
    }
}
