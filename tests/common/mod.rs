//! Shared test fixture: builds real DOCX packages in memory.
#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
</w:styles>"#;

/// Builds a minimal but valid DOCX package paragraph by paragraph.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain paragraph with a single run.
    pub fn para(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        ));
        self
    }

    /// Paragraph with no runs at all.
    pub fn empty_para(mut self) -> Self {
        self.body.push_str("<w:p/>");
        self
    }

    /// Paragraph with a style id and native numbering, as Word emits for
    /// list items.
    pub fn numbered_para(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"ListParagraph\"/><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        ));
        self
    }

    /// Paragraph whose first run is bold and which splits its text across
    /// several runs.
    pub fn formatted_para(mut self, runs: &[&str]) -> Self {
        self.body.push_str("<w:p>");
        for (i, run) in runs.iter().enumerate() {
            if i == 0 {
                self.body.push_str(&format!(
                    "<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                    escape(run)
                ));
            } else {
                self.body.push_str(&format!(
                    "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                    escape(run)
                ));
            }
        }
        self.body.push_str("</w:p>");
        self
    }

    /// One-cell table wrapping a paragraph; its content must never be
    /// counted in the body stream.
    pub fn table(mut self, cell_text: &str) -> Self {
        self.body.push_str(&format!(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            escape(cell_text)
        ));
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
            self.body
        )
    }

    /// Assemble the package bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let parts: &[(&str, String)] = &[
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", RELS.to_string()),
            ("word/styles.xml", STYLES.to_string()),
            ("word/document.xml", self.document_xml()),
        ];
        for (name, data) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }
}

/// A resume-shaped document used across the extraction and rewrite tests:
/// contact header, two-line summary, then two experience blocks.
pub fn sample_resume() -> Vec<u8> {
    DocxBuilder::new()
        .para("JANE DOE")
        .para("jane@example.com | (555) 123-4567")
        .para("Backend engineer with ten years of experience.")
        .para("Focused on reliability and developer tooling.")
        .empty_para()
        .para("EXPERIENCE")
        .para("Acme Corp — Senior Engineer")
        .numbered_para("Built the ingestion pipeline handling 2M events daily")
        .numbered_para("Reduced API latency by 40% with Redis caching")
        .numbered_para("Mentored four junior engineers")
        .empty_para()
        .para("Globex — Engineer")
        .numbered_para("Wrote Terraform modules for multi-region deploys")
        .numbered_para("Migrated the billing service to Kubernetes")
        .build()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
