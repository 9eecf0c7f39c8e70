//! XLIFF 1.2 conversion for catalogues exchanged with the platform.

use crate::domain::model::{MessageCatalogue, TransferOptions};
use crate::domain::ports::CatalogueConverter;
use crate::utils::error::{Result, StorageError};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

const XMLNS: &str = "urn:oasis:names:tc:xliff:document:1.2";
const VERSION: &str = "1.2";

#[derive(Debug, Clone, Copy, Default)]
pub struct XliffConverter;

impl XliffConverter {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogueConverter for XliffConverter {
    fn content_to_catalogue(
        &self,
        content: &str,
        locale: &str,
        domain: &str,
    ) -> Result<MessageCatalogue> {
        let mut reader = Reader::from_str(content);

        let mut catalogue = MessageCatalogue::new(locale);
        let mut unit: Option<TransUnit> = None;
        let mut field: Option<Field> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"trans-unit" => unit = Some(TransUnit::from_start(&e)?),
                    b"source" => {
                        if let Some(u) = unit.as_mut() {
                            u.source = Some(String::new());
                            field = Some(Field::Source);
                        }
                    }
                    b"target" => {
                        if let Some(u) = unit.as_mut() {
                            u.target = Some(String::new());
                            field = Some(Field::Target);
                        }
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"trans-unit" => TransUnit::from_start(&e)?.finish(&mut catalogue, domain),
                    b"source" => {
                        if let Some(u) = unit.as_mut() {
                            u.source = Some(String::new());
                        }
                    }
                    b"target" => {
                        if let Some(u) = unit.as_mut() {
                            u.target = Some(String::new());
                        }
                    }
                    _ => {}
                },
                Event::Text(e) => {
                    if let (Some(u), Some(f)) = (unit.as_mut(), field) {
                        u.append(f, &e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let (Some(u), Some(f)) = (unit.as_mut(), field) {
                        u.append(f, &String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"source" | b"target" => field = None,
                    b"trans-unit" => {
                        if let Some(u) = unit.take() {
                            u.finish(&mut catalogue, domain);
                        }
                        field = None;
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(catalogue)
    }

    fn catalogue_to_content(
        &self,
        catalogue: &MessageCatalogue,
        domain: &str,
        options: &TransferOptions,
    ) -> Result<String> {
        let source_language = options
            .default_locale
            .as_deref()
            .unwrap_or(catalogue.locale());

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut xliff = BytesStart::new("xliff");
        xliff.push_attribute(("xmlns", XMLNS));
        xliff.push_attribute(("version", VERSION));
        writer.write_event(Event::Start(xliff))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("source-language", source_language));
        file.push_attribute(("target-language", catalogue.locale()));
        file.push_attribute(("datatype", "plaintext"));
        file.push_attribute(("original", "file.ext"));
        writer.write_event(Event::Start(file))?;
        writer.write_event(Event::Start(BytesStart::new("body")))?;

        if let Some(messages) = catalogue.all(domain) {
            for (key, translation) in messages {
                let mut unit = BytesStart::new("trans-unit");
                unit.push_attribute(("id", key.as_str()));
                writer.write_event(Event::Start(unit))?;
                write_text_element(&mut writer, "source", key)?;
                write_text_element(&mut writer, "target", translation)?;
                writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
            }
        }

        writer.write_event(Event::End(BytesEnd::new("body")))?;
        writer.write_event(Event::End(BytesEnd::new("file")))?;
        writer.write_event(Event::End(BytesEnd::new("xliff")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| StorageError::InvalidCatalogue {
            message: e.to_string(),
        })
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Source,
    Target,
}

#[derive(Debug, Default)]
struct TransUnit {
    id: Option<String>,
    resname: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

impl TransUnit {
    fn from_start(e: &BytesStart) -> Result<Self> {
        let mut unit = TransUnit::default();
        for attr in e.attributes().with_checks(false) {
            let attr = attr.map_err(quick_xml::Error::from)?;
            match attr.key.as_ref() {
                b"id" => unit.id = Some(attr.unescape_value()?.to_string()),
                b"resname" => unit.resname = Some(attr.unescape_value()?.to_string()),
                _ => {}
            }
        }
        Ok(unit)
    }

    fn append(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Source => &mut self.source,
            Field::Target => &mut self.target,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn finish(self, catalogue: &mut MessageCatalogue, domain: &str) {
        let key = [self.source, self.resname, self.id]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty());

        let Some(key) = key else {
            tracing::warn!("Skipping trans-unit without source, resname or id in domain {}", domain);
            return;
        };

        let translation = self.target.unwrap_or_else(|| key.clone());
        catalogue.set(domain, key, translation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file source-language="en" target-language="fr" datatype="plaintext" original="file.ext">
    <body>
      <trans-unit id="a1" resname="hello">
        <source>hello</source>
        <target>Bonjour &amp; bienvenue</target>
      </trans-unit>
      <trans-unit id="a2">
        <source>bye</source>
        <target></target>
      </trans-unit>
      <trans-unit id="a3">
        <source>untouched</source>
      </trans-unit>
      <trans-unit id="a4" resname="from_resname">
        <source></source>
        <target><![CDATA[<b>bold</b>]]></target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

    #[test]
    fn test_content_to_catalogue() {
        let catalogue = XliffConverter::new()
            .content_to_catalogue(EXPORTED, "fr", "messages")
            .unwrap();

        assert_eq!(catalogue.locale(), "fr");
        assert_eq!(catalogue.get("messages", "hello"), Some("Bonjour & bienvenue"));
        assert_eq!(catalogue.get("messages", "bye"), Some(""));
        assert_eq!(catalogue.get("messages", "untouched"), Some("untouched"));
        assert_eq!(catalogue.get("messages", "from_resname"), Some("<b>bold</b>"));
        assert_eq!(catalogue.len(), 4);
    }

    #[test]
    fn test_content_without_units_is_empty() {
        let catalogue = XliffConverter::new()
            .content_to_catalogue("<xliff version=\"1.2\"><file><body/></file></xliff>", "en", "messages")
            .unwrap();
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let result = XliffConverter::new().content_to_catalogue(
            "<xliff><file><body><trans-unit id=\"x\"></file></xliff>",
            "en",
            "messages",
        );
        assert!(matches!(result, Err(StorageError::Xml(_))));
    }

    #[test]
    fn test_catalogue_to_content_layout() {
        let mut catalogue = MessageCatalogue::new("fr");
        catalogue.set("messages", "greeting", "Bonjour <ami>");
        catalogue.set("validators", "blank", "Vide");

        let content = XliffConverter::new()
            .catalogue_to_content(&catalogue, "messages", &TransferOptions::default())
            .unwrap();

        assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(content.contains("source-language=\"fr\" target-language=\"fr\""));
        assert!(content.contains("<trans-unit id=\"greeting\">"));
        assert!(content.contains("<source>greeting</source>"));
        assert!(content.contains("<target>Bonjour &lt;ami&gt;</target>"));
        assert!(!content.contains("blank"));
    }

    #[test]
    fn test_default_locale_sets_source_language() {
        let mut catalogue = MessageCatalogue::new("de");
        catalogue.set("messages", "k", "v");
        let options = TransferOptions {
            default_locale: Some("x-id".to_string()),
        };

        let content = XliffConverter::new()
            .catalogue_to_content(&catalogue, "messages", &options)
            .unwrap();
        assert!(content.contains("source-language=\"x-id\" target-language=\"de\""));
    }

    #[test]
    fn test_written_content_reads_back() {
        let mut catalogue = MessageCatalogue::new("en");
        catalogue.set("messages", "greeting", "Hello & welcome");
        catalogue.set("messages", "empty", "");
        catalogue.set("messages", "label", "Name: ");
        catalogue.set("messages", "space", " ");
        catalogue.set("messages", "padded", "  both sides  ");

        let converter = XliffConverter::new();
        let content = converter
            .catalogue_to_content(&catalogue, "messages", &TransferOptions::default())
            .unwrap();
        let parsed = converter.content_to_catalogue(&content, "en", "messages").unwrap();

        assert_eq!(parsed, catalogue);
    }
}
