//! Parse an OpenRosa `<xforms>` document into entries.

use roxmltree::{Document, Node};

use super::{FormListEntry, FormListError};

/// True when `node` is an element with local name `name` (namespace ignored).
pub(crate) fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Trimmed text of the first child element called `name`; blank text counts as absent.
pub(crate) fn child_text(node: &Node<'_, '_>, name: &str) -> Option<String> {
    let child = node.children().find(|c| is_named(c, name))?;
    let text: String = child
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse a form list document. Entries keep document order.
///
/// Missing child elements are not errors here: a form without `<hash>` must
/// still reach the validator so it can be reported as a per-form failure.
pub fn parse_form_list(xml: &str) -> Result<Vec<FormListEntry>, FormListError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != "xforms" {
        return Err(FormListError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    let entries = root
        .children()
        .filter(|n| is_named(n, "xform"))
        .map(|xform| FormListEntry {
            form_id: child_text(&xform, "formID").unwrap_or_default(),
            name: child_text(&xform, "name").unwrap_or_default(),
            version: child_text(&xform, "version"),
            hash: child_text(&xform, "hash"),
            download_url: child_text(&xform, "downloadUrl"),
            manifest_url: child_text(&xform, "manifestUrl"),
            description: child_text(&xform, "descriptionText"),
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xforms xmlns="http://openrosa.org/xforms/xformsList">
  <xform>
    <formID>one-question</formID>
    <name>One Question</name>
    <version>1</version>
    <hash>md5:0cc175b9c0f1b6a831c399e269772661</hash>
    <descriptionText></descriptionText>
    <downloadUrl>http://localhost/forms/one-question.xml</downloadUrl>
    <manifestUrl>http://localhost/manifest/one-question</manifestUrl>
  </xform>
  <xform>
    <formID>no-hash</formID>
    <name>No Hash</name>
    <downloadUrl>http://localhost/forms/no-hash.xml</downloadUrl>
  </xform>
</xforms>"#;

    #[test]
    fn parses_all_fields() {
        let entries = parse_form_list(LIST).unwrap();
        assert_eq!(entries.len(), 2);
        let e = &entries[0];
        assert_eq!(e.form_id, "one-question");
        assert_eq!(e.name, "One Question");
        assert_eq!(e.version.as_deref(), Some("1"));
        assert_eq!(
            e.hash.as_deref(),
            Some("md5:0cc175b9c0f1b6a831c399e269772661")
        );
        assert_eq!(
            e.download_url.as_deref(),
            Some("http://localhost/forms/one-question.xml")
        );
        assert_eq!(
            e.manifest_url.as_deref(),
            Some("http://localhost/manifest/one-question")
        );
        assert!(e.description.is_none());
    }

    #[test]
    fn missing_hash_is_kept_as_none() {
        let entries = parse_form_list(LIST).unwrap();
        assert!(entries[1].hash.is_none());
        assert!(entries[1].version.is_none());
    }

    #[test]
    fn empty_hash_element_counts_as_absent() {
        let xml = "<xforms><xform><formID>a</formID><hash>  </hash></xform></xforms>";
        let entries = parse_form_list(xml).unwrap();
        assert!(entries[0].hash.is_none());
    }

    #[test]
    fn entry_with_nothing_but_hash_still_parses() {
        let xml = "<xforms><xform><hash>md5:x</hash></xform></xforms>";
        let entries = parse_form_list(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name(), "(unnamed form)");
    }

    #[test]
    fn empty_list() {
        let entries =
            parse_form_list(r#"<xforms xmlns="http://openrosa.org/xforms/xformsList"/>"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn wrong_root_rejected() {
        let err = parse_form_list("<html><body/></html>").unwrap_err();
        assert!(matches!(err, FormListError::UnexpectedRoot(ref r) if r == "html"));
    }

    #[test]
    fn malformed_xml_rejected() {
        assert!(matches!(
            parse_form_list("<xforms><xform>").unwrap_err(),
            FormListError::Xml(_)
        ));
    }
}
